#![no_main]

use libfuzzer_sys::fuzz_target;
use wordpack::WORD_BYTES;

mod common;
use common::HexSlice;

fuzz_target!(|data: &[u8]| {
    // Only whole words can be packed
    let input = &data[..data.len() / WORD_BYTES * WORD_BYTES];

    let packed = wordpack::pack(input).expect("aligned input always packs");
    let unpacked = wordpack::unpack(&packed).expect("packed output always unpacks");

    assert_eq!(
        unpacked,
        input,
        "round trip mismatch for input {:?} packed as {:?}",
        HexSlice(input),
        HexSlice(&packed)
    );
});
