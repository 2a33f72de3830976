#![no_main]

use libfuzzer_sys::fuzz_target;
use wordpack::{Packer, Unpacker, WORD_BYTES};

mod common;
use common::{cut, run, HexSlice};

fuzz_target!(|input: FuzzInput| {
    let data = &input.data[..input.data.len() / WORD_BYTES * WORD_BYTES];

    // Packing whole and packing in chunks must produce identical bytes
    let whole = wordpack::pack(data).expect("aligned input always packs");
    let buffer_size = 2048 + usize::from(input.extra_buffer);
    let mut packer = Packer::new(buffer_size).expect("buffer is large enough");
    let chunked = run(&mut packer, cut(data, &input.unpacked_cuts, WORD_BYTES))
        .expect("aligned chunks always pack");
    assert_eq!(
        chunked,
        whole,
        "chunked packing differs for {:?}",
        HexSlice(data)
    );

    // And so must unpacking
    let mut unpacker = Unpacker::new(WORD_BYTES * (1 + usize::from(input.extra_buffer % 64)))
        .expect("aligned buffer");
    let unpacked = run(&mut unpacker, cut(&whole, &input.packed_cuts, 1))
        .expect("packed output always unpacks");
    assert_eq!(unpacked, data, "chunked unpacking differs for {:?}", HexSlice(&whole));
});

#[derive(arbitrary::Arbitrary, Debug)]
struct FuzzInput {
    data: Vec<u8>,
    unpacked_cuts: Vec<u16>,
    packed_cuts: Vec<u16>,
    extra_buffer: u16,
}
