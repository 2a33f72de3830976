#![no_main]

use libfuzzer_sys::fuzz_target;
use wordpack::{FinishUnpacker, PackingError, UnpackingTarget, WORD_BYTES};

mod common;
use common::{cut, run, HexSlice};

fuzz_target!(|input: FuzzInput| {
    // A single count byte can unpack to 2 KiB; keep the fuzzer fast.
    let packed = &input.data[..input.data.len().min(4096)];

    let chunks = cut(packed, &input.cuts, 1);
    let mut unpacker = wordpack::Unpacker::new(usize::from(input.buffer_words.max(1)) * WORD_BYTES)
        .expect("aligned buffer");
    let streamed = run(&mut unpacker, chunks);

    let mut finisher = FinishUnpacker::new(UnpackingTarget::new(WORD_BYTES * 1024).unwrap());
    let finished = finisher.set(packed).and_then(|()| finisher.finish());

    match (streamed, finished) {
        (Ok(streamed), Ok(finished)) => {
            assert_eq!(streamed.len() % WORD_BYTES, 0);
            assert_eq!(streamed, finished, "for {:?}", HexSlice(packed));
        }
        (Err(PackingError::MalformedStream), Err(PackingError::MalformedStream)) => {}
        // The fixed target may fill before the stream turns out malformed.
        (_, Err(PackingError::InsufficientCapacity)) => {}
        (streamed, finished) => panic!(
            "engines disagree for {:?}: streamed {:?}, finished {:?}",
            HexSlice(packed),
            streamed.map(|v| v.len()),
            finished.map(|b| b.len())
        ),
    }
});

#[derive(arbitrary::Arbitrary, Debug)]
struct FuzzInput {
    data: Vec<u8>,
    cuts: Vec<u16>,
    buffer_words: u8,
}
