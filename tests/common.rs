#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng as _, SeedableRng as _};
use wordpack::{Bytes, Packer, PackingResult, Transform, Unpacker, WORD_BYTES};

/// Routes the crate's `log` output through the test harness; run with
/// `RUST_LOG=wordpack=trace` to see state transitions.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn test_input_words() -> Vec<usize> {
    vec![0, 1, 2, 255, 256, 257, 511, 1024, 4096]
}

/// Random bytes broken up by zero ranges and `(0, 0)` pairs, so that every
/// kind of tag, zero range and verbatim range shows up.
pub fn random_unpacked(rng: &mut StdRng, words: usize) -> Vec<u8> {
    let len = words * WORD_BYTES;
    let mut unpacked: Vec<u8> = (0..len).map(|_| rng.random()).collect();
    if len <= 400 {
        return unpacked;
    }

    let ranges = rng.random_range(0..=len / 400);
    for _ in 0..ranges {
        let start = rng.random_range(0..len - 400);
        let end = start + rng.random_range(0..400);
        unpacked[start..end].fill(0);
    }

    let pairs = rng.random_range(0..=len / 500);
    for _ in 0..pairs {
        let start = rng.random_range(0..len - 2);
        unpacked[start..start + 2].fill(0);
    }
    unpacked
}

pub fn get_test_cases(words: usize) -> Vec<Vec<u8>> {
    let mut rng = StdRng::seed_from_u64(14);
    let n = words * WORD_BYTES;

    vec![
        // Zeroes
        vec![0u8; n],
        // No zero bytes at all
        vec![0xa5u8; n],
        // Random with zero ranges
        random_unpacked(&mut rng, words),
        // Alternating dense and empty words
        (0..n)
            .map(|i| if (i / WORD_BYTES) % 2 == 0 { (i % 251) as u8 + 1 } else { 0 })
            .collect(),
        // Six non-zero bytes per word, below the verbatim threshold
        (0..n)
            .map(|i| if i % WORD_BYTES < 6 { 0x11 } else { 0 })
            .collect(),
        // Seven non-zero bytes per word, at the verbatim threshold
        (0..n)
            .map(|i| if i % WORD_BYTES == 3 { 0 } else { 0x77 })
            .collect(),
        // Spike in the middle
        (0..n).map(|i| if i == n / 2 { 0xff } else { 0 }).collect(),
        // Sparse random bytes
        (0..n)
            .map(|_| if rng.random_ratio(1, 5) { rng.random() } else { 0 })
            .collect(),
    ]
}

/// Splits `data` into random chunks whose lengths are multiples of `align`,
/// except possibly the last one when `data` itself is not aligned.
pub fn random_chunks(rng: &mut StdRng, data: &[u8], max_units: usize, align: usize) -> Vec<Bytes> {
    let mut chunks = Vec::new();
    let mut cut = 0;
    while cut < data.len() {
        let len = (rng.random_range(0..=max_units) * align).min(data.len() - cut);
        chunks.push(Bytes::copy_from_slice(&data[cut..cut + len]));
        cut += len;
    }
    chunks
}

/// Runs `core` over `chunks` through the `set`/`next`/`flush` protocol,
/// concatenating every output.
pub fn run<T: Transform>(
    core: &mut T,
    chunks: impl IntoIterator<Item = Bytes>,
) -> PackingResult<Vec<u8>> {
    let mut out = Vec::new();
    for chunk in chunks {
        core.set(chunk)?;
        while let Some(bytes) = core.next() {
            out.extend_from_slice(bytes);
        }
    }
    while let Some(bytes) = core.flush()? {
        out.extend_from_slice(bytes);
    }
    Ok(out)
}

pub fn encode_whole(unpacked: &[u8]) -> Vec<u8> {
    run(&mut Packer::default(), [Bytes::copy_from_slice(unpacked)]).unwrap()
}

pub fn decode_whole(packed: &[u8]) -> PackingResult<Vec<u8>> {
    run(&mut Unpacker::default(), [Bytes::copy_from_slice(packed)])
}
