//! Benchmark suite for packing and unpacking.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng as _, SeedableRng};
use wordpack::{Bytes, FinishUnpacker, Packer, Transform, Unpacker, UnpackingTarget, WORD_BYTES};

const SIZES: &[usize; 2] = &[1024, 16384];
const SEED: u64 = 456;
const CHUNK_BYTES: usize = 4096;

type DataGeneratorFn = fn(usize) -> Vec<u8>;

/// Words with every byte non-zero: one long verbatim range after another
fn generate_dense_data(words: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(SEED);
    (0..words * WORD_BYTES).map(|_| rng.random_range(1..=255)).collect()
}

/// Mostly zero words with an occasional small value, like sparse struct data
fn generate_sparse_data(words: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(SEED);
    (0..words * WORD_BYTES)
        .map(|_| if rng.random_ratio(1, 16) { rng.random() } else { 0 })
        .collect()
}

/// Small integers in the low bytes of each word, so every word gets a tag
fn generate_tagged_data(words: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(SEED);
    (0..words * WORD_BYTES)
        .map(|i| if i % WORD_BYTES < 3 { rng.random() } else { 0 })
        .collect()
}

/// Alternating zero runs and verbatim runs of random length
fn generate_clustered_data(words: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(SEED);
    let mut data = Vec::with_capacity(words * WORD_BYTES);
    let mut zero = false;
    while data.len() < words * WORD_BYTES {
        let run = rng.random_range(1..64) * WORD_BYTES;
        let run = run.min(words * WORD_BYTES - data.len());
        if zero {
            data.resize(data.len() + run, 0);
        } else {
            data.extend((0..run).map(|_| rng.random_range(1..=255u8)));
        }
        zero = !zero;
    }
    data
}

const PATTERNS: &[(&str, DataGeneratorFn)] = &[
    ("dense", generate_dense_data),
    ("sparse", generate_sparse_data),
    ("tagged", generate_tagged_data),
    ("clustered", generate_clustered_data),
];

fn chunks(data: &[u8]) -> Vec<Bytes> {
    data.chunks(CHUNK_BYTES).map(Bytes::copy_from_slice).collect()
}

/// Runs `core` over `chunks`, returning the number of bytes produced.
fn run<T: Transform>(core: &mut T, chunks: &[Bytes]) -> usize {
    let mut produced = 0;
    for chunk in chunks {
        core.set(chunk.clone()).unwrap();
        while let Some(bytes) = core.next() {
            produced += black_box(bytes).len();
        }
    }
    while let Some(bytes) = core.flush().unwrap() {
        produced += black_box(bytes).len();
    }
    produced
}

fn prepare_packed_data(data: &[u8]) -> Vec<u8> {
    wordpack::pack(data).unwrap()
}

fn benchmark_packing(c: &mut Criterion) {
    let mut group = c.benchmark_group("packing");

    for &size in SIZES {
        for (name, generator) in PATTERNS {
            let data = chunks(&generator(size));
            group.throughput(Throughput::Bytes((size * WORD_BYTES) as u64));
            group.bench_with_input(BenchmarkId::new(*name, size), &data, |b, data| {
                let mut packer = Packer::default();
                b.iter(|| black_box(run(&mut packer, black_box(data))));
            });
        }
    }

    group.finish();
}

fn benchmark_unpacking(c: &mut Criterion) {
    let mut group = c.benchmark_group("unpacking");

    for &size in SIZES {
        for (name, generator) in PATTERNS {
            let packed = chunks(&prepare_packed_data(&generator(size)));
            group.throughput(Throughput::Bytes((size * WORD_BYTES) as u64));
            group.bench_with_input(BenchmarkId::new(*name, size), &packed, |b, packed| {
                let mut unpacker = Unpacker::default();
                b.iter(|| black_box(run(&mut unpacker, black_box(packed))));
            });
        }
    }

    group.finish();
}

fn benchmark_finish_unpacking(c: &mut Criterion) {
    let mut group = c.benchmark_group("finish_unpacking");

    for &size in SIZES {
        for (name, generator) in PATTERNS {
            let packed = prepare_packed_data(&generator(size));
            group.throughput(Throughput::Bytes((size * WORD_BYTES) as u64));
            group.bench_with_input(BenchmarkId::new(*name, size), &packed, |b, packed| {
                b.iter(|| {
                    let target = UnpackingTarget::new(size * WORD_BYTES).unwrap();
                    let mut unpacker = FinishUnpacker::new(target);
                    unpacker.set(black_box(packed)).unwrap();
                    black_box(unpacker.finish().unwrap())
                });
            });
        }
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_packing,
    benchmark_unpacking,
    benchmark_finish_unpacking
);
criterion_main!(benches);
