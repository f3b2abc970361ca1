// In benches/codec_bench.rs

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use lexisub::{Compressor, ContainerFormat, Decompressor, LexisubConfig};

// --- Mock Dictionary and Text ---

const WORDS: &[u8] = b"the\nof\nand\nto\nin\nis\nthat\nit\nwas\nfor\nhistory\npeople\ncentury\ngovernment";
const SYMBOLS: &[u8] = b"T\nO\n&\n2\nN\nI\nH\nX\nW\nF\nY1\nP1\nC1\nG1";

/// Generates prose-like text where most words hit the dictionary.
fn generate_prose(size: usize) -> Vec<u8> {
    let sentence: &[u8] = b"In the last century the government of the people was, for the most part, \
        a history of what it is to govern and to be governed. ";
    sentence.iter().copied().cycle().take(size).collect()
}

// --- Benchmark Suite ---

const BENCH_DATA_SIZE: usize = 1 << 20; // 1 MB

fn bench_codec(c: &mut Criterion) {
    let input = generate_prose(BENCH_DATA_SIZE);

    let mut group = c.benchmark_group("Substitution Codec");
    group.throughput(Throughput::Bytes(BENCH_DATA_SIZE as u64));

    for workers in [1usize, 2, 4, 8] {
        let config = Arc::new(LexisubConfig::default().with_worker_count(workers));
        let compressor = Compressor::from_lists(WORDS, SYMBOLS, config.clone()).unwrap();
        let decompressor = Decompressor::from_lists(WORDS, SYMBOLS, config).unwrap();
        let container = compressor.compress(&input).unwrap();

        group.bench_with_input(BenchmarkId::new("Encode", workers), &input, |b, input| {
            b.iter(|| black_box(compressor.compress(black_box(input))))
        });
        group.bench_with_input(
            BenchmarkId::new("Decode", workers),
            &container,
            |b, container| b.iter(|| black_box(decompressor.decompress(black_box(container)))),
        );
    }

    let config = Arc::new(
        LexisubConfig::default()
            .with_worker_count(4)
            .with_format(ContainerFormat::SpaceRun),
    );
    let compressor = Compressor::from_lists(WORDS, SYMBOLS, config).unwrap();
    group.bench_function("Encode SpaceRun (4 workers)", |b| {
        b.iter(|| black_box(compressor.compress(black_box(&input))))
    });

    group.finish();
}

criterion_group!(benches, bench_codec);
criterion_main!(benches);
