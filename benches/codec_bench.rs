// In padat-core/benches/codec_bench.rs

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use padat_codec::{decode, encode_with_config, PadatConfig, Quality};

// --- Mock Data Generation ---

/// Generates a vector of highly compressible data.
fn generate_low_entropy_bytes(size: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let pattern = b"abcdefgABCDEFG12345";
    while data.len() < size {
        data.extend_from_slice(pattern);
    }
    data.truncate(size);
    data
}

/// Generates a vector of less compressible, more random-looking data.
fn generate_high_entropy_bytes(size: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let mut state = 0x9E37_79B9u32;
    while data.len() < size {
        state = state.wrapping_mul(747_796_405).wrapping_add(2_891_336_453);
        data.push((state >> 24) as u8);
    }
    data
}

// --- Benchmark Suite ---

const BENCH_DATA_SIZE: usize = 65536; // 64 KB

fn bench_codec(c: &mut Criterion) {
    // --- Setup Data ---
    let low_entropy_data = generate_low_entropy_bytes(BENCH_DATA_SIZE);
    let high_entropy_data = generate_high_entropy_bytes(BENCH_DATA_SIZE);

    let fast = PadatConfig {
        quality: Quality::new(2),
        ..Default::default()
    };
    let balanced = PadatConfig {
        quality: Quality::new(6),
        ..Default::default()
    };
    let best = PadatConfig::default(); // quality 11

    // Prepare encoded data once so decode benchmarks measure decode alone.
    let encoded_low = encode_with_config(&low_entropy_data, &balanced).unwrap();
    let encoded_high = encode_with_config(&high_entropy_data, &balanced).unwrap();

    let mut group = c.benchmark_group("Codec Quality Comparison");
    group.throughput(criterion::Throughput::Bytes(BENCH_DATA_SIZE as u64));

    // --- Encoding Benchmarks (Low Entropy) ---
    group.bench_function("Encode q2 (Low Entropy)", |b| {
        b.iter(|| black_box(encode_with_config(black_box(&low_entropy_data), &fast)))
    });
    group.bench_function("Encode q6 (Low Entropy)", |b| {
        b.iter(|| black_box(encode_with_config(black_box(&low_entropy_data), &balanced)))
    });
    group.bench_function("Encode q11 (Low Entropy)", |b| {
        b.iter(|| black_box(encode_with_config(black_box(&low_entropy_data), &best)))
    });

    // --- Encoding Benchmarks (High Entropy) ---
    group.bench_function("Encode q2 (High Entropy)", |b| {
        b.iter(|| black_box(encode_with_config(black_box(&high_entropy_data), &fast)))
    });
    group.bench_function("Encode q6 (High Entropy)", |b| {
        b.iter(|| black_box(encode_with_config(black_box(&high_entropy_data), &balanced)))
    });

    // --- Decoding Benchmarks ---
    group.bench_function("Decode (Low Entropy)", |b| {
        b.iter(|| black_box(decode(black_box(&encoded_low))))
    });
    group.bench_function("Decode (High Entropy)", |b| {
        b.iter(|| black_box(decode(black_box(&encoded_high))))
    });

    group.finish();
}

// These two lines generate the main function and register the benchmark group.
criterion_group!(benches, bench_codec);
criterion_main!(benches);
