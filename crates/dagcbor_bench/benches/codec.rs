//! Codec benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dagcbor_bench::{mixed_list, nested_map, simple_map};
use dagcbor_codec::{decode, encode, Encoder, Value};

/// Benchmark encoding simple values.
fn bench_encode_simple(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    group.bench_function("null", |b| {
        let value = Value::Null;
        b.iter(|| {
            let result = encode(black_box(&value)).unwrap();
            black_box(result);
        });
    });

    group.bench_function("integer", |b| {
        let value = Value::Integer(42);
        b.iter(|| {
            let result = encode(black_box(&value)).unwrap();
            black_box(result);
        });
    });

    group.bench_function("float", |b| {
        let value = Value::Float(1.5);
        b.iter(|| {
            let result = encode(black_box(&value)).unwrap();
            black_box(result);
        });
    });

    group.bench_function("text_short", |b| {
        let value = Value::Text("hello".into());
        b.iter(|| {
            let result = encode(black_box(&value)).unwrap();
            black_box(result);
        });
    });

    group.bench_function("map_simple", |b| {
        let value = simple_map();
        b.iter(|| {
            let result = encode(black_box(&value)).unwrap();
            black_box(result);
        });
    });

    group.finish();
}

/// Benchmark encoding with varying payload sizes.
fn bench_encode_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_size");

    for size in [64, 256, 1024, 4096, 16384].iter() {
        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let value = Value::Bytes(vec![0u8; size]);
            b.iter(|| {
                let result = encode(black_box(&value)).unwrap();
                black_box(result);
            });
        });
    }

    group.finish();
}

/// Benchmark decoding.
fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    group.bench_function("map_simple", |b| {
        let encoded = encode(&simple_map()).unwrap();
        b.iter(|| {
            let result = decode(black_box(&encoded)).unwrap();
            black_box(result);
        });
    });

    group.bench_function("mixed_list_64", |b| {
        let encoded = encode(&mixed_list(64)).unwrap();
        b.iter(|| {
            let result = decode(black_box(&encoded)).unwrap();
            black_box(result);
        });
    });

    for size in [256, 1024, 4096].iter() {
        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::new("bytes", size), size, |b, &size| {
            let encoded = encode(&Value::Bytes(vec![0u8; size])).unwrap();
            b.iter(|| {
                let result = decode(black_box(&encoded)).unwrap();
                black_box(result);
            });
        });
    }

    group.finish();
}

/// Benchmark roundtrips through both halves of the codec.
fn bench_roundtrip(c: &mut Criterion) {
    let mut group = c.benchmark_group("roundtrip");

    group.bench_function("simple_map", |b| {
        let value = simple_map();
        b.iter(|| {
            let encoded = encode(black_box(&value)).unwrap();
            let decoded = decode(&encoded).unwrap();
            black_box(decoded);
        });
    });

    group.bench_function("nested_depth3_width5", |b| {
        let value = nested_map(3, 5);
        b.iter(|| {
            let encoded = encode(black_box(&value)).unwrap();
            let decoded = decode(&encoded).unwrap();
            black_box(decoded);
        });
    });

    group.finish();
}

/// Benchmark feeding one encoder many values.
fn bench_encoder_reuse(c: &mut Criterion) {
    c.bench_function("encoder_reuse_100", |b| {
        let values: Vec<_> = (0..100).map(Value::Integer).collect();

        b.iter(|| {
            let mut sink = Vec::new();
            let mut encoder = Encoder::new(&mut sink);
            for value in &values {
                encoder.encode(black_box(value)).unwrap();
            }
            drop(encoder);
            black_box(sink);
        });
    });
}

criterion_group!(
    benches,
    bench_encode_simple,
    bench_encode_size,
    bench_decode,
    bench_roundtrip,
    bench_encoder_reuse,
);

criterion_main!(benches);
