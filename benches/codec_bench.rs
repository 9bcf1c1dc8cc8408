//! Benchmarks for erlterm encode/decode throughput

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use erlterm::{decode, encode, Compression, Term};

/// A representative message-shaped term: tagged tuples in a list
fn sample_term() -> Term {
    Term::tuple(vec![
        Term::atom("batch"),
        Term::list(
            (0..100)
                .map(|i| {
                    Term::tuple(vec![
                        Term::atom("item"),
                        Term::from(i as i64),
                        Term::Float(i as f64 * 0.5),
                        Term::binary(vec![i as u8; 32]),
                    ])
                })
                .collect::<Vec<_>>(),
        ),
    ])
}

fn codec_benchmarks(c: &mut Criterion) {
    let term = sample_term();
    let encoded = encode(&term, Compression::Off).unwrap();
    let compressed = encode(&term, Compression::from(true)).unwrap();

    c.bench_function("encode_message", |b| {
        b.iter(|| encode(black_box(&term), Compression::Off).unwrap())
    });

    c.bench_function("encode_message_compressed", |b| {
        b.iter(|| encode(black_box(&term), Compression::from(true)).unwrap())
    });

    c.bench_function("decode_message", |b| {
        b.iter(|| decode(black_box(&encoded)).unwrap())
    });

    c.bench_function("decode_message_compressed", |b| {
        b.iter(|| decode(black_box(&compressed)).unwrap())
    });
}

criterion_group!(benches, codec_benchmarks);
criterion_main!(benches);
