//! Benchmarks for indicator classification.
//!
//! Classification runs on every context-menu click, so it should stay well
//! under a millisecond even for the rules evaluated last.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ioc_lookup::classifier::classify;

/// One representative input per rule, plus a miss that falls through all of them.
fn samples() -> Vec<(&'static str, String)> {
    vec![
        ("ipv4", "203.0.113.254".to_string()),
        ("ipv6", "2001:0db8:85a3:0000:0000:8a2e:0370:7334".to_string()),
        ("hash", "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855".to_string()),
        ("url", "https://malicious.example/path/to/payload.exe?id=42".to_string()),
        ("domain", "cdn.update-service.example.co.uk".to_string()),
        ("unknown", "this is just a sentence someone highlighted".to_string()),
    ]
}

/// Benchmark each rule's representative input.
fn bench_classify_by_rule(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    for (name, input) in samples() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &input, |b, input| {
            b.iter(|| classify(black_box(input)))
        });
    }

    group.finish();
}

/// Benchmark a long non-matching selection (a pasted paragraph).
fn bench_classify_long_text(c: &mut Criterion) {
    let paragraph = "Observed beaconing to several hosts during the incident window. ".repeat(64);

    c.bench_function("classify_long_text_4k", |b| {
        b.iter(|| classify(black_box(&paragraph)))
    });
}

criterion_group!(benches, bench_classify_by_rule, bench_classify_long_text);
criterion_main!(benches);
