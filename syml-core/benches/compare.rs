//! Cross-parser comparison benchmarks.
//!
//! Compares SYML against serde_yaml on the same generated input. Both
//! build a full in-memory tree, so the numbers measure parse plus tree
//! construction.
//!
//! Run with: cargo bench --bench compare

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use syml_core::Document;

mod support;

fn parse_syml(input: &str) -> usize {
    let doc = Document::parse(input).unwrap();
    doc.root().key("objects").unwrap().len().unwrap()
}

fn parse_serde_yaml(input: &str) -> usize {
    let value: serde_yaml::Value = serde_yaml::from_str(input).unwrap();
    value["objects"].as_sequence().map_or(0, |s| s.len())
}

fn bench_parser_comparison(c: &mut Criterion) {
    for objects in [50, 500] {
        let input = support::numeric_document(objects, 11);

        // Both parsers must agree on the document shape
        assert_eq!(parse_syml(&input), objects);
        assert_eq!(parse_serde_yaml(&input), objects);

        let mut group = c.benchmark_group(format!("compare_{objects}obj"));
        group.throughput(Throughput::Bytes(input.len() as u64));

        group.bench_with_input(BenchmarkId::new("syml", ""), &input, |b, doc| {
            b.iter(|| parse_syml(black_box(doc)))
        });
        group.bench_with_input(BenchmarkId::new("serde_yaml", ""), &input, |b, doc| {
            b.iter(|| parse_serde_yaml(black_box(doc)))
        });

        group.finish();
    }
}

criterion_group!(benches, bench_parser_comparison);
criterion_main!(benches);
