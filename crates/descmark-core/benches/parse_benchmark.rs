//! Benchmarks for description parsing and serialization
//!
//! Run with: cargo bench -p descmark-core

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use descmark_core::{parse, Parser};

/// Sample description covering every construct
const SAMPLE: &str = r#"Opens the {p Project} at the given path and returns a {c Handle}.
The path is resolved {e before} any {s locking} happens.

* Fails with {m Not found.} when the path does not exist
* Reports {mp count} files that were skipped, wrapped
  onto a continuation line
* Literal braces are written {cb}like this{cbc} or {c \{}

Escapes inside a body: {c a\\b}, {c \}}, {c \\}.
Trailing   whitespace   collapses.

"#;

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    // Set throughput for bytes/sec reporting
    group.throughput(Throughput::Bytes(SAMPLE.len() as u64));

    group.bench_function("description", |b| {
        let parser = Parser::new();
        b.iter(|| {
            let doc = parser.parse(black_box(SAMPLE)).unwrap();
            black_box(doc.blocks().len())
        })
    });

    group.finish();
}

fn bench_serialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize");
    let doc = parse(SAMPLE).unwrap();

    group.bench_function("description", |b| {
        b.iter(|| black_box(&doc).to_string().len())
    });

    group.finish();
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling");

    // Test with different document sizes
    for size in [1, 5, 10, 20].iter() {
        let content: String = SAMPLE.repeat(*size);

        group.throughput(Throughput::Bytes(content.len() as u64));

        group.bench_with_input(BenchmarkId::new("parse", size), &content, |b, content| {
            b.iter(|| {
                let doc = parse(black_box(content)).unwrap();
                black_box(doc.blocks().len())
            })
        });
    }

    group.finish();
}

fn bench_inline_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("inline");

    let line = "This has {e emphasis}, {s strong}, {c code}, {p Name} and {c \\{}.";

    group.bench_function("inline", |b| {
        b.iter(|| {
            let inlines = descmark_core::inline::parse_inlines(black_box(line)).unwrap();
            black_box(inlines.len())
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_parse,
    bench_serialize,
    bench_scaling,
    bench_inline_parsing
);
criterion_main!(benches);
