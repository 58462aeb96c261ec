//! Encoder throughput on small, word-heavy and unicode-heavy inputs.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use punct_encode::{Config, encode};

fn sample_source(lines: usize) -> String {
    let mut source = String::new();
    for i in 0..lines {
        source.push_str(&format!(
            "function handler{i}(event) {{ if (event.type === 'click') {{ console.log(event, {i}); }} }}\n"
        ));
    }
    source
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    let config = Config::default();
    for lines in [1, 50, 500] {
        let source = sample_source(lines);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::new("js", lines), &source, |b, source| {
            b.iter(|| encode(black_box(source), &config).unwrap())
        });
    }

    let unicode = "héllo wörld 😀 日本語のテキスト ".repeat(100);
    group.throughput(Throughput::Bytes(unicode.len() as u64));
    group.bench_function("unicode", |b| {
        b.iter(|| encode(black_box(&unicode), &config).unwrap())
    });
    group.finish();
}

fn bench_quote_modes(c: &mut Criterion) {
    let source = sample_source(50);
    let mut group = c.benchmark_group("quote_style");
    for style in ["only single", "cycle single double backtick", "smart single double backtick"] {
        let config = Config {
            quote_style: style.parse().unwrap(),
            ..Config::default()
        };
        group.bench_with_input(BenchmarkId::from_parameter(style), &config, |b, config| {
            b.iter(|| encode(black_box(&source), config).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_quote_modes);
criterion_main!(benches);
