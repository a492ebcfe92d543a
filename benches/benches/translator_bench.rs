//! # Translator Benchmarks
//!
//! Measures VMASM translation: comment stripping, label scanning, tokenizing.
//!
//! Run: `cargo bench --bench translator_bench`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use vitals_core::{Program, translate};

const HYPOXIA: &str = include_str!("../../demos/hypoxia.vmasm");

/// Programa sintético com `n` blocos rotulados
fn synthetic_source(blocks: usize) -> String {
    let mut source = String::new();
    for i in 0..blocks {
        source.push_str(&format!("; bloco {}\n", i));
        source.push_str(&format!("b{}: SET O2 {}   # dose\n", i, i % 100));
        source.push_str("INC IV\n");
        source.push_str(&format!("CJMP S_SPO2 LT 90 b{}\n", i));
        source.push_str("PRINT S_BPM\n");
    }
    source.push_str("HALT\n");
    source
}

fn bench_translate_demo(c: &mut Criterion) {
    c.bench_function("translate_hypoxia", |b| {
        b.iter(|| black_box(Program::from_source(black_box(HYPOXIA)).unwrap()))
    });
}

fn bench_translate_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("translate_scaling");

    for blocks in [10, 100, 1_000] {
        let source = synthetic_source(blocks);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(blocks), &source, |b, source| {
            b.iter(|| black_box(translate(source.lines()).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_translate_demo, bench_translate_scaling);
criterion_main!(benches);
