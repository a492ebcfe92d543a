//! # Machine Benchmarks
//!
//! Measures the fetch-decode-execute loop with the physiology tick.
//!
//! Run: `cargo bench --bench machine_bench`

use std::io;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use vitals_core::{Machine, MachineConfig, Program};

fn countdown(n: u64) -> String {
    format!("SET O2 {}\nloop: DECJZ O2 done\nGOTO loop\ndone: HALT\n", n)
}

/// IV alto derruba o BPM até o piso de 40
const POLLING: &str = "\
SET IV 200
wait: CJMP S_BPM GT 40 wait
GET S_BPM O2
HALT
";

fn bench_countdown(c: &mut Criterion) {
    let mut group = c.benchmark_group("countdown");

    for n in [100u64, 1_000, 10_000] {
        let program = Program::from_source(&countdown(n)).unwrap();
        group.throughput(Throughput::Elements(2 * n));
        group.bench_with_input(BenchmarkId::from_parameter(n), &program, |b, program| {
            b.iter(|| {
                let mut machine = Machine::new(program, MachineConfig::default());
                black_box(machine.run(&mut io::sink()).unwrap())
            })
        });
    }

    group.finish();
}

fn bench_cjmp_polling(c: &mut Criterion) {
    let program = Program::from_source(POLLING).unwrap();

    c.bench_function("cjmp_polling", |b| {
        b.iter(|| {
            let mut machine = Machine::new(&program, MachineConfig::default());
            black_box(machine.run(&mut io::sink()).unwrap())
        })
    });
}

fn bench_step_limit(c: &mut Criterion) {
    let program = Program::from_source("loop: GOTO loop").unwrap();
    let config = MachineConfig::default().with_step_limit(10_000);

    c.bench_function("self_loop_to_limit", |b| {
        b.iter(|| {
            let mut machine = Machine::new(&program, config);
            black_box(machine.run(&mut io::sink()).unwrap_err())
        })
    });
}

criterion_group!(benches, bench_countdown, bench_cjmp_polling, bench_step_limit);
criterion_main!(benches);
