//! Measures `RobotController::update()` cost on a steady-state, never-
//! terminating three-layer chain (`WinLayer -> RatStrategy ->
//! RecordingSink`), at both `debug_multiplier: 1` and the scheduler's own
//! default of 4, since that knob folds repeated `process()` calls per hot
//! layer per tick and is the one most likely to matter for throughput.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use helm_bench::drive_chain_controller;

fn bench_multiplier_one(c: &mut Criterion) {
    let mut controller = drive_chain_controller(1);
    c.bench_function("tick_throughput/update_debug_multiplier_1", |b| {
        b.iter(|| {
            black_box(controller.update().unwrap());
        })
    });
}

fn bench_default_multiplier(c: &mut Criterion) {
    let mut controller = drive_chain_controller(4);
    c.bench_function("tick_throughput/update_debug_multiplier_4", |b| {
        b.iter(|| {
            black_box(controller.update().unwrap());
        })
    });
}

criterion_group!(benches, bench_multiplier_one, bench_default_multiplier);
criterion_main!(benches);
