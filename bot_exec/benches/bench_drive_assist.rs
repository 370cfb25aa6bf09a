//! # Drive Assist Benchmark
//!
//! The compute must fit comfortably inside the 20 ms cycle, this benchmark
//! keeps an eye on the hot path.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use bot_lib::drive_assist::{DriveAssist, InputData};
use util::module::State;

fn drive_assist_benchmark(c: &mut Criterion) {
    let mut da = DriveAssist::default();

    let straight = InputData {
        forward_axis: 0.6,
        rotation_axis: 0.01,
        quick_turn: false,
        heading_deg: 12.5,
    };

    let turning = InputData {
        forward_axis: 0.6,
        rotation_axis: 0.5,
        quick_turn: false,
        heading_deg: 12.5,
    };

    c.bench_function("drive_assist straight hold", |b| {
        b.iter(|| da.proc(black_box(&straight)).unwrap())
    });

    c.bench_function("drive_assist manual", |b| {
        b.iter(|| da.proc(black_box(&turning)).unwrap())
    });
}

criterion_group!(benches, drive_assist_benchmark);
criterion_main!(benches);
