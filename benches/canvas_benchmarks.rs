//! Performance benchmarks for the drawing path
//!
//! Every app draw call takes the drawing mutex and every repaint walks the
//! whole mirror, so these are the two paths worth keeping an eye on.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use guibench::{app, Bench, Color, Pen, PixelMirror};

/// Benchmark single draw calls through the shared bench handle
fn bench_draw_point(c: &mut Criterion) {
    let bench = Bench::headless(192, 192);

    c.bench_function("draw_point", |b| {
        let mut i = 0i32;
        b.iter(|| {
            let x = i % 192;
            let y = (i / 192) % 192;
            bench.draw_point(black_box(x), black_box(y), Pen::Draw).unwrap();
            i = i.wrapping_add(1);
        })
    });
}

/// Benchmark the built-in cross app at a few window sizes
fn bench_cross_app(c: &mut Criterion) {
    let mut group = c.benchmark_group("cross_app");

    for side in [64u32, 192, 512] {
        group.bench_with_input(BenchmarkId::from_parameter(side), &side, |b, &side| {
            let bench = Bench::headless(side, side);
            let mut cross = app::Cross;
            b.iter(|| app::App::run(&mut cross, &bench).unwrap())
        });
    }

    group.finish();
}

/// Benchmark painting an RGBA frame from the mirror
fn bench_render_rgba(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_rgba");

    for side in [192u32, 512] {
        let mut mirror = PixelMirror::new(side, side);
        for i in 0..side as i32 {
            mirror.set(i, i, Pen::Draw).unwrap();
        }
        let mut frame = vec![0u8; (side * side * 4) as usize];

        group.bench_with_input(BenchmarkId::from_parameter(side), &side, |b, _| {
            b.iter(|| mirror.render_rgba(black_box(&mut frame), Color::BLACK, Color::WHITE))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_draw_point, bench_cross_app, bench_render_rgba);
criterion_main!(benches);
