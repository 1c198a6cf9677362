//! Benchmarks for the per-frame viewer logic.

use astroview::options::{Options, StarOptions};
use astroview::scene::StarField;
use astroview::util::easing::EasingFunction;
use astroview::{ViewerCommand, ViewerState};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use web_time::{Duration, Instant};

fn easing_benchmark(c: &mut Criterion) {
    let f = EasingFunction::QuadraticOut;
    c.bench_function("quadratic_out_easing", |b| {
        b.iter(|| black_box(f.evaluate(black_box(0.5))))
    });
}

fn star_field_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("star_field");

    for count in [1_000, 10_000, 100_000] {
        let options = StarOptions {
            count,
            ..StarOptions::default()
        };
        group.bench_function(format!("generate_{count}"), |b| {
            b.iter(|| {
                let mut rng = StdRng::seed_from_u64(42);
                black_box(StarField::new(&options, &mut rng))
            })
        });
    }

    let mut stars =
        StarField::new(&StarOptions::default(), &mut StdRng::seed_from_u64(1));
    group.bench_function("advance", |b| {
        b.iter(|| {
            stars.advance();
            black_box(stars.matrix())
        })
    });
    group.finish();
}

fn viewer_update_benchmark(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let mut state = ViewerState::new(&Options::default(), (1280, 720), &mut rng);
    state.attach_model();

    let start = Instant::now();
    let _ = state.set_view("back", start);
    let mut frame = 0_u64;

    c.bench_function("viewer_update_with_tween", |b| {
        b.iter(|| {
            frame += 1;
            let _ = state.execute(
                ViewerCommand::OrbitCamera {
                    delta: Vec2::new(1.0, 0.5),
                },
                start,
            );
            state.update(start + Duration::from_millis(frame % 1000));
            black_box(state.model().copied())
        })
    });
}

criterion_group!(
    benches,
    easing_benchmark,
    star_field_benchmark,
    viewer_update_benchmark
);
criterion_main!(benches);
