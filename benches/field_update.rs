//! Benchmarks for the per-frame CPU work.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use celebrate::config::{ConfettiConfig, HeartsConfig};
use celebrate::{ConfettiField, HeartShape, Scene, SceneConfig, Spawner};

fn bench_confetti_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("confetti_update");

    for count in [500usize, 5_000, 50_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let config = ConfettiConfig {
                count,
                ..ConfettiConfig::default()
            };
            let mut spawner = Spawner::seeded(7);
            let mut field = ConfettiField::new(&config, &mut spawner);
            field.group_mut().set_visible(true);

            b.iter(|| black_box(field.update(black_box(1.0 / 60.0), &mut spawner)))
        });
    }

    group.finish();
}

fn bench_heart_shape(c: &mut Criterion) {
    let mut group = c.benchmark_group("heart_shape");

    for segments in [4usize, 12, 48] {
        group.bench_with_input(
            BenchmarkId::from_parameter(segments),
            &segments,
            |b, &segments| b.iter(|| black_box(HeartShape::new(black_box(segments)))),
        );
    }

    group.finish();
}

fn bench_scene_frame(c: &mut Criterion) {
    c.bench_function("scene_frame_running", |b| {
        let config = SceneConfig {
            seed: Some(3),
            ..SceneConfig::default()
        };
        let mut scene = Scene::new(config, 1280.0, 720.0);
        scene.trigger_reveal();

        b.iter(|| scene.update(black_box(1.0 / 60.0)))
    });

    c.bench_function("heart_cluster_new", |b| {
        let config = HeartsConfig::default();
        let mut spawner = Spawner::seeded(3);
        b.iter(|| black_box(celebrate::HeartCluster::new(&config, &mut spawner)))
    });
}

criterion_group!(benches, bench_confetti_update, bench_heart_shape, bench_scene_frame);
criterion_main!(benches);
