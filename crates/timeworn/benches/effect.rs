mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use timeworn::prelude::*;

const SPOT_COUNTS: [usize; 3] = [50, 200, 1000];

fn effect_benches(c: &mut Criterion) {
    let shape = common::frame_shape(400.0);

    for (label, mode) in [
        ("organic", ShapeMode::Organic),
        ("angular", ShapeMode::Angular),
    ] {
        let mut group = c.benchmark_group(format!("effect/run/{label}"));
        for &count in &SPOT_COUNTS {
            let config = EffectConfig::new(count)
                .with_shape_mode(mode)
                .with_clustering(0.4, 5);
            let runner = EffectRunner::try_new(config).expect("valid config");
            group.throughput(common::elements_throughput(count));
            let mut rng = StdRng::seed_from_u64(0x5EED ^ count as u64);
            group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
                b.iter(|| {
                    let result = runner.run(&shape, None, &mut rng).expect("frame is usable");
                    black_box(result.placed());
                });
            });
        }
        group.finish();
    }
}

fn sharded_benches(c: &mut Criterion) {
    let shape = common::wobbly_shape(Vec2::ZERO, 300.0, 48);
    let config = EffectConfig::new(4000).with_clustering(0.3, 8);
    let mut group = c.benchmark_group("effect/sharded");
    group.throughput(common::elements_throughput(config.spot_count));

    for shards in [1_usize, 2, 4, 8] {
        group.bench_with_input(BenchmarkId::from_parameter(shards), &shards, |b, &s| {
            b.iter(|| {
                let result = run_sharded(&shape, None, &config, 0xFACE, s).expect("usable shape");
                black_box(result.placed());
            });
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = effect_benches, sharded_benches
}
criterion_main!(benches);
