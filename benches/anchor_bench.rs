//! Benchmarks for the anchor coupling pass.
//!
//! Run with: `cargo bench --bench anchor_bench`
//!
//! Each world holds `n` bodies, each bound to the first node of its own rod,
//! with every rod predicting a small drift away from its anchor.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rod_anchor::{
    AnchorConfig, CorrectionMode, PhysicsWorld, RigidBody, RodHandle, RodModel, RodNodeIndex,
    RodSegmentIndex, SimulationConfig, Vector3,
};

fn anchored_world(n: usize, mode: CorrectionMode) -> (PhysicsWorld, Vec<RodHandle>) {
    let config = SimulationConfig::default().with_anchor(AnchorConfig::new().with_mode(mode));
    let mut world = PhysicsWorld::with_config(config);
    let mut rods = Vec::with_capacity(n);

    for i in 0..n {
        let origin = Vector3::new(i as f32 * 2.0, 0.0, 0.0);
        let body = world.add_body(RigidBody::new_dynamic(1.0, origin));
        let rod = world.add_rod(
            RodModel::new_straight(origin, origin + Vector3::new(0.0, 0.0, 1.0), 8, 0.8).unwrap(),
        );
        world
            .bind_anchor(body, rod, RodNodeIndex(0), RodSegmentIndex(0), origin)
            .unwrap();
        rods.push(rod);
    }

    (world, rods)
}

fn drift_rods(world: &mut PhysicsWorld, rods: &[RodHandle]) {
    world.clear_rod_forces();
    for &rod in rods {
        let node = world.get_rod_mut(rod).unwrap().node_mut(RodNodeIndex(0)).unwrap();
        node.predicted_position = node.position + Vector3::new(0.01, 0.0, 0.0);
        node.predicted_velocity = Vector3::new(1.0, 0.0, 0.0);
    }
}

fn bench_solve_anchors(c: &mut Criterion) {
    for (name, mode) in [("solve_position", CorrectionMode::Position), ("solve_velocity", CorrectionMode::Velocity)] {
        let mut group = c.benchmark_group(name);

        for &n in &[1usize, 16, 256] {
            group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
                let (mut world, rods) = anchored_world(n, mode);
                b.iter(|| {
                    drift_rods(&mut world, &rods);
                    black_box(world.step(black_box(0.001)).unwrap());
                });
            });
        }

        group.finish();
    }
}

criterion_group!(benches, bench_solve_anchors);
criterion_main!(benches);
