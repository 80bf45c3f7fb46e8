// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Vec2};
use thicket_quadtree::{QuadTree, Region};
use thicket_sim::{Body, Particle, SimConfig, World, resolve_collision};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

const ARENA: f64 = 1000.0;

fn gen_particles(count: usize) -> Vec<(Point, Vec2)> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        let pos = Point::new(rng.next_f64() * (ARENA - 10.0), rng.next_f64() * (ARENA - 10.0));
        let vel = Vec2::new(rng.next_f64() * 6.0 - 3.0, rng.next_f64() * 4.0 - 2.0);
        out.push((pos, vel));
    }
    out
}

fn build_world(count: usize) -> World {
    let mut world = World::new(SimConfig {
        width: ARENA,
        height: ARENA,
        ..Default::default()
    });
    for (pos, vel) in gen_particles(count) {
        world.spawn_particle_with(pos, 5.0, vel);
    }
    world
}

fn bench_world_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("world_step");
    for count in [256_usize, 1024, 4096] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(format!("quadtree/{count}"), |b| {
            b.iter_batched(
                || build_world(count),
                |mut world| {
                    world.step(1.0);
                    black_box(world);
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_naive_pairs(c: &mut Criterion) {
    let mut group = c.benchmark_group("collision_pass");
    for count in [256_usize, 1024] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(format!("naive/{count}"), |b| {
            b.iter_batched(
                || {
                    gen_particles(count)
                        .into_iter()
                        .map(|(pos, vel)| Body::Particle(Particle::new(pos, 5.0, vel)))
                        .collect::<Vec<Body>>()
                },
                |mut bodies| {
                    for i in 0..bodies.len() {
                        let (head, tail) = bodies.split_at_mut(i + 1);
                        for other in tail {
                            resolve_collision(&mut head[i], other);
                        }
                    }
                    black_box(bodies);
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_tree_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_rebuild");
    for count in [1024_usize, 4096] {
        group.throughput(Throughput::Elements(count as u64));
        let boxes: Vec<Region> = gen_particles(count)
            .into_iter()
            .map(|(pos, _)| Region::new(pos.x, pos.y, 10.0, 10.0))
            .collect();
        group.bench_function(format!("insert_overlapping/{count}"), |b| {
            let mut tree: QuadTree<u32> =
                QuadTree::new(Region::new(0.0, 0.0, ARENA, ARENA), 5, 6);
            b.iter(|| {
                tree.clear();
                for (i, bbox) in boxes.iter().enumerate() {
                    tree.insert(i as u32, *bbox);
                }
                black_box(&tree);
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_world_step,
    bench_naive_pairs,
    bench_tree_rebuild
);
criterion_main!(benches);
