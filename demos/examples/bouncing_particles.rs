// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bouncing particles, headless.
//!
//! Spawn a swarm of particles, run the frame loop for a while, and report
//! contact counts per frame. This is the drive order a renderer would use,
//! minus the drawing.
//!
//! Run:
//! - `cargo run -p thicket_examples --example bouncing_particles`

use kurbo::Point;
use thicket_sim::{SimConfig, World};

struct Rng(u64);

impl Rng {
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

fn main() {
    let config = SimConfig {
        width: 600.0,
        height: 600.0,
        ..Default::default()
    };
    let mut world = World::new(config);

    let mut rng = Rng(0x5EED_5EED_5EED_5EED);
    for _ in 0..1000 {
        let pos = Point::new(rng.next_f64() * 590.0, rng.next_f64() * 590.0);
        world.spawn_particle(pos);
    }

    for frame in 0..240_u32 {
        world.step(1.0);
        if frame % 60 == 0 {
            let contacts = world.bodies().filter(|(_, b)| b.is_colliding()).count();
            println!("frame {frame:>3}: {contacts} bodies in contact");
        }
    }

    // The point query a click handler would run.
    let hits = world.query_point(300.0, 300.0).count();
    println!("{hits} bodies share the leaf at (300, 300)");
}
