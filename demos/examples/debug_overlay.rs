// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Debug overlay traversal.
//!
//! Shows the surface a renderer uses: toggle cell outlines on, step once,
//! then walk the tree for cells and occupants.
//!
//! Run:
//! - `cargo run -p thicket_examples --example debug_overlay`

use kurbo::{Point, Vec2};
use thicket_sim::{SimConfig, World};

fn main() {
    let mut world = World::new(SimConfig {
        width: 200.0,
        height: 200.0,
        max_depth: 3,
        max_leaf_occupants: 1,
        ..Default::default()
    });
    world.set_debug_outlines(true);

    world.spawn_particle_with(Point::new(10.0, 10.0), 5.0, Vec2::new(1.0, 1.0));
    world.spawn_particle_with(Point::new(30.0, 24.0), 5.0, Vec2::new(-1.0, 2.0));
    world.spawn_particle_with(Point::new(160.0, 40.0), 5.0, Vec2::new(2.0, -1.0));
    world.step(1.0);

    println!("outlines to draw:");
    for rect in world.outlines() {
        println!("  {rect:?}");
    }

    println!("leaf occupancy:");
    for view in world.tree().iter() {
        if view.is_leaf() && view.occupants().count() > 0 {
            let ids: Vec<_> = view.occupants().collect();
            println!("  depth {} cell {:?}: {ids:?}", view.depth(), view.region());
        }
    }
}
