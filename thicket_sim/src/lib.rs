// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thicket Sim: elastic particle collisions broad-phased by a per-frame
//! quadtree.
//!
//! The [`World`] owns the authoritative body collection (static rectangular
//! obstacles and dynamic circular particles) and a
//! [`thicket_quadtree::QuadTree`] of [`BodyId`] handles. Each
//! [`World::step`] performs one frame in strict order: clear the index,
//! advance every body by the frame-relative `dt` and clamp it to the arena,
//! re-insert every body into each leaf its bounding box touches, then run
//! the same-leaf collision pass.
//!
//! Collision resolution is the standard equal-and-opposite 2D elastic
//! impulse with unit restitution and mass equal to radius. Each particle
//! carries a transient colliding flag, cleared at the start of its update;
//! the flag both marks contact for the current frame (a renderer can tint
//! flagged bodies) and suppresses re-resolution of a pair that the leaf
//! enumeration visits more than once. A body that collided earlier in a
//! frame skips later simultaneous collisions, a deliberate simplification
//! carried over from the reference behavior.
//!
//! Bodies are addressed by generational [`BodyId`] handles, so removal makes
//! outstanding ids stale rather than dangling. There is no I/O, no clock,
//! and no rendering here: drivers supply `dt`, inject bodies, and walk
//! [`World::tree`] / [`World::outlines`] to draw.
//!
//! # Example
//!
//! ```rust
//! use kurbo::{Point, Vec2};
//! use thicket_sim::{SimConfig, World};
//!
//! let mut world = World::new(SimConfig {
//!     width: 400.0,
//!     height: 400.0,
//!     ..Default::default()
//! });
//!
//! let a = world.spawn_particle_with(Point::new(50.0, 100.0), 5.0, Vec2::new(2.0, 0.0));
//! let b = world.spawn_particle_with(Point::new(62.0, 100.0), 5.0, Vec2::new(-2.0, 0.0));
//!
//! // One tick at the nominal frame rate.
//! world.step(1.0);
//!
//! assert!(world.body(a).unwrap().is_colliding());
//! assert!(world.body(b).unwrap().is_colliding());
//! ```

pub use body::{Body, BodyFlags, Particle, resolve_collision};
pub use thicket_quadtree::{NodeView, QuadTree, Region};
pub use world::{BodyId, SimConfig, World};

mod body;
mod util;
mod world;
