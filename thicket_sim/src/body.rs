// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Body variants and the particle physics model.

use bitflags::bitflags;
use kurbo::{Point, Rect, Vec2};

bitflags! {
    /// Transient per-frame body state.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct BodyFlags: u8 {
        /// A collision was detected for this body in the current frame.
        /// Cleared at the start of every [`Particle::update`].
        const COLLIDING = 0b0000_0001;
    }
}

impl Default for BodyFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// A dynamic circular body.
///
/// The position is the top-left corner of the bounding box; the center is
/// always derived as `position + (radius, radius)` and never stored, so it
/// can never drift out of sync after a position mutation. Mass equals the
/// radius by construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Top-left corner of the bounding box.
    pub pos: Point,
    /// Circle radius. Also the particle's mass.
    pub radius: f64,
    /// Velocity in arena units per frame tick.
    pub vel: Vec2,
    /// Transient state flags.
    pub flags: BodyFlags,
}

impl Particle {
    /// Create a particle at `pos` (top-left of its bounding box).
    pub fn new(pos: Point, radius: f64, vel: Vec2) -> Self {
        Self {
            pos,
            radius,
            vel,
            flags: BodyFlags::empty(),
        }
    }

    /// Circle center, derived from position and radius.
    pub fn center(&self) -> Point {
        self.pos + Vec2::new(self.radius, self.radius)
    }

    /// Mass equals radius by construction.
    pub fn mass(&self) -> f64 {
        self.radius
    }

    /// Axis-aligned bounding box.
    pub fn bounding_box(&self) -> Rect {
        let d = 2.0 * self.radius;
        Rect::new(self.pos.x, self.pos.y, self.pos.x + d, self.pos.y + d)
    }

    /// Whether a collision was detected this frame.
    pub fn is_colliding(&self) -> bool {
        self.flags.contains(BodyFlags::COLLIDING)
    }

    /// Advance one tick: reset the colliding flag, then move by velocity
    /// scaled by `dt` (a frame-relative multiplier, not wall-clock seconds).
    pub fn update(&mut self, dt: f64) {
        self.flags.remove(BodyFlags::COLLIDING);
        self.pos += self.vel * dt;
    }

    /// Reflect off the arena edges, per axis independently.
    ///
    /// A center that crossed an edge is clamped back to exactly one radius
    /// from it and the velocity component is forced to point inward. This is
    /// a hard position clamp, not a penetration-depth bounce; it prevents
    /// tunneling at the cost of exact energy conservation at the clamp
    /// instant.
    pub fn apply_bounds(&mut self, max_width: f64, max_height: f64) {
        let d = 2.0 * self.radius;
        if self.pos.x < 0.0 {
            self.pos.x = 0.0;
            self.vel.x = self.vel.x.abs();
        } else if self.pos.x + d > max_width {
            self.pos.x = max_width - d;
            self.vel.x = -self.vel.x.abs();
        }
        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
            self.vel.y = self.vel.y.abs();
        } else if self.pos.y + d > max_height {
            self.pos.y = max_height - d;
            self.vel.y = -self.vel.y.abs();
        }
    }
}

/// A body in the arena: a static rectangle or a dynamic particle.
///
/// Dispatch is an explicit match over the variants; the body set stays
/// homogeneous without trait objects.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Body {
    /// Static axis-aligned rectangle. Indexed for queries, never moves,
    /// and its collision behavior is a no-op (placeholder for future
    /// static obstacles).
    Obstacle(Rect),
    /// Dynamic circular body.
    Particle(Particle),
}

impl Body {
    /// Advance one tick. Static bodies ignore this.
    pub fn update(&mut self, dt: f64) {
        match self {
            Self::Obstacle(_) => {}
            Self::Particle(p) => p.update(dt),
        }
    }

    /// Clamp to the arena. Static bodies ignore this.
    pub fn apply_bounds(&mut self, max_width: f64, max_height: f64) {
        match self {
            Self::Obstacle(_) => {}
            Self::Particle(p) => p.apply_bounds(max_width, max_height),
        }
    }

    /// Axis-aligned bounding box used for spatial insertion.
    pub fn bounding_box(&self) -> Rect {
        match self {
            Self::Obstacle(r) => *r,
            Self::Particle(p) => p.bounding_box(),
        }
    }

    /// Whether a collision was detected this frame (always false for
    /// obstacles).
    pub fn is_colliding(&self) -> bool {
        match self {
            Self::Obstacle(_) => false,
            Self::Particle(p) => p.is_colliding(),
        }
    }

    /// The particle payload, if this body is one.
    pub fn as_particle(&self) -> Option<&Particle> {
        match self {
            Self::Obstacle(_) => None,
            Self::Particle(p) => Some(p),
        }
    }

    /// Mutable particle payload, if this body is one.
    pub fn as_particle_mut(&mut self) -> Option<&mut Particle> {
        match self {
            Self::Obstacle(_) => None,
            Self::Particle(p) => Some(p),
        }
    }
}

/// Detect and resolve a pairwise collision between two distinct bodies.
///
/// Anything involving an obstacle is a no-op. For two particles: the pair is
/// skipped when either is already flagged colliding this frame (which also
/// suppresses the reversed enumeration of the same pair), overlap is a
/// squared-distance test against the summed radii, and resolution applies the
/// standard equal-and-opposite 2D elastic impulse with unit restitution:
/// only when the bodies are approaching. Positions are not separated; only
/// velocities change.
///
/// Exactly coincident centers have no usable collision normal: both bodies
/// are flagged and the impulse is skipped, so no NaN can reach velocity
/// state.
pub fn resolve_collision(a: &mut Body, b: &mut Body) {
    let (Body::Particle(a), Body::Particle(b)) = (a, b) else {
        return;
    };
    if a.is_colliding() || b.is_colliding() {
        return;
    }
    let delta = b.center() - a.center();
    let dist_sq = delta.hypot2();
    let reach = a.radius + b.radius;
    if dist_sq > reach * reach {
        return;
    }
    a.flags.insert(BodyFlags::COLLIDING);
    b.flags.insert(BodyFlags::COLLIDING);

    let dist = dist_sq.sqrt();
    if dist == 0.0 {
        return;
    }
    let normal = delta / dist;
    let closing = (a.vel - b.vel).dot(normal);
    if closing <= 0.0 {
        // Already separating; flagging alone is enough.
        return;
    }
    let impulse = 2.0 * closing / (a.mass() + b.mass());
    a.vel -= impulse * b.mass() * normal;
    b.vel += impulse * a.mass() * normal;
}
