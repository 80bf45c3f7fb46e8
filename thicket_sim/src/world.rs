// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The frame-stepped world: body arena, per-frame index rebuild, collision
//! pass.

use kurbo::{Point, Rect, Vec2};
use thicket_quadtree::{QuadTree, Region};

use crate::body::{Body, Particle, resolve_collision};
use crate::util::{rect_to_region, region_to_rect};

/// Generational handle for bodies.
///
/// A `BodyId` stays stable across frames but becomes stale when the body is
/// removed; a reused slot gets a higher generation, so stale ids never alias
/// a different live body. Stale ids are answered with `None`/no-ops.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BodyId(u32, u32);

impl BodyId {
    const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Simulation parameters, fixed at [`World`] construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimConfig {
    /// Arena width in arena units.
    pub width: f64,
    /// Arena height in arena units.
    pub height: f64,
    /// Maximum quadtree subdivision depth.
    pub max_depth: usize,
    /// Maximum occupants per leaf before subdivision (not enforced at
    /// `max_depth`).
    pub max_leaf_occupants: usize,
    /// Radius given to particles spawned with [`World::spawn_particle`].
    pub spawn_radius: f64,
    /// Velocity given to particles spawned with [`World::spawn_particle`].
    pub spawn_velocity: Vec2,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 800.0,
            max_depth: 5,
            max_leaf_occupants: 6,
            spawn_radius: 5.0,
            spawn_velocity: Vec2::new(3.0, 2.0),
        }
    }
}

/// The simulation world.
///
/// Owns the authoritative body collection and the quadtree; the tree holds
/// only [`BodyId`] handles and is discarded and rebuilt inside every
/// [`step`](Self::step). A frame is one synchronous unit of work; nothing
/// here suspends, re-enters, or touches I/O.
pub struct World {
    slots: Vec<Option<Body>>,
    generations: Vec<u32>,
    free_list: Vec<usize>,
    tree: QuadTree<BodyId>,
    config: SimConfig,
    /// Candidate-pair scratch, reused across frames.
    pair_buf: Vec<(BodyId, BodyId)>,
}

impl core::fmt::Debug for World {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.slots.len();
        let alive = self.slots.iter().filter(|s| s.is_some()).count();
        f.debug_struct("World")
            .field("slots_total", &total)
            .field("alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}

impl World {
    /// Create a world with the given parameters.
    pub fn new(config: SimConfig) -> Self {
        let arena = Region::new(0.0, 0.0, config.width, config.height);
        Self {
            slots: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            tree: QuadTree::new(arena, config.max_depth, config.max_leaf_occupants),
            config,
            pair_buf: Vec::new(),
        }
    }

    /// The parameters this world was built with.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Spawn a particle at `pos` with the configured default radius and
    /// velocity.
    pub fn spawn_particle(&mut self, pos: Point) -> BodyId {
        self.spawn_particle_with(pos, self.config.spawn_radius, self.config.spawn_velocity)
    }

    /// Spawn a particle with explicit radius and velocity.
    pub fn spawn_particle_with(&mut self, pos: Point, radius: f64, vel: Vec2) -> BodyId {
        self.insert_body(Body::Particle(Particle::new(pos, radius, vel)))
    }

    /// Spawn a static rectangular obstacle.
    pub fn spawn_obstacle(&mut self, rect: Rect) -> BodyId {
        self.insert_body(Body::Obstacle(rect))
    }

    fn insert_body(&mut self, body: Body) -> BodyId {
        let idx = if let Some(idx) = self.free_list.pop() {
            self.generations[idx] = self.generations[idx].saturating_add(1);
            self.slots[idx] = Some(body);
            idx
        } else {
            self.slots.push(Some(body));
            self.generations.push(1);
            self.slots.len() - 1
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "BodyId uses 32-bit indices by design."
        )]
        let id = BodyId::new(idx as u32, self.generations[idx]);
        id
    }

    /// Remove a body. Stale ids are ignored.
    ///
    /// Removal invalidates any outstanding query results that referenced the
    /// body; the generational handle makes them stale rather than dangling.
    pub fn remove(&mut self, id: BodyId) {
        if !self.is_alive(id) {
            return;
        }
        self.slots[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// True if `id` refers to a live body.
    pub fn is_alive(&self, id: BodyId) -> bool {
        self.slots.get(id.idx()).is_some_and(|s| s.is_some()) && self.generations[id.idx()] == id.1
    }

    /// Access a body.
    pub fn body(&self, id: BodyId) -> Option<&Body> {
        if !self.is_alive(id) {
            return None;
        }
        self.slots[id.idx()].as_ref()
    }

    /// Access a body mutably.
    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        if !self.is_alive(id) {
            return None;
        }
        self.slots[id.idx()].as_mut()
    }

    /// Number of live bodies.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// True if no bodies are alive.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate live bodies with their ids.
    pub fn bodies(&self) -> impl Iterator<Item = (BodyId, &Body)> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            let body = slot.as_ref()?;
            #[allow(
                clippy::cast_possible_truncation,
                reason = "BodyId uses 32-bit indices by design."
            )]
            let id = BodyId::new(i as u32, self.generations[i]);
            Some((id, body))
        })
    }

    /// Advance the simulation by one frame tick.
    ///
    /// Strict order: clear the index, then per body update and boundary
    /// clamp, then re-insert every body by bounding box, then run the
    /// collision pass. `dt` is a frame-relative multiplier; callers
    /// normalize to their target frame rate.
    pub fn step(&mut self, dt: f64) {
        let (max_w, max_h) = (self.config.width, self.config.height);
        self.tree.clear();
        for i in 0..self.slots.len() {
            let Some(body) = self.slots[i].as_mut() else {
                continue;
            };
            body.update(dt);
            body.apply_bounds(max_w, max_h);
            let bbox = rect_to_region(body.bounding_box());
            #[allow(
                clippy::cast_possible_truncation,
                reason = "BodyId uses 32-bit indices by design."
            )]
            let id = BodyId::new(i as u32, self.generations[i]);
            self.tree.insert(id, bbox);
        }
        self.collision_check();
    }

    /// Run the same-leaf collision pass over the current index contents.
    ///
    /// Normally invoked from [`step`](Self::step); exposed so a driver can
    /// re-run detection after injecting bodies mid-frame.
    pub fn collision_check(&mut self) {
        let mut pairs = core::mem::take(&mut self.pair_buf);
        pairs.clear();
        self.tree.for_each_candidate_pair(|a, b| pairs.push((a, b)));
        for (a, b) in pairs.drain(..) {
            self.resolve(a, b);
        }
        self.pair_buf = pairs;
    }

    fn resolve(&mut self, a: BodyId, b: BodyId) {
        // The leaf enumeration is self-inclusive; the identity check is the
        // runtime guard that keeps it harmless.
        if a == b || !self.is_alive(a) || !self.is_alive(b) {
            return;
        }
        let (body_a, body_b) = pair_mut(&mut self.slots, a.idx(), b.idx());
        resolve_collision(body_a, body_b);
    }

    /// Ids of the bodies sharing the index leaf that contains the point.
    ///
    /// The view reflects the index as of the last [`step`](Self::step); it is
    /// a leaf-occupancy lookup, not a precise containment test.
    pub fn query_point(&self, x: f64, y: f64) -> impl Iterator<Item = BodyId> + '_ {
        self.tree.query_point(x, y).filter(|id| self.is_alive(*id))
    }

    /// The quadtree as of the last step, for rendering collaborators that
    /// walk cells and occupants.
    pub fn tree(&self) -> &QuadTree<BodyId> {
        &self.tree
    }

    /// Toggle debug exposure of quadtree cell outlines.
    pub fn set_debug_outlines(&mut self, on: bool) {
        self.tree.set_debug_outlines(on);
    }

    /// Quadtree cell outlines for a debug overlay; empty while the toggle is
    /// off.
    pub fn outlines(&self) -> impl Iterator<Item = Rect> + '_ {
        self.tree.outlines().map(region_to_rect)
    }
}

/// Mutably borrow two distinct slots at once.
fn pair_mut(slots: &mut [Option<Body>], i: usize, j: usize) -> (&mut Body, &mut Body) {
    debug_assert_ne!(i, j, "self pairs are filtered before resolution");
    if i < j {
        let (lo, hi) = slots.split_at_mut(j);
        (
            lo[i].as_mut().expect("dangling BodyId"),
            hi[0].as_mut().expect("dangling BodyId"),
        )
    } else {
        let (lo, hi) = slots.split_at_mut(i);
        (
            hi[0].as_mut().expect("dangling BodyId"),
            lo[j].as_mut().expect("dangling BodyId"),
        )
    }
}
