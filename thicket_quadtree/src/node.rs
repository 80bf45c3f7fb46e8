// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree cells: the leaf/internal state machine and its insertion algorithms.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::mem;

use crate::types::Region;

/// Which insertion routing a redistribution should reuse.
///
/// The reference semantics: a leaf that overflows re-inserts its occupants
/// with the same routing that put them there, so overlap-inserted bodies land
/// in every new child their box touches.
#[derive(Copy, Clone, Debug)]
enum Mode {
    Point,
    Overlap,
}

/// One cell of the spatial index.
///
/// A node is either a leaf holding occupants directly or an internal node
/// with exactly four children covering its quadrants; never both. The
/// transition leaf → internal happens at most once per build cycle, on
/// capacity overflow while `depth < max_depth`. There is no internal → leaf
/// transition; [`clear`](Self::clear) discards the whole subtree instead.
#[derive(Clone, Debug)]
pub(crate) struct QuadNode<P> {
    region: Region,
    depth: usize,
    max_depth: usize,
    max_occupants: usize,
    /// Leaf state. Deduplicated by occupant identity.
    occupants: Vec<(P, Region)>,
    /// Internal state, indexed by [`Quadrant`](crate::Quadrant).
    children: Option<Box<[QuadNode<P>; 4]>>,
}

impl<P: Copy + PartialEq + core::fmt::Debug> QuadNode<P> {
    pub(crate) fn new(region: Region, depth: usize, max_depth: usize, max_occupants: usize) -> Self {
        Self {
            region,
            depth,
            max_depth,
            max_occupants,
            occupants: Vec::new(),
            children: None,
        }
    }

    pub(crate) fn region(&self) -> &Region {
        &self.region
    }

    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub(crate) fn occupants(&self) -> &[(P, Region)] {
        &self.occupants
    }

    pub(crate) fn children(&self) -> Option<&[QuadNode<P>; 4]> {
        self.children.as_deref()
    }

    /// Return every node in this subtree to the empty leaf state.
    pub(crate) fn clear(&mut self) {
        self.occupants.clear();
        // Dropping the children discards the subtree; the tree regrows
        // leaf-first from re-insertion.
        self.children = None;
    }

    /// Insert routing purely by the occupant's anchor point (its bounding
    /// box origin).
    pub(crate) fn insert_at_point(&mut self, item: P, bbox: Region) {
        if self.children.is_some() {
            let q = self.region.quadrant(bbox.x, bbox.y);
            if let Some(children) = self.children.as_mut() {
                children[q.index()].insert_at_point(item, bbox);
            }
            return;
        }
        self.add_occupant(item, bbox);
        self.overflow_check(Mode::Point);
    }

    /// Insert into every quadrant the bounding box touches.
    ///
    /// Each of the box's four corners is routed independently; corners that
    /// map to the same child recurse into it again, and the leaf's identity
    /// dedup collapses the duplicates.
    pub(crate) fn insert_overlapping(&mut self, item: P, bbox: Region) {
        if self.children.is_some() {
            for (cx, cy) in bbox.corners() {
                let q = self.region.quadrant(cx, cy);
                if let Some(children) = self.children.as_mut() {
                    children[q.index()].insert_overlapping(item, bbox);
                }
            }
            return;
        }
        self.add_occupant(item, bbox);
        self.overflow_check(Mode::Overlap);
    }

    /// Descend to the leaf whose cell contains the point.
    pub(crate) fn leaf_for(&self, x: f64, y: f64) -> &Self {
        match &self.children {
            Some(children) => children[self.region.quadrant(x, y).index()].leaf_for(x, y),
            None => self,
        }
    }

    /// Enumerate candidate pairs leaf by leaf.
    ///
    /// Within a leaf every occupant is paired against every occupant,
    /// including itself and both orders. The callback is expected to guard
    /// identity and already-resolved pairs; that keeps resolution semantics
    /// identical to the reference enumeration.
    pub(crate) fn for_each_candidate_pair(&self, f: &mut impl FnMut(P, P)) {
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.for_each_candidate_pair(f);
            }
            return;
        }
        for (a, _) in &self.occupants {
            for (b, _) in &self.occupants {
                f(*a, *b);
            }
        }
    }

    fn add_occupant(&mut self, item: P, bbox: Region) {
        if self.occupants.iter().any(|(p, _)| *p == item) {
            return;
        }
        self.occupants.push((item, bbox));
    }

    /// Subdivide and redistribute if over capacity and subdivision is still
    /// possible. Leaves at `max_depth` are allowed unbounded occupancy.
    fn overflow_check(&mut self, mode: Mode) {
        if self.occupants.len() <= self.max_occupants || self.depth >= self.max_depth {
            return;
        }
        self.subdivide();
        let drained = mem::take(&mut self.occupants);
        for (item, bbox) in drained {
            match mode {
                Mode::Point => self.insert_at_point(item, bbox),
                Mode::Overlap => self.insert_overlapping(item, bbox),
            }
        }
    }

    fn subdivide(&mut self) {
        debug_assert!(
            self.children.is_none(),
            "a node subdivides at most once per build cycle"
        );
        let depth = self.depth + 1;
        let max_depth = self.max_depth;
        let max_occupants = self.max_occupants;
        let quads = self.region.split();
        self.children = Some(Box::new(
            quads.map(|r| Self::new(r, depth, max_depth, max_occupants)),
        ));
    }
}
