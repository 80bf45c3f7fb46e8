// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public `QuadTree` facade over the root node.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::node::QuadNode;
use crate::types::Region;

/// Region quadtree over copyable occupant handles.
///
/// The tree owns its node structure exclusively; occupants are lightweight
/// handles into whatever collection the caller owns. The arena region, the
/// maximum subdivision depth, and the per-leaf occupancy limit are fixed at
/// construction. The intended lifecycle is per frame: [`clear`](Self::clear),
/// re-insert every body, then query and enumerate; nothing is kept
/// incrementally across frames.
#[derive(Clone, Debug)]
pub struct QuadTree<P> {
    root: QuadNode<P>,
    debug_outlines: bool,
}

impl<P: Copy + PartialEq + Debug> QuadTree<P> {
    /// Create a tree spanning `arena`, subdividing to at most `max_depth`
    /// levels, with leaves below `max_depth` holding at most `max_occupants`.
    pub fn new(arena: Region, max_depth: usize, max_occupants: usize) -> Self {
        Self {
            root: QuadNode::new(arena, 0, max_depth, max_occupants),
            debug_outlines: false,
        }
    }

    /// The arena region the root spans.
    pub fn arena(&self) -> Region {
        *self.root.region()
    }

    /// Discard all structure below the root and every occupant.
    ///
    /// Call once at the start of every frame, before re-insertion.
    pub fn clear(&mut self) {
        self.root.clear();
    }

    /// Insert an occupant into every leaf its bounding box touches.
    ///
    /// This is the production insertion path. Boxes outside the arena are
    /// absorbed into the nearest edge cells rather than rejected.
    pub fn insert(&mut self, item: P, bbox: Region) {
        self.root.insert_overlapping(item, bbox);
    }

    /// Insert an occupant routed only by its anchor point (bounding box
    /// origin), for purely point-indexed use.
    pub fn insert_at_point(&mut self, item: P, bbox: Region) {
        self.root.insert_at_point(item, bbox);
    }

    /// Occupants of the leaf cell containing the point.
    ///
    /// The view is valid until the next `clear`/insert cycle.
    pub fn query_point(&self, x: f64, y: f64) -> impl Iterator<Item = P> + '_ {
        self.root.leaf_for(x, y).occupants().iter().map(|(p, _)| *p)
    }

    /// Invoke `f` for every same-leaf occupant pair, leaf by leaf.
    ///
    /// Pairs are self-inclusive and emitted in both orders; callers guard
    /// identity and suppress re-resolution (see the crate docs). A body
    /// inserted into several leaves is enumerated in each of them.
    pub fn for_each_candidate_pair(&self, mut f: impl FnMut(P, P)) {
        self.root.for_each_candidate_pair(&mut f);
    }

    /// Depth-first traversal of the node structure, for debug rendering.
    ///
    /// The iterator is finite and restartable each call; it borrows the tree
    /// and is invalidated by the next mutation.
    pub fn iter(&self) -> Nodes<'_, P> {
        let mut stack = Vec::new();
        stack.push(&self.root);
        Nodes { stack }
    }

    /// Whether debug outlines are currently exposed.
    pub fn debug_outlines(&self) -> bool {
        self.debug_outlines
    }

    /// Toggle exposure of cell outlines to the rendering collaborator.
    /// Purely cosmetic; queries and collision enumeration ignore it.
    pub fn set_debug_outlines(&mut self, on: bool) {
        self.debug_outlines = on;
    }

    /// Cell outlines for a debug overlay. Empty while the toggle is off.
    pub fn outlines(&self) -> impl Iterator<Item = Region> + '_ {
        self.iter()
            .filter(move |_| self.debug_outlines)
            .map(|view| view.region())
    }
}

/// Borrowed view of one tree node yielded by [`QuadTree::iter`].
#[derive(Copy, Clone, Debug)]
pub struct NodeView<'a, P> {
    node: &'a QuadNode<P>,
}

impl<'a, P: Copy + PartialEq + Debug> NodeView<'a, P> {
    /// The cell geometry.
    pub fn region(&self) -> Region {
        *self.node.region()
    }

    /// Depth below the root (the root is 0).
    pub fn depth(&self) -> usize {
        self.node.depth()
    }

    /// True if this node holds occupants directly.
    pub fn is_leaf(&self) -> bool {
        self.node.is_leaf()
    }

    /// Occupant handles held by this node (empty for internal nodes).
    pub fn occupants(&self) -> impl Iterator<Item = P> + 'a {
        self.node.occupants().iter().map(|(p, _)| *p)
    }
}

/// Depth-first node iterator. See [`QuadTree::iter`].
#[derive(Debug)]
pub struct Nodes<'a, P> {
    stack: Vec<&'a QuadNode<P>>,
}

impl<'a, P: Copy + PartialEq + Debug> Iterator for Nodes<'a, P> {
    type Item = NodeView<'a, P>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Some(children) = node.children() {
            // Reverse push keeps quadrant order on the way out.
            for child in children.iter().rev() {
                self.stack.push(child);
            }
        }
        Some(NodeView { node })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(cap: usize, max_depth: usize) -> QuadTree<u32> {
        QuadTree::new(Region::new(0.0, 0.0, 200.0, 200.0), max_depth, cap)
    }

    fn bbox(x: f64, y: f64) -> Region {
        Region::new(x, y, 10.0, 10.0)
    }

    #[test]
    fn query_point_returns_leaf_occupants() {
        let mut t = tree(1, 2);
        t.insert(7, bbox(10.0, 10.0));
        t.insert(8, bbox(150.0, 150.0));
        let hits: Vec<u32> = t.query_point(12.0, 12.0).collect();
        assert_eq!(hits, [7]);
        let hits: Vec<u32> = t.query_point(155.0, 155.0).collect();
        assert_eq!(hits, [8]);
    }

    #[test]
    fn capacity_invariant_below_max_depth() {
        let mut t = tree(2, 5);
        let mut v = 0_u32;
        for x in 0..8 {
            for y in 0..8 {
                t.insert(v, bbox(f64::from(x) * 24.0, f64::from(y) * 24.0));
                v += 1;
            }
        }
        for view in t.iter() {
            if view.is_leaf() && view.depth() < 5 {
                assert!(
                    view.occupants().count() <= 2,
                    "leaf at depth {} over capacity",
                    view.depth()
                );
            }
        }
    }

    #[test]
    fn clear_resets_to_single_empty_leaf() {
        let mut t = tree(1, 3);
        for i in 0..12 {
            t.insert(i, bbox(f64::from(i) * 15.0, f64::from(i) * 15.0));
        }
        t.clear();
        let nodes: Vec<_> = t.iter().collect();
        assert_eq!(nodes.len(), 1);
        assert!(nodes[0].is_leaf());
        assert_eq!(nodes[0].occupants().count(), 0);
        assert_eq!(t.query_point(10.0, 10.0).count(), 0);
    }

    #[test]
    fn out_of_bounds_insertion_is_absorbed() {
        let mut t = tree(4, 3);
        t.insert(1, bbox(-50.0, -50.0));
        let hits: Vec<u32> = t.query_point(-50.0, -50.0).collect();
        assert_eq!(hits, [1]);
    }

    #[test]
    fn outlines_follow_debug_toggle() {
        let mut t = tree(1, 2);
        t.insert(1, bbox(10.0, 10.0));
        t.insert(2, bbox(150.0, 150.0));
        assert_eq!(t.outlines().count(), 0);
        t.set_debug_outlines(true);
        // Root plus four children.
        assert_eq!(t.outlines().count(), 5);
        assert_eq!(t.outlines().next(), Some(t.arena()));
    }

    #[test]
    fn iter_is_restartable() {
        let mut t = tree(1, 2);
        t.insert(1, bbox(10.0, 10.0));
        t.insert(2, bbox(150.0, 150.0));
        let first: Vec<usize> = t.iter().map(|v| v.depth()).collect();
        let second: Vec<usize> = t.iter().map(|v| v.depth()).collect();
        assert_eq!(first, second);
        assert_eq!(first[0], 0);
    }

    #[test]
    fn shared_leaf_pairs_only() {
        let mut t = tree(1, 2);
        t.insert(1, bbox(10.0, 10.0));
        t.insert(2, bbox(14.0, 14.0));
        t.insert(3, bbox(180.0, 180.0));
        let mut cross = 0;
        t.for_each_candidate_pair(|a, b| {
            if a != b && (a == 3 || b == 3) {
                cross += 1;
            }
        });
        assert_eq!(cross, 0, "distant body must never pair with the cluster");
    }
}
