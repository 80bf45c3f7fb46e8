// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thicket Quadtree: a region quadtree for 2D broad-phase collision.
//!
//! The tree spans a fixed arena rectangle and is rebuilt from scratch every
//! frame: [`QuadTree::clear`], insert every body, then query or enumerate
//! candidate pairs. Leaves hold a bounded set of occupants; a leaf that
//! overflows while below the depth limit splits into four quadrant children
//! and redistributes. Leaves at the depth limit saturate instead, and their occupancy
//! is only bounded while subdivision is still possible.
//!
//! - Occupants are copyable handles (`P`) into a caller-owned collection;
//!   the tree never owns bodies, so several leaves can reference the same
//!   body without aliasing hazards.
//! - The production insertion path is overlap-based: a body lands in every
//!   leaf its bounding box touches, routed corner by corner. Point-based
//!   insertion is available for purely point-indexed use.
//! - Quadrant routing splits at the cell midpoint; points exactly on a
//!   midline go top/left. Out-of-arena coordinates are absorbed into the
//!   nearest edge cells rather than rejected.
//! - [`QuadTree::for_each_candidate_pair`] enumerates same-leaf occupant
//!   pairs, self-inclusive and in both orders. The caller's resolution
//!   callback guards identity and already-resolved pairs; this matches the
//!   enumeration the physics layer expects (see `thicket_sim`).
//!
//! # Example
//!
//! ```rust
//! use thicket_quadtree::{QuadTree, Region};
//!
//! let mut tree: QuadTree<u32> = QuadTree::new(Region::new(0.0, 0.0, 200.0, 200.0), 5, 6);
//!
//! // One frame: clear, insert, query.
//! tree.clear();
//! tree.insert(1, Region::new(10.0, 10.0, 10.0, 10.0));
//! tree.insert(2, Region::new(12.0, 12.0, 10.0, 10.0));
//!
//! let here: Vec<u32> = tree.query_point(15.0, 15.0).collect();
//! assert_eq!(here.len(), 2);
//!
//! let mut pairs = 0;
//! tree.for_each_candidate_pair(|a, b| {
//!     if a != b {
//!         pairs += 1;
//!     }
//! });
//! assert_eq!(pairs, 2); // (1, 2) and (2, 1)
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod node;
mod tree;
mod types;

pub use tree::{NodeView, Nodes, QuadTree};
pub use types::{Quadrant, Region};

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn frame_cycle_clear_insert_query() {
        let mut tree: QuadTree<u32> =
            QuadTree::new(Region::new(0.0, 0.0, 400.0, 400.0), 5, 6);
        for frame in 0..3 {
            tree.clear();
            for i in 0..32 {
                let x = f64::from((i * 37 + frame * 11) % 390);
                let y = f64::from((i * 53 + frame * 7) % 390);
                tree.insert(i, Region::new(x, y, 10.0, 10.0));
            }
            // Every inserted body is findable at its own anchor.
            for i in 0..32 {
                let x = f64::from((i * 37 + frame * 11) % 390);
                let y = f64::from((i * 53 + frame * 7) % 390);
                let hits: Vec<u32> = tree.query_point(x + 1.0, y + 1.0).collect();
                assert!(hits.contains(&i), "body {i} missing at frame {frame}");
            }
        }
    }
}
