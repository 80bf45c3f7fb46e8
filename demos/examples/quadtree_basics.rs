// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadtree basics.
//!
//! Build a tree, insert a handful of boxes, run a point query, and walk the
//! node structure.
//!
//! Run:
//! - `cargo run -p thicket_examples --example quadtree_basics`

use thicket_quadtree::{QuadTree, Region};

fn main() {
    let mut tree: QuadTree<u32> = QuadTree::new(Region::new(0.0, 0.0, 200.0, 200.0), 3, 2);

    // One frame's worth of insertions: a cluster in the top-left corner and
    // one body far away.
    tree.clear();
    tree.insert(1, Region::new(10.0, 10.0, 10.0, 10.0));
    tree.insert(2, Region::new(14.0, 12.0, 10.0, 10.0));
    tree.insert(3, Region::new(22.0, 18.0, 10.0, 10.0));
    tree.insert(4, Region::new(150.0, 150.0, 10.0, 10.0));

    let hits: Vec<u32> = tree.query_point(16.0, 16.0).collect();
    println!("bodies at (16, 16): {hits:?}");

    let mut pairs = Vec::new();
    tree.for_each_candidate_pair(|a, b| {
        if a < b {
            pairs.push((a, b));
        }
    });
    println!("candidate pairs: {pairs:?}");

    for view in tree.iter() {
        let r = view.region();
        println!(
            "{:indent$}cell ({:>5.1}, {:>5.1}) {}x{}: {} occupant(s)",
            "",
            r.x,
            r.y,
            r.width,
            r.height,
            view.occupants().count(),
            indent = view.depth() * 2,
        );
    }
}
