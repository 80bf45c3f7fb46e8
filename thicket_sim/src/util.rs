// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversions between kurbo rectangles and index regions.

use kurbo::Rect;
use thicket_quadtree::Region;

pub(crate) fn rect_to_region(r: Rect) -> Region {
    Region::new(r.x0, r.y0, r.width(), r.height())
}

pub(crate) fn region_to_rect(r: Region) -> Rect {
    Rect::new(r.x, r.y, r.x + r.width, r.y + r.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let rect = Rect::new(10.0, 20.0, 60.0, 100.0);
        assert_eq!(region_to_rect(rect_to_region(rect)), rect);
    }
}
