// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry: regions and quadrant routing.

/// Axis-aligned rectangle described by origin and size, in arena units.
///
/// A `Region` is immutable once created. It doubles as the cell geometry of
/// the quadtree and as the bounding box passed along with inserted occupants.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Region {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Horizontal extent (non-negative).
    pub width: f64,
    /// Vertical extent (non-negative).
    pub height: f64,
}

/// One of the four quadrants of a subdivided region.
///
/// The discriminants double as child-array indices in the tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Quadrant {
    /// Top-left quadrant.
    TopLeft = 0,
    /// Top-right quadrant.
    TopRight = 1,
    /// Bottom-left quadrant.
    BottomLeft = 2,
    /// Bottom-right quadrant.
    BottomRight = 3,
}

impl Quadrant {
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl Region {
    /// Create a region from origin and size.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The four corners of the region: top-left, top-right, bottom-left,
    /// bottom-right.
    pub fn corners(&self) -> [(f64, f64); 4] {
        [
            (self.x, self.y),
            (self.x + self.width, self.y),
            (self.x, self.y + self.height),
            (self.x + self.width, self.y + self.height),
        ]
    }

    /// Route a point into one of the four quadrants of this region.
    ///
    /// The split is at the midpoint on both axes. Points exactly on a midline
    /// (`<=`) go top/left; this tie-break is deterministic and relied upon by
    /// insertion and point queries. Points outside the region still resolve
    /// to a quadrant (the nearest one), which is what makes out-of-bounds
    /// insertion a silent absorb rather than an error.
    pub fn quadrant(&self, x: f64, y: f64) -> Quadrant {
        let left = x <= self.x + self.width / 2.0;
        let top = y <= self.y + self.height / 2.0;
        match (top, left) {
            (true, true) => Quadrant::TopLeft,
            (true, false) => Quadrant::TopRight,
            (false, true) => Quadrant::BottomLeft,
            (false, false) => Quadrant::BottomRight,
        }
    }

    /// Split into four child regions of half width and half height, indexed
    /// by [`Quadrant`]. The children tile this region exactly.
    pub fn split(&self) -> [Self; 4] {
        let w = self.width / 2.0;
        let h = self.height / 2.0;
        [
            Self::new(self.x, self.y, w, h),
            Self::new(self.x + w, self.y, w, h),
            Self::new(self.x, self.y + h, w, h),
            Self::new(self.x + w, self.y + h, w, h),
        ]
    }
}
