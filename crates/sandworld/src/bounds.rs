//! Integer bounding box used to track which part of the grid still needs simulating.

use std::fmt;

/// Axis-aligned, inclusive rectangle of grid coordinates.
///
/// The box is empty iff `x_max < x_min`. Every operation is total: growing,
/// merging, expanding or clipping an empty box is well defined.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct BoundingBox {
    pub x_min: i32,
    pub x_max: i32,
    pub y_min: i32,
    pub y_max: i32,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

impl BoundingBox {
    #[must_use]
    pub const fn new(x_min: i32, x_max: i32, y_min: i32, y_max: i32) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self::new(0, -1, 0, -1)
    }

    /// Box covering a whole `width` x `height` grid.
    #[must_use]
    pub const fn covering(width: usize, height: usize) -> Self {
        Self::new(0, width as i32 - 1, 0, height as i32 - 1)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.x_max < self.x_min
    }

    #[must_use]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        self.x_min <= x && x <= self.x_max && self.y_min <= y && y <= self.y_max
    }

    /// Grow the box so it includes `(x, y)`.
    pub fn update(&mut self, x: i32, y: i32) {
        if self.is_empty() {
            *self = Self::new(x, x, y, y);
        } else {
            self.x_min = self.x_min.min(x);
            self.x_max = self.x_max.max(x);
            self.y_min = self.y_min.min(y);
            self.y_max = self.y_max.max(y);
        }
    }

    /// Grow the box so it includes all of `other`.
    pub fn merge(&mut self, other: &BoundingBox) {
        if other.is_empty() {
            return;
        }
        if self.is_empty() {
            *self = *other;
            return;
        }
        self.x_min = self.x_min.min(other.x_min);
        self.x_max = self.x_max.max(other.x_max);
        self.y_min = self.y_min.min(other.y_min);
        self.y_max = self.y_max.max(other.y_max);
    }

    /// Inflate by `amount` on every side. Empty boxes stay empty.
    pub fn expand(&mut self, amount: i32) {
        if self.is_empty() {
            return;
        }
        self.x_min -= amount;
        self.x_max += amount;
        self.y_min -= amount;
        self.y_max += amount;
    }

    /// Intersect with a `width` x `height` grid, returning `(x_min, x_max, y_min, y_max)`.
    ///
    /// The result may describe an empty range; iterating `x_min..=x_max` over it is then a no-op.
    #[must_use]
    pub fn clip(&self, width: usize, height: usize) -> (i32, i32, i32, i32) {
        (
            self.x_min.max(0),
            self.x_max.min(width as i32 - 1),
            self.y_min.max(0),
            self.y_max.min(height as i32 - 1),
        )
    }

    /// Number of cells covered, zero when empty.
    #[must_use]
    pub fn area(&self) -> usize {
        if self.is_empty() || self.y_max < self.y_min {
            return 0;
        }
        ((self.x_max - self.x_min + 1) as usize) * ((self.y_max - self.y_min + 1) as usize)
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) x ({}, {})",
            self.x_min, self.y_min, self.x_max, self.y_max
        )
    }
}

impl From<(i32, i32, i32, i32)> for BoundingBox {
    fn from((x_min, x_max, y_min, y_max): (i32, i32, i32, i32)) -> Self {
        Self::new(x_min, x_max, y_min, y_max)
    }
}
