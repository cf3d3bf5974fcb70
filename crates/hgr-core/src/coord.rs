//! Integer grid coordinates used when islands are placed on a 2-D grid.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A location on a 2-D grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coordinate2D {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Coordinate2D {
    /// Creates a coordinate.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal distance to `other`.
    pub fn dist_x(&self, other: &Coordinate2D) -> u32 {
        self.x.abs_diff(other.x)
    }

    /// Vertical distance to `other`.
    pub fn dist_y(&self, other: &Coordinate2D) -> u32 {
        self.y.abs_diff(other.y)
    }

    /// Manhattan distance to `other`.
    pub fn manhattan(&self, other: &Coordinate2D) -> u32 {
        self.dist_x(other) + self.dist_y(other)
    }

    /// Half-perimeter wirelength of the bounding box of `locs`; `0` when empty.
    pub fn hpwl<'a>(locs: impl IntoIterator<Item = &'a Coordinate2D>) -> u32 {
        let mut bounds: Option<(i32, i32, i32, i32)> = None;
        for loc in locs {
            bounds = Some(match bounds {
                None => (loc.x, loc.y, loc.x, loc.y),
                Some((min_x, min_y, max_x, max_y)) => (
                    min_x.min(loc.x),
                    min_y.min(loc.y),
                    max_x.max(loc.x),
                    max_y.max(loc.y),
                ),
            });
        }
        bounds
            .map(|(min_x, min_y, max_x, max_y)| min_x.abs_diff(max_x) + min_y.abs_diff(max_y))
            .unwrap_or(0)
    }

    /// Treating `self` as grid dimensions, returns the linear index of `loc`.
    ///
    /// Column-major (`x * height + y`) unless `x_first` is set. `None` when
    /// `loc` lies outside the grid or the index does not fit in `usize`.
    pub fn index_of(&self, loc: &Coordinate2D, x_first: bool) -> Option<usize> {
        if loc.x < 0 || loc.y < 0 || loc.x >= self.x || loc.y >= self.y {
            return None;
        }
        let (width, height) = self.extent()?;
        let (x, y) = (u64::try_from(loc.x).ok()?, u64::try_from(loc.y).ok()?);
        let idx = if x_first { y * width + x } else { x * height + y };
        usize::try_from(idx).ok()
    }

    /// Inverse of [`Coordinate2D::index_of`].
    pub fn loc_of(&self, idx: usize, x_first: bool) -> Option<Coordinate2D> {
        let (width, height) = self.extent()?;
        let idx = u64::try_from(idx).ok()?;
        if idx >= width * height {
            return None;
        }
        let (x, y) = if x_first {
            (idx % width, idx / width)
        } else {
            (idx / height, idx % height)
        };
        Some(Coordinate2D::new(i32::try_from(x).ok()?, i32::try_from(y).ok()?))
    }

    fn extent(&self) -> Option<(u64, u64)> {
        if self.x <= 0 || self.y <= 0 {
            return None;
        }
        Some((u64::try_from(self.x).ok()?, u64::try_from(self.y).ok()?))
    }

    /// Iterates every location of the grid spanned by `self`, column-major.
    pub fn cells(&self) -> impl Iterator<Item = Coordinate2D> + '_ {
        (0..self.x.max(0))
            .flat_map(move |x| (0..self.y.max(0)).map(move |y| Coordinate2D::new(x, y)))
    }
}

impl fmt::Display for Coordinate2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
