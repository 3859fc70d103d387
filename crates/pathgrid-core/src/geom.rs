//! Geometry primitives: [`Coord`], [`Side`] and [`Segment`].
//!
//! Coordinates are `(i, j)` = `(row, column)` with rows growing downwards,
//! which matches how the grid is laid out on screen.

use std::fmt;

// ---------------------------------------------------------------------------
// Coord
// ---------------------------------------------------------------------------

/// A cell position: row `i`, column `j`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub i: usize,
    pub j: usize,
}

impl Coord {
    /// Origin (0, 0), the start cell of every grid.
    pub const ZERO: Self = Self { i: 0, j: 0 };

    /// Create a new coordinate.
    #[inline]
    pub const fn new(i: usize, j: usize) -> Self {
        Self { i, j }
    }

    /// Manhattan (L1) distance to `other`.
    #[inline]
    pub fn manhattan(self, other: Coord) -> usize {
        self.i.abs_diff(other.i) + self.j.abs_diff(other.j)
    }

    /// The side of `self` that faces `other`, if the two are grid-adjacent
    /// (Manhattan distance exactly 1).
    pub fn side_towards(self, other: Coord) -> Option<Side> {
        if self.j == other.j {
            if other.i + 1 == self.i {
                return Some(Side::North);
            }
            if self.i + 1 == other.i {
                return Some(Side::South);
            }
        } else if self.i == other.i {
            if self.j + 1 == other.j {
                return Some(Side::East);
            }
            if other.j + 1 == self.j {
                return Some(Side::West);
            }
        }
        None
    }

    /// Whether `other` is one of the four von Neumann neighbours.
    #[inline]
    pub fn is_adjacent(self, other: Coord) -> bool {
        self.side_towards(other).is_some()
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.i, self.j)
    }
}

// ---------------------------------------------------------------------------
// Side
// ---------------------------------------------------------------------------

/// One of the four edges of a cell. The discriminant is the index into a
/// cell's wall array, fixed as N, S, E, W.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    North = 0,
    South = 1,
    East = 2,
    West = 3,
}

impl Side {
    /// All sides in wall-array order.
    pub const ALL: [Side; 4] = [Side::North, Side::South, Side::East, Side::West];

    /// Index into a wall array.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The side facing back across the same edge.
    #[inline]
    pub const fn opposite(self) -> Side {
        match self {
            Side::North => Side::South,
            Side::South => Side::North,
            Side::East => Side::West,
            Side::West => Side::East,
        }
    }
}

// ---------------------------------------------------------------------------
// Segment
// ---------------------------------------------------------------------------

/// A line segment in drawing space, from `(x1, y1)` to `(x2, y2)`.
///
/// `x` grows with the column and `y` with the row.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl Segment {
    #[inline]
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// The edge of the cell at `c` on side `side`, for cells `w` units wide.
    pub fn cell_edge(c: Coord, side: Side, w: f32) -> Self {
        let left = c.j as f32 * w;
        let top = c.i as f32 * w;
        let right = left + w;
        let bottom = top + w;
        match side {
            Side::North => Self::new(left, top, right, top),
            Side::South => Self::new(left, bottom, right, bottom),
            Side::East => Self::new(right, top, right, bottom),
            Side::West => Self::new(left, top, left, bottom),
        }
    }
}
