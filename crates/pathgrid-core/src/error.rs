use std::fmt;

use crate::geom::Coord;
use crate::grid::GridMode;

/// Errors produced by grid construction and mutation.
///
/// A failed operation leaves the grid unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// A grid needs at least one row and one column.
    EmptyDimensions { rows: usize, cols: usize },
    /// The coordinate lies outside the grid.
    OutOfBounds { coord: Coord },
    /// Walls can only be removed between grid-adjacent cells.
    NotAdjacent { a: Coord, b: Coord },
    /// Obstacle density must be a probability in `[0, 1]`.
    InvalidDensity(f64),
    /// A layout line has a different width from the first line.
    InconsistentLayout { line: usize },
    /// A layout contains a character with no cell meaning.
    InvalidRune { ch: char, coord: Coord },
    /// The operation only applies to grids in another mode.
    WrongMode { expected: GridMode, found: GridMode },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDimensions { rows, cols } => {
                write!(f, "grid dimensions must be positive, got {rows}x{cols}")
            }
            Self::OutOfBounds { coord } => write!(f, "cell {coord} is outside the grid"),
            Self::NotAdjacent { a, b } => {
                write!(f, "cells {a} and {b} are not adjacent")
            }
            Self::InvalidDensity(p) => {
                write!(f, "obstacle density {p} is not in [0, 1]")
            }
            Self::InconsistentLayout { line } => {
                write!(f, "layout line {line} has an inconsistent width")
            }
            Self::InvalidRune { ch, coord } => {
                write!(f, "layout contains invalid rune \u{201c}{ch}\u{201d} at {coord}")
            }
            Self::WrongMode { expected, found } => {
                write!(f, "operation needs a {expected} grid, this one is a {found} grid")
            }
        }
    }
}

impl std::error::Error for GridError {}
