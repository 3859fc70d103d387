//! The [`Cell`] type: a grid position with obstacle, wall and search state.

use crate::geom::{Coord, Side};

/// Non-owning handle to a cell: its index in the owning grid's cell table.
///
/// Handles are only meaningful for the grid that produced them and become
/// stale when that grid is rebuilt.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellId(pub(crate) usize);

impl CellId {
    /// Index into the grid's row-major cell table.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Per-edge maze barriers in N, S, E, W order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Walls(pub [bool; 4]);

impl Walls {
    /// No walls on any side.
    pub const OPEN: Self = Self([false; 4]);
    /// Walls on all four sides.
    pub const SEALED: Self = Self([true; 4]);

    #[inline]
    pub fn is_sealed(self, side: Side) -> bool {
        self.0[side.index()]
    }

    #[inline]
    pub fn set(&mut self, side: Side, sealed: bool) {
        self.0[side.index()] = sealed;
    }

    /// Number of sealed sides.
    pub fn count(self) -> usize {
        self.0.iter().filter(|&&w| w).count()
    }

    /// Iterate over the sealed sides.
    pub fn sealed_sides(self) -> impl Iterator<Item = Side> {
        Side::ALL.into_iter().filter(move |&s| self.is_sealed(s))
    }
}

/// Search bookkeeping written by the active search.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Metrics {
    /// Cost from the start.
    pub g: f64,
    /// Heuristic estimate to the goal.
    pub h: f64,
    /// `g + h`.
    pub f: f64,
    /// Back-pointer for path reconstruction.
    pub came_from: Option<CellId>,
}

/// A single grid cell.
#[derive(Clone, Debug)]
pub struct Cell {
    coord: Coord,
    /// Cell-level obstacle, used in obstacle mode.
    pub blocked: bool,
    /// Maze walls, used in maze mode.
    pub walls: Walls,
    pub metrics: Metrics,
    /// Maze-generation scratch flag.
    pub visited: bool,
    neighbours: Vec<CellId>,
}

impl Cell {
    pub(crate) fn new(coord: Coord) -> Self {
        Self {
            coord,
            blocked: false,
            walls: Walls::OPEN,
            metrics: Metrics::default(),
            visited: false,
            neighbours: Vec::with_capacity(4),
        }
    }

    /// The cell's fixed position.
    #[inline]
    pub fn coord(&self) -> Coord {
        self.coord
    }

    /// Cached von Neumann neighbours, in W, E, N, S order.
    #[inline]
    pub fn neighbours(&self) -> &[CellId] {
        &self.neighbours
    }

    /// Rebuild the neighbour list for a `rows × cols` row-major grid.
    /// Idempotent.
    pub fn compute_neighbours(&mut self, rows: usize, cols: usize) {
        let Coord { i, j } = self.coord;
        let id = |i: usize, j: usize| CellId(i * cols + j);
        self.neighbours.clear();
        if j > 0 {
            self.neighbours.push(id(i, j - 1));
        }
        if j + 1 < cols {
            self.neighbours.push(id(i, j + 1));
        }
        if i > 0 {
            self.neighbours.push(id(i - 1, j));
        }
        if i + 1 < rows {
            self.neighbours.push(id(i + 1, j));
        }
    }

    /// Clear search metrics and the visited flag. Obstacles and walls are
    /// left untouched.
    pub fn reset_search_metadata(&mut self) {
        self.metrics = Metrics::default();
        self.visited = false;
    }
}
