//! The [`Grid`]: exclusive owner of a dense `rows × cols` table of cells.

use std::fmt;
use std::str::FromStr;

use rand::prelude::*;

use crate::cell::{Cell, CellId, Walls};
use crate::error::GridError;
use crate::geom::{Coord, Segment};

/// How a grid blocks movement. The two modes are mutually exclusive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridMode {
    /// Whole cells are blocked at random.
    #[default]
    Obstacles,
    /// Cells are separated by walls carved into a perfect maze.
    Maze,
}

impl fmt::Display for GridMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Obstacles => f.write_str("obstacles"),
            Self::Maze => f.write_str("maze"),
        }
    }
}

impl FromStr for GridMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "obstacles" | "obstacle" | "random" => Ok(Self::Obstacles),
            "maze" => Ok(Self::Maze),
            _ => Err(format!("unknown grid mode `{s}` (expected obstacles or maze)")),
        }
    }
}

/// A dense grid of [`Cell`]s stored in row-major order.
///
/// The start cell is always `(0, 0)` and the goal is always
/// `(rows - 1, cols - 1)`.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cell_size: f32,
    mode: GridMode,
    cells: Vec<Cell>,
}

impl Grid {
    /// Build an open grid: no obstacles, no walls.
    pub fn new(rows: usize, cols: usize, cell_size: f32) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::EmptyDimensions { rows, cols });
        }
        let cells = (0..rows)
            .flat_map(|i| (0..cols).map(move |j| Cell::new(Coord::new(i, j))))
            .collect();
        let mut grid = Self {
            rows,
            cols,
            cell_size,
            mode: GridMode::Obstacles,
            cells,
        };
        grid.compute_neighbours();
        log::debug!("built {rows}x{cols} grid");
        Ok(grid)
    }

    /// Build an obstacle-mode grid where every cell except the start is
    /// blocked with probability `density`.
    pub fn with_obstacles<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        cell_size: f32,
        density: f64,
        rng: &mut R,
    ) -> Result<Self, GridError> {
        if !(0.0..=1.0).contains(&density) {
            return Err(GridError::InvalidDensity(density));
        }
        let mut grid = Self::new(rows, cols, cell_size)?;
        for cell in grid.cells.iter_mut().skip(1) {
            cell.blocked = rng.random::<f64>() < density;
        }
        Ok(grid)
    }

    // -----------------------------------------------------------------------
    // Dimensions and lookup
    // -----------------------------------------------------------------------

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells. Always at least 1.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Drawing width of one cell.
    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    #[inline]
    pub fn mode(&self) -> GridMode {
        self.mode
    }

    pub(crate) fn set_mode(&mut self, mode: GridMode) {
        self.mode = mode;
    }

    /// Whether the coordinate lies inside the grid.
    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        c.i < self.rows && c.j < self.cols
    }

    /// Handle for the cell at `c`, or `None` if out of bounds.
    #[inline]
    pub fn id(&self, c: Coord) -> Option<CellId> {
        self.contains(c).then(|| CellId(c.i * self.cols + c.j))
    }

    /// Coordinate of the cell behind `id`.
    #[inline]
    pub fn coord(&self, id: CellId) -> Coord {
        self.cells[id.0].coord()
    }

    /// The start cell, `(0, 0)`.
    #[inline]
    pub fn start(&self) -> CellId {
        CellId(0)
    }

    /// The goal cell, `(rows - 1, cols - 1)`.
    #[inline]
    pub fn goal(&self) -> CellId {
        CellId(self.cells.len() - 1)
    }

    /// Borrow a cell. Panics if `id` did not come from a grid of this size.
    #[inline]
    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id.0]
    }

    #[inline]
    pub fn cell_mut(&mut self, id: CellId) -> &mut Cell {
        &mut self.cells[id.0]
    }

    pub fn cell_at(&self, c: Coord) -> Option<&Cell> {
        self.id(c).map(|id| &self.cells[id.0])
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate over `(CellId, &Cell)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellId, &Cell)> {
        self.cells.iter().enumerate().map(|(k, c)| (CellId(k), c))
    }

    // -----------------------------------------------------------------------
    // Topology
    // -----------------------------------------------------------------------

    /// Recompute every cell's neighbour list.
    pub fn compute_neighbours(&mut self) {
        let (rows, cols) = (self.rows, self.cols);
        for cell in &mut self.cells {
            cell.compute_neighbours(rows, cols);
        }
    }

    /// Clear search metadata on every cell, then recompute neighbours.
    pub fn reset_all(&mut self) {
        for cell in &mut self.cells {
            cell.reset_search_metadata();
        }
        self.compute_neighbours();
    }

    /// Seal all four walls of every cell.
    pub fn seal_all_walls(&mut self) {
        for cell in &mut self.cells {
            cell.walls = Walls::SEALED;
        }
    }

    /// Carve a passage between two adjacent cells, clearing the facing wall
    /// on both sides. Idempotent.
    pub fn remove_wall_between(&mut self, a: CellId, b: CellId) -> Result<(), GridError> {
        let (ca, cb) = (self.coord(a), self.coord(b));
        let side = ca
            .side_towards(cb)
            .ok_or(GridError::NotAdjacent { a: ca, b: cb })?;
        self.cells[a.0].walls.set(side, false);
        self.cells[b.0].walls.set(side.opposite(), false);
        Ok(())
    }

    /// Whether the edge between `a` and `b` is free of walls on both sides.
    /// Non-adjacent cells are never open to each other.
    pub fn is_open_between(&self, a: CellId, b: CellId) -> bool {
        let (ca, cb) = (self.coord(a), self.coord(b));
        match ca.side_towards(cb) {
            Some(side) => {
                !self.cells[a.0].walls.is_sealed(side)
                    && !self.cells[b.0].walls.is_sealed(side.opposite())
            }
            None => false,
        }
    }

    /// Whether a search may step from `from` into the adjacent `to`.
    ///
    /// `to` must not be blocked, and its wall facing `from` must be open.
    pub fn can_enter(&self, from: CellId, to: CellId) -> bool {
        let target = &self.cells[to.0];
        if target.blocked {
            return false;
        }
        match target.coord().side_towards(self.coord(from)) {
            Some(side) => !target.walls.is_sealed(side),
            None => false,
        }
    }

    /// Check that the cell at `c` may have its blocked flag edited: it must
    /// be in bounds and the grid must be an obstacle grid.
    pub fn check_editable(&self, c: Coord) -> Result<CellId, GridError> {
        let id = self.id(c).ok_or(GridError::OutOfBounds { coord: c })?;
        if self.mode != GridMode::Obstacles {
            return Err(GridError::WrongMode {
                expected: GridMode::Obstacles,
                found: self.mode,
            });
        }
        Ok(id)
    }

    /// Set the blocked flag of the cell at `c`. Returns whether the flag
    /// changed. The start cell can never be blocked, and maze grids never
    /// carry obstacles.
    pub fn set_blocked(&mut self, c: Coord, blocked: bool) -> Result<bool, GridError> {
        let id = self.check_editable(c)?;
        if blocked && id == self.start() {
            log::warn!("refusing to block the start cell {c}");
            return Ok(false);
        }
        let cell = &mut self.cells[id.0];
        let changed = cell.blocked != blocked;
        cell.blocked = blocked;
        Ok(changed)
    }

    /// Line segments for the sealed walls of `id`, scaled by the cell size.
    pub fn drawable_walls(&self, id: CellId) -> impl Iterator<Item = Segment> + '_ {
        let cell = &self.cells[id.0];
        let w = self.cell_size;
        cell.walls
            .sealed_sides()
            .map(move |side| Segment::cell_edge(cell.coord(), side, w))
    }
}
