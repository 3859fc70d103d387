//! **pathgrid-core** — the grid-graph model behind step-wise path searches.
//!
//! A [`Grid`] exclusively owns a dense table of [`Cell`]s. Cells refer to
//! each other only through [`CellId`] handles (indices into that table), so
//! neighbour lists and search back-pointers never own anything.
//!
//! Grids come in two mutually exclusive [`GridMode`]s:
//!
//! - **Obstacles**: whole cells are blocked at random
//!   ([`Grid::with_obstacles`]) or from a text layout ([`Grid::parse`]).
//! - **Maze**: per-edge walls carved by a randomized depth-first backtracker
//!   ([`Grid::generate_maze`]).

pub mod cell;
pub mod error;
pub mod geom;
pub mod grid;
mod layout;
mod maze;

pub use cell::{Cell, CellId, Metrics, Walls};
pub use error::GridError;
pub use geom::{Coord, Segment, Side};
pub use grid::{Grid, GridMode};
