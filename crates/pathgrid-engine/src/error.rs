use std::fmt;

use pathgrid_core::GridError;
use pathgrid_search::SearchError;

/// Errors surfaced by the [`Engine`](crate::Engine).
///
/// A failed call never changes the engine: the previous grid and search
/// state stay in place.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Grid size must be at least 1.
    InvalidGridSize(usize),
    /// Obstacle density must be a probability in `[0, 1]`.
    InvalidObstacleDensity(f64),
    /// The drawing extent must be positive and finite.
    InvalidCellExtent(f32),
    /// The frame rate must be at least 1.
    InvalidFrameRate(u32),
    /// Engines only drive square grids.
    NonSquareGrid { rows: usize, cols: usize },
    Grid(GridError),
    Search(SearchError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGridSize(n) => write!(f, "grid size must be at least 1, got {n}"),
            Self::InvalidObstacleDensity(p) => {
                write!(f, "obstacle density must be within [0, 1], got {p}")
            }
            Self::InvalidCellExtent(e) => {
                write!(f, "drawing extent must be positive and finite, got {e}")
            }
            Self::InvalidFrameRate(r) => write!(f, "frame rate must be at least 1, got {r}"),
            Self::NonSquareGrid { rows, cols } => {
                write!(f, "engine grids must be square, got {rows}x{cols}")
            }
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::Search(e) => write!(f, "search: {e}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            Self::Search(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for EngineError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<SearchError> for EngineError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}
