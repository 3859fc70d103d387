//! [`EngineConfig`]: everything needed to build an [`Engine`](crate::Engine).

use pathgrid_core::GridMode;
use pathgrid_search::{Algorithm, Heuristic};

use crate::error::EngineError;

/// Configuration for creating an [`Engine`](crate::Engine).
///
/// Defaults match the classic visualiser: a 5×5 grid, 30 % obstacles,
/// A* with the Euclidean heuristic, 30 frames per second.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Rows and columns of the (square) grid.
    pub grid_size: usize,
    /// Drawing extent of the whole grid; each cell is
    /// `cell_extent / grid_size` wide.
    pub cell_extent: f32,
    /// Probability that a non-start cell is blocked in obstacle mode.
    pub obstacle_density: f64,
    pub mode: GridMode,
    pub algorithm: Algorithm,
    pub heuristic: Heuristic,
    /// Seed for grid and maze generation. `None` seeds from the thread RNG.
    pub seed: Option<u64>,
    /// Frames per second a host should tick at. The engine itself keeps no
    /// time.
    pub frame_rate: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_size: 5,
            cell_extent: 600.0,
            obstacle_density: 0.3,
            mode: GridMode::Obstacles,
            algorithm: Algorithm::AStar,
            heuristic: Heuristic::Euclidean,
            seed: None,
            frame_rate: 30,
        }
    }
}

impl EngineConfig {
    pub fn with_grid_size(mut self, n: usize) -> Self {
        self.grid_size = n;
        self
    }

    pub fn with_cell_extent(mut self, extent: f32) -> Self {
        self.cell_extent = extent;
        self
    }

    pub fn with_obstacle_density(mut self, p: f64) -> Self {
        self.obstacle_density = p;
        self
    }

    pub fn with_mode(mut self, mode: GridMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_frame_rate(mut self, fps: u32) -> Self {
        self.frame_rate = fps;
        self
    }

    /// Width of one cell for a grid of `n` cells per side.
    #[inline]
    pub fn cell_size_for(&self, n: usize) -> f32 {
        self.cell_extent / n.max(1) as f32
    }

    /// Check every field, reporting the first invalid one.
    pub fn validate(&self) -> Result<(), EngineError> {
        validate_grid_size(self.grid_size)?;
        if !(0.0..=1.0).contains(&self.obstacle_density) {
            return Err(EngineError::InvalidObstacleDensity(self.obstacle_density));
        }
        if !self.cell_extent.is_finite() || self.cell_extent <= 0.0 {
            return Err(EngineError::InvalidCellExtent(self.cell_extent));
        }
        if self.frame_rate == 0 {
            return Err(EngineError::InvalidFrameRate(self.frame_rate));
        }
        Ok(())
    }
}

pub(crate) fn validate_grid_size(n: usize) -> Result<(), EngineError> {
    if n == 0 {
        return Err(EngineError::InvalidGridSize(n));
    }
    Ok(())
}
