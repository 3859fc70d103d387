//! Engine façade for pathgrid: the single object a rendering layer drives.
//!
//! An [`Engine`] owns one [`Grid`](pathgrid_core::Grid) and one
//! [`SearchState`](pathgrid_search::SearchState) and exposes the handful of
//! operations a UI needs: resize, regenerate (obstacles or maze), switch
//! algorithm, start / pause / reset, and a per-frame [`Engine::tick`]. All
//! state lives in the instance, so any number of engines can coexist.
//!
//! ```
//! use pathgrid_engine::{Engine, EngineConfig};
//! use pathgrid_core::GridMode;
//!
//! let mut engine = Engine::new(
//!     EngineConfig::default().with_grid_size(8).with_mode(GridMode::Maze).with_seed(1),
//! )?;
//! engine.start_search();
//! while engine.is_running() {
//!     engine.tick()?;
//! }
//! assert!(engine.path_len().is_some());
//! # Ok::<(), pathgrid_engine::EngineError>(())
//! ```
//!
//! The engine is single-threaded; hosts that share one across threads must
//! wrap it in their own lock.

mod config;
mod engine;
mod error;
mod view;

pub use config::EngineConfig;
pub use engine::Engine;
pub use error::EngineError;
pub use view::CellView;
