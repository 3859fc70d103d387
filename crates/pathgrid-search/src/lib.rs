//! Incremental shortest-path searches over a [`pathgrid_core::Grid`].
//!
//! A [`SearchState`] runs either **A\*** (minimum `f = g + h`) or
//! **Dijkstra** (minimum `g`) and advances exactly one expansion per call to
//! [`SearchState::step`], so a renderer can draw the open and closed sets
//! frame by frame and abandon or reset the search at any point.
//!
//! | State | Entered when |
//! |---|---|
//! | [`SearchStatus::Running`] | construction or [`SearchState::reset`] |
//! | [`SearchStatus::GoalReached`] | the goal is selected from the open set |
//! | [`SearchStatus::NoSolution`] | the open set runs dry |
//!
//! Edges have unit cost, and a cell is enterable when it is not blocked and
//! its wall facing the mover is open.

mod algorithm;
mod distance;
mod error;
mod state;

pub use algorithm::{Algorithm, Heuristic};
pub use distance::{euclidean, manhattan};
pub use error::SearchError;
pub use state::{Membership, SearchState, SearchStatus};
