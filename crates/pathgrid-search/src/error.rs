use std::fmt;

use pathgrid_core::Coord;

use crate::state::SearchStatus;

/// Protocol misuse of a [`SearchState`](crate::SearchState).
///
/// Every error leaves the state exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// `step` was called after the search reached a terminal state.
    Finished(SearchStatus),
    /// A path was requested before the goal was reached.
    GoalNotReached(SearchStatus),
    /// The state was driven against a grid with a different cell count.
    GridMismatch { expected: usize, found: usize },
    /// A back-pointer chain from the goal stopped before reaching the start.
    BrokenChain { at: Coord },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finished(status) => write!(f, "search already finished: {status}"),
            Self::GoalNotReached(status) => {
                write!(f, "no path to reconstruct, search is {status}")
            }
            Self::GridMismatch { expected, found } => write!(
                f,
                "search was built for {expected} cells but the grid has {found}"
            ),
            Self::BrokenChain { at } => {
                write!(f, "back-pointer chain ends at {at} before reaching the start")
            }
        }
    }
}

impl std::error::Error for SearchError {}
