//! The closed set of search variants and their heuristics.

use std::fmt;
use std::str::FromStr;

use pathgrid_core::{Coord, Metrics};

use crate::distance::{euclidean, manhattan};

/// Which shortest-path search a [`SearchState`](crate::SearchState) runs.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    /// Best-first on `f = g + h`.
    #[default]
    AStar,
    /// Uniform-cost on `g`; A* with `h ≡ 0`.
    Dijkstra,
}

impl Algorithm {
    /// Whether the variant estimates remaining cost.
    #[inline]
    pub fn uses_heuristic(self) -> bool {
        matches!(self, Self::AStar)
    }

    /// The key minimised when picking the next open cell.
    #[inline]
    pub fn priority(self, m: &Metrics) -> f64 {
        match self {
            Self::AStar => m.f,
            Self::Dijkstra => m.g,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AStar => f.write_str("A*"),
            Self::Dijkstra => f.write_str("Dijkstra"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "astar" | "a*" | "a-star" => Ok(Self::AStar),
            "dijkstra" => Ok(Self::Dijkstra),
            _ => Err(format!("unknown algorithm `{s}` (expected astar or dijkstra)")),
        }
    }
}

/// Admissible distance estimate used by A*.
///
/// Both choices are consistent for unit-cost 4-way moves, so A* stays
/// optimal with either.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heuristic {
    #[default]
    Euclidean,
    Manhattan,
}

impl Heuristic {
    /// Estimated cost from `from` to `to`.
    #[inline]
    pub fn estimate(self, from: Coord, to: Coord) -> f64 {
        match self {
            Self::Euclidean => euclidean(from, to),
            Self::Manhattan => manhattan(from, to),
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Euclidean => f.write_str("euclidean"),
            Self::Manhattan => f.write_str("manhattan"),
        }
    }
}

impl FromStr for Heuristic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "euclidean" | "l2" => Ok(Self::Euclidean),
            "manhattan" | "l1" => Ok(Self::Manhattan),
            _ => Err(format!(
                "unknown heuristic `{s}` (expected euclidean or manhattan)"
            )),
        }
    }
}
