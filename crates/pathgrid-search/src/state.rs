//! [`SearchState`]: an A* / Dijkstra search that advances one expansion per
//! call to [`SearchState::step`].

use std::fmt;

use pathgrid_core::{CellId, Grid};

use crate::algorithm::{Algorithm, Heuristic};
use crate::error::SearchError;

/// Where a search stands.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStatus {
    #[default]
    Running,
    GoalReached,
    NoSolution,
}

impl SearchStatus {
    /// Whether no further steps are possible.
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => f.write_str("running"),
            Self::GoalReached => f.write_str("goal reached"),
            Self::NoSolution => f.write_str("no solution"),
        }
    }
}

/// Search-set membership of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Membership {
    #[default]
    Neither,
    Open,
    Closed,
}

/// Uniform cost of moving between adjacent cells.
const EDGE_COST: f64 = 1.0;

/// Incremental shortest-path search from a grid's start to its goal.
///
/// The state does not hold on to the grid. Each call borrows it, and the
/// per-cell `g`/`h`/`f`/`came_from` metrics live in the grid's cells. One
/// state must always be driven against the same grid.
///
/// The open set is an insertion-ordered list scanned linearly for its
/// minimum, so ties go to the earliest-inserted cell and runs are
/// deterministic. Membership is tracked in a flat table for O(1) lookups.
#[derive(Clone, Debug)]
pub struct SearchState {
    algorithm: Algorithm,
    heuristic: Heuristic,
    start: CellId,
    goal: CellId,
    open: Vec<CellId>,
    closed: Vec<CellId>,
    membership: Vec<Membership>,
    current: Option<CellId>,
    path: Option<Vec<CellId>>,
    status: SearchStatus,
    steps: usize,
    // scratch buffer for neighbour iteration
    nbuf: Vec<CellId>,
}

impl SearchState {
    /// Create a search over `grid` from its start to its goal, resetting the
    /// grid's search metadata.
    pub fn new(grid: &mut Grid, algorithm: Algorithm, heuristic: Heuristic) -> Self {
        let mut state = Self {
            algorithm,
            heuristic,
            start: grid.start(),
            goal: grid.goal(),
            open: Vec::new(),
            closed: Vec::new(),
            membership: vec![Membership::Neither; grid.cell_count()],
            current: None,
            path: None,
            status: SearchStatus::Running,
            steps: 0,
            nbuf: Vec::with_capacity(4),
        };
        state.reinitialise(grid);
        state
    }

    /// Return to the initial `Running` state with `open = {start}`.
    ///
    /// Clears the grid's search metrics but never its walls or obstacles.
    pub fn reset(&mut self, grid: &mut Grid) -> Result<(), SearchError> {
        self.check_grid(grid)?;
        self.reinitialise(grid);
        Ok(())
    }

    fn reinitialise(&mut self, grid: &mut Grid) {
        grid.reset_all();
        self.open.clear();
        self.closed.clear();
        self.membership.fill(Membership::Neither);
        self.current = None;
        self.path = None;
        self.status = SearchStatus::Running;
        self.steps = 0;

        if self.algorithm.uses_heuristic() {
            let h = self
                .heuristic
                .estimate(grid.coord(self.start), grid.coord(self.goal));
            let m = &mut grid.cell_mut(self.start).metrics;
            m.h = h;
            m.f = h;
        }
        self.open.push(self.start);
        self.membership[self.start.index()] = Membership::Open;
    }

    /// Swap the search variant and reset. Returns `false` (and does nothing)
    /// if `algorithm` is already active.
    pub fn set_algorithm(
        &mut self,
        grid: &mut Grid,
        algorithm: Algorithm,
    ) -> Result<bool, SearchError> {
        if self.algorithm == algorithm {
            return Ok(false);
        }
        self.check_grid(grid)?;
        self.algorithm = algorithm;
        self.reinitialise(grid);
        Ok(true)
    }

    /// Swap the A* heuristic and reset. Returns `false` if unchanged.
    pub fn set_heuristic(
        &mut self,
        grid: &mut Grid,
        heuristic: Heuristic,
    ) -> Result<bool, SearchError> {
        if self.heuristic == heuristic {
            return Ok(false);
        }
        self.check_grid(grid)?;
        self.heuristic = heuristic;
        self.reinitialise(grid);
        Ok(true)
    }

    fn check_grid(&self, grid: &Grid) -> Result<(), SearchError> {
        if grid.cell_count() != self.membership.len() {
            return Err(SearchError::GridMismatch {
                expected: self.membership.len(),
                found: grid.cell_count(),
            });
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Stepping
    // -----------------------------------------------------------------------

    /// Perform one expansion.
    ///
    /// 1. An empty open set ends the search with [`SearchStatus::NoSolution`].
    /// 2. The open cell with the smallest priority becomes `current`.
    /// 3. If `current` is the goal the search ends with
    ///    [`SearchStatus::GoalReached`].
    /// 4. Otherwise `current` is closed and each enterable, unclosed
    ///    neighbour is opened or relaxed through it.
    ///
    /// Calling this after a terminal state is an error.
    pub fn step(&mut self, grid: &mut Grid) -> Result<SearchStatus, SearchError> {
        self.check_grid(grid)?;
        if self.status.is_terminal() {
            return Err(SearchError::Finished(self.status));
        }
        self.steps += 1;

        let Some(pos) = self.select_min(grid) else {
            self.status = SearchStatus::NoSolution;
            log::debug!("open set exhausted after {} steps", self.steps);
            return Ok(self.status);
        };

        let current = self.open[pos];
        self.current = Some(current);
        if current == self.goal {
            self.status = SearchStatus::GoalReached;
            log::debug!("goal reached after {} steps", self.steps);
            return Ok(self.status);
        }

        self.open.remove(pos);
        self.closed.push(current);
        self.membership[current.index()] = Membership::Closed;

        let current_g = grid.cell(current).metrics.g;
        let goal_coord = grid.coord(self.goal);

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        nbuf.extend_from_slice(grid.cell(current).neighbours());

        for &n in nbuf.iter() {
            if !grid.can_enter(current, n) {
                continue;
            }
            let tentative_g = current_g + EDGE_COST;
            let improved = match self.membership[n.index()] {
                Membership::Closed => continue,
                Membership::Open => tentative_g < grid.cell(n).metrics.g,
                Membership::Neither => {
                    self.open.push(n);
                    self.membership[n.index()] = Membership::Open;
                    true
                }
            };
            if !improved {
                continue;
            }

            let h = if self.algorithm.uses_heuristic() {
                self.heuristic.estimate(grid.coord(n), goal_coord)
            } else {
                0.0
            };
            let m = &mut grid.cell_mut(n).metrics;
            m.g = tentative_g;
            m.h = h;
            m.f = tentative_g + h;
            m.came_from = Some(current);
        }

        self.nbuf = nbuf;
        Ok(self.status)
    }

    /// Position in `open` of the first cell with the minimal priority key.
    fn select_min(&self, grid: &Grid) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (pos, &id) in self.open.iter().enumerate() {
            let key = self.algorithm.priority(&grid.cell(id).metrics);
            if best.is_none_or(|(_, k)| key < k) {
                best = Some((pos, key));
            }
        }
        best.map(|(pos, _)| pos)
    }

    // -----------------------------------------------------------------------
    // Path reconstruction
    // -----------------------------------------------------------------------

    /// The path from start to goal, inclusive of both.
    ///
    /// Only valid once the goal is reached; partial back-pointer chains are
    /// never returned. The path is built on first request and cached.
    pub fn reconstruct_path(&mut self, grid: &Grid) -> Result<&[CellId], SearchError> {
        if self.status != SearchStatus::GoalReached {
            return Err(SearchError::GoalNotReached(self.status));
        }
        self.check_grid(grid)?;

        if self.path.is_none() {
            let mut path = vec![self.goal];
            let mut at = self.goal;
            while at != self.start {
                let Some(prev) = grid.cell(at).metrics.came_from else {
                    return Err(SearchError::BrokenChain { at: grid.coord(at) });
                };
                if path.len() >= grid.cell_count() {
                    return Err(SearchError::BrokenChain { at: grid.coord(at) });
                }
                path.push(prev);
                at = prev;
            }
            path.reverse();
            self.path = Some(path);
        }

        Ok(self.path.as_deref().unwrap_or_default())
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    #[inline]
    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    #[inline]
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    #[inline]
    pub fn start(&self) -> CellId {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> CellId {
        self.goal
    }

    /// The most recently selected cell.
    #[inline]
    pub fn current(&self) -> Option<CellId> {
        self.current
    }

    /// Frontier cells in insertion order.
    #[inline]
    pub fn open_cells(&self) -> &[CellId] {
        &self.open
    }

    /// Finalized cells in the order they were closed.
    #[inline]
    pub fn closed_cells(&self) -> &[CellId] {
        &self.closed
    }

    /// Membership of `id`. Ids from a different grid read as `Neither`.
    #[inline]
    pub fn membership(&self, id: CellId) -> Membership {
        self.membership
            .get(id.index())
            .copied()
            .unwrap_or_default()
    }

    /// The cached path, if [`reconstruct_path`](Self::reconstruct_path) has
    /// succeeded since the last reset.
    #[inline]
    pub fn path(&self) -> Option<&[CellId]> {
        self.path.as_deref()
    }

    /// Number of `step` calls since the last reset.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }
}
