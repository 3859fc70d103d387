//! The [`Engine`] façade.

use pathgrid_core::{CellId, Coord, Grid, GridMode};
use pathgrid_search::{Algorithm, Heuristic, SearchError, SearchState, SearchStatus};
use rand::prelude::*;
use rand::rngs::StdRng;

use crate::config::{EngineConfig, validate_grid_size};
use crate::error::EngineError;
use crate::view::CellView;

/// One grid plus one step-wise search, driven by an external frame loop.
///
/// The host calls [`tick`](Self::tick) once per frame and reads
/// [`cells`](Self::cells) / [`status`](Self::status) to draw. Whether the
/// search advances at all is decided here by the active flag
/// ([`start_search`](Self::start_search) / [`pause_search`](Self::pause_search)),
/// never by the search itself.
///
/// Every operation is synchronous and bounded; regenerating or resetting
/// simply discards the in-flight search.
pub struct Engine {
    config: EngineConfig,
    grid: Grid,
    search: SearchState,
    rng: StdRng,
    active: bool,
    on_path: Vec<bool>,
}

impl Engine {
    /// Build an engine and its first grid from `config`.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::rng().random()),
        };
        let mut grid = build_grid(&config, config.grid_size, config.mode, &mut rng)?;
        let search = SearchState::new(&mut grid, config.algorithm, config.heuristic);
        log::info!(
            "engine ready: {n}x{n} {mode} grid, {alg}",
            n = config.grid_size,
            mode = config.mode,
            alg = config.algorithm
        );
        Ok(Self {
            on_path: vec![false; grid.cell_count()],
            config,
            grid,
            search,
            rng,
            active: false,
        })
    }

    /// Build an engine around an existing grid, e.g. one from
    /// [`Grid::parse`]. The config's size and mode are updated to match it.
    ///
    /// Engines regenerate square grids, so a grid with `rows != cols` is
    /// rejected.
    pub fn from_grid(mut config: EngineConfig, mut grid: Grid) -> Result<Self, EngineError> {
        if grid.rows() != grid.cols() {
            return Err(EngineError::NonSquareGrid {
                rows: grid.rows(),
                cols: grid.cols(),
            });
        }
        config.grid_size = grid.rows();
        config.mode = grid.mode();
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::rng().random()),
        };
        let search = SearchState::new(&mut grid, config.algorithm, config.heuristic);
        Ok(Self {
            on_path: vec![false; grid.cell_count()],
            config,
            grid,
            search,
            rng,
            active: false,
        })
    }

    // -----------------------------------------------------------------------
    // Grid lifecycle
    // -----------------------------------------------------------------------

    /// Rebuild the grid at `n × n` in the current mode.
    ///
    /// `n == 0` is rejected and the current grid is kept.
    pub fn set_grid_size(&mut self, n: usize) -> Result<(), EngineError> {
        if let Err(e) = validate_grid_size(n) {
            log::warn!("rejected grid size {n}");
            return Err(e);
        }
        let grid = build_grid(&self.config, n, self.config.mode, &mut self.rng)?;
        self.config.grid_size = n;
        self.install(grid);
        Ok(())
    }

    /// Throw away the grid and search, and generate a fresh grid in `mode`.
    pub fn regenerate_grid(&mut self, mode: GridMode) -> Result<(), EngineError> {
        let grid = build_grid(&self.config, self.config.grid_size, mode, &mut self.rng)?;
        self.config.mode = mode;
        self.install(grid);
        Ok(())
    }

    fn install(&mut self, mut grid: Grid) {
        self.search = SearchState::new(&mut grid, self.config.algorithm, self.config.heuristic);
        self.on_path = vec![false; grid.cell_count()];
        self.grid = grid;
        self.active = false;
        log::info!(
            "regenerated {}x{} {} grid",
            self.grid.rows(),
            self.grid.cols(),
            self.grid.mode()
        );
    }

    /// Toggle an obstacle. The search is reset first. Returns whether the
    /// cell changed; the start cell can never be blocked.
    pub fn set_blocked(&mut self, c: Coord, blocked: bool) -> Result<bool, EngineError> {
        self.grid.check_editable(c)?;
        self.reset_search();
        Ok(self.grid.set_blocked(c, blocked)?)
    }

    // -----------------------------------------------------------------------
    // Search control
    // -----------------------------------------------------------------------

    /// Switch algorithm. Only a real change has an effect, and it always
    /// resets the search. Returns whether anything changed.
    pub fn switch_algorithm(&mut self, algorithm: Algorithm) -> bool {
        if self.config.algorithm == algorithm {
            return false;
        }
        self.config.algorithm = algorithm;
        self.reset_search();
        log::info!("switched to {algorithm}");
        true
    }

    /// Switch the A* heuristic, resetting on change.
    pub fn set_heuristic(&mut self, heuristic: Heuristic) -> bool {
        if self.config.heuristic == heuristic {
            return false;
        }
        self.config.heuristic = heuristic;
        self.reset_search();
        log::info!("switched heuristic to {heuristic}");
        true
    }

    /// Let subsequent ticks advance the search.
    pub fn start_search(&mut self) {
        self.active = true;
    }

    /// Stop advancing without discarding progress.
    pub fn pause_search(&mut self) {
        self.active = false;
    }

    /// Deactivate and reinitialise the search in place with the configured
    /// algorithm and heuristic. Grid geometry is kept.
    pub fn reset_search(&mut self) {
        self.active = false;
        if let Err(e) = self.reinitialise_search() {
            // The grid and search are always replaced together; rebuild if not.
            log::warn!("rebuilding search state: {e}");
            self.search =
                SearchState::new(&mut self.grid, self.config.algorithm, self.config.heuristic);
        }
        self.clear_path_mask();
    }

    fn reinitialise_search(&mut self) -> Result<(), SearchError> {
        self.search.set_algorithm(&mut self.grid, self.config.algorithm)?;
        self.search.set_heuristic(&mut self.grid, self.config.heuristic)?;
        self.search.reset(&mut self.grid)
    }

    /// Advance one step if the search is running; otherwise do nothing.
    /// Returns the status after the tick.
    pub fn tick(&mut self) -> Result<SearchStatus, EngineError> {
        if !self.is_running() {
            return Ok(self.search.status());
        }
        let status = self.search.step(&mut self.grid)?;
        match status {
            SearchStatus::GoalReached => {
                let path = self.search.reconstruct_path(&self.grid)?;
                for id in path {
                    self.on_path[id.index()] = true;
                }
                let moves = path.len() - 1;
                log::info!(
                    "{} reached the goal in {} steps, path of {moves} moves",
                    self.search.algorithm(),
                    self.search.steps()
                );
            }
            SearchStatus::NoSolution => {
                log::info!(
                    "{} found no solution after {} steps",
                    self.search.algorithm(),
                    self.search.steps()
                );
            }
            SearchStatus::Running => {}
        }
        Ok(status)
    }

    /// Tick until the search reaches a terminal state or `max_ticks` ticks
    /// have run. Does nothing unless the search is active.
    pub fn run_until_terminal(&mut self, max_ticks: usize) -> Result<SearchStatus, EngineError> {
        for _ in 0..max_ticks {
            if !self.is_running() {
                break;
            }
            self.tick()?;
        }
        Ok(self.status())
    }

    fn clear_path_mask(&mut self) {
        self.on_path.fill(false);
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Active and not yet terminal.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.active && self.search.status() == SearchStatus::Running
    }

    /// Whether the search has been started (and not paused or reset).
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.search.status().is_terminal()
    }

    #[inline]
    pub fn status(&self) -> SearchStatus {
        self.search.status()
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn search(&self) -> &SearchState {
        &self.search
    }

    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        self.config.algorithm
    }

    #[inline]
    pub fn mode(&self) -> GridMode {
        self.grid.mode()
    }

    /// The start-to-goal path once the goal has been reached.
    pub fn path(&self) -> Option<&[CellId]> {
        self.search.path()
    }

    /// Number of moves on the found path.
    pub fn path_len(&self) -> Option<usize> {
        self.path().map(|p| p.len() - 1)
    }

    /// Snapshot of the cell at `c`.
    pub fn cell_view(&self, c: Coord) -> Option<CellView> {
        self.grid.id(c).map(|id| self.view(id))
    }

    /// Snapshots of every cell, row-major.
    pub fn cells(&self) -> impl Iterator<Item = CellView> + '_ {
        self.grid.iter().map(|(id, _)| self.view(id))
    }

    fn view(&self, id: CellId) -> CellView {
        let cell = self.grid.cell(id);
        CellView {
            coord: cell.coord(),
            blocked: cell.blocked,
            walls: cell.walls,
            membership: self.search.membership(id),
            on_path: self.on_path[id.index()],
        }
    }
}

fn build_grid(
    config: &EngineConfig,
    n: usize,
    mode: GridMode,
    rng: &mut StdRng,
) -> Result<Grid, EngineError> {
    let cell_size = config.cell_size_for(n);
    let grid = match mode {
        GridMode::Obstacles => {
            Grid::with_obstacles(n, n, cell_size, config.obstacle_density, rng)?
        }
        GridMode::Maze => {
            let mut grid = Grid::new(n, n, cell_size)?;
            grid.generate_maze(rng);
            grid
        }
    };
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathgrid_core::GridError;
    use pathgrid_search::Membership;

    fn seeded(seed: u64) -> EngineConfig {
        EngineConfig::default().with_seed(seed)
    }

    fn open_engine(n: usize, algorithm: Algorithm) -> Engine {
        let grid = Grid::new(n, n, 10.0).unwrap();
        Engine::from_grid(seeded(1).with_algorithm(algorithm), grid).unwrap()
    }

    fn finish(engine: &mut Engine) -> SearchStatus {
        engine.start_search();
        let limit = engine.grid().cell_count() + 1;
        engine.run_until_terminal(limit).unwrap()
    }

    fn blocked_layout(engine: &Engine) -> Vec<bool> {
        engine.cells().map(|v| v.blocked).collect()
    }

    #[test]
    fn same_seed_same_grid() {
        let a = Engine::new(seeded(99).with_grid_size(12)).unwrap();
        let b = Engine::new(seeded(99).with_grid_size(12)).unwrap();
        assert_eq!(blocked_layout(&a), blocked_layout(&b));
        assert_eq!(a.grid().cell_size(), 50.0);
    }

    #[test]
    fn invalid_config_is_rejected() {
        assert_eq!(
            Engine::new(seeded(1).with_grid_size(0)).err(),
            Some(EngineError::InvalidGridSize(0))
        );
    }

    #[test]
    fn bad_grid_size_keeps_previous_grid() {
        let mut e = Engine::new(seeded(5).with_grid_size(6)).unwrap();
        let before = blocked_layout(&e);
        assert_eq!(e.set_grid_size(0), Err(EngineError::InvalidGridSize(0)));
        assert_eq!(e.grid().rows(), 6);
        assert_eq!(e.config().grid_size, 6);
        assert_eq!(blocked_layout(&e), before);
    }

    #[test]
    fn set_grid_size_rebuilds_and_deactivates() {
        let mut e = Engine::new(seeded(5)).unwrap();
        e.start_search();
        e.tick().unwrap();
        e.set_grid_size(9).unwrap();
        assert_eq!((e.grid().rows(), e.grid().cols()), (9, 9));
        assert!(!e.is_active());
        assert_eq!(e.status(), SearchStatus::Running);
        assert_eq!(e.search().steps(), 0);
        assert_eq!(e.cells().count(), 81);
    }

    #[test]
    fn tick_does_nothing_until_started() {
        let mut e = open_engine(4, Algorithm::AStar);
        for _ in 0..3 {
            assert_eq!(e.tick(), Ok(SearchStatus::Running));
        }
        assert_eq!(e.search().steps(), 0);
        assert!(!e.is_running());

        e.start_search();
        assert!(e.is_running());
        e.tick().unwrap();
        assert_eq!(e.search().steps(), 1);

        e.pause_search();
        e.tick().unwrap();
        assert_eq!(e.search().steps(), 1);
    }

    #[test]
    fn open_grid_path_is_manhattan_for_both_algorithms() {
        for alg in [Algorithm::AStar, Algorithm::Dijkstra] {
            let mut e = open_engine(5, alg);
            assert_eq!(finish(&mut e), SearchStatus::GoalReached);
            assert!(e.is_terminal());
            assert!(!e.is_running());
            assert_eq!(e.path_len(), Some(8));
            assert_eq!(e.cells().filter(|v| v.on_path).count(), 9);
            assert!(e.cell_view(Coord::ZERO).unwrap().on_path);
            assert!(e.cell_view(Coord::new(4, 4)).unwrap().on_path);
        }
    }

    #[test]
    fn ticks_after_terminal_are_harmless() {
        let mut e = open_engine(3, Algorithm::AStar);
        finish(&mut e);
        let steps = e.search().steps();
        assert_eq!(e.tick(), Ok(SearchStatus::GoalReached));
        assert_eq!(e.search().steps(), steps);
    }

    #[test]
    fn mazes_are_always_solvable_and_algorithms_agree() {
        for seed in 0..20 {
            let mut a = Engine::new(seeded(seed).with_grid_size(9).with_mode(GridMode::Maze)).unwrap();
            assert_eq!(a.mode(), GridMode::Maze);
            assert_eq!(finish(&mut a), SearchStatus::GoalReached, "seed {seed}");
            let astar_len = a.path_len();

            assert!(a.switch_algorithm(Algorithm::Dijkstra));
            assert_eq!(finish(&mut a), SearchStatus::GoalReached, "seed {seed}");
            assert_eq!(a.path_len(), astar_len, "seed {seed}");
        }
    }

    #[test]
    fn regenerate_switches_mode_and_discards_search() {
        let mut e = Engine::new(seeded(3).with_grid_size(6)).unwrap();
        e.start_search();
        e.tick().unwrap();
        e.regenerate_grid(GridMode::Maze).unwrap();
        assert_eq!(e.mode(), GridMode::Maze);
        assert_eq!(e.config().mode, GridMode::Maze);
        assert!(!e.is_active());
        assert_eq!(e.search().open_cells(), &[e.grid().start()]);
        assert!(e.cells().all(|v| !v.blocked));

        e.regenerate_grid(GridMode::Obstacles).unwrap();
        assert_eq!(e.mode(), GridMode::Obstacles);
        assert!(e.cells().all(|v| v.walls.count() == 0));
    }

    #[test]
    fn blocked_goal_reports_no_solution() {
        let grid = Grid::parse("...\n.#.\n..#", 1.0).unwrap();
        let mut e = Engine::from_grid(seeded(1), grid).unwrap();
        assert_eq!(finish(&mut e), SearchStatus::NoSolution);
        assert!(e.is_terminal());
        assert_eq!(e.path(), None);
        assert!(e.cells().all(|v| !v.on_path));
    }

    #[test]
    fn switching_to_same_algorithm_keeps_progress() {
        let mut e = open_engine(5, Algorithm::AStar);
        e.start_search();
        e.tick().unwrap();
        e.tick().unwrap();
        assert!(!e.switch_algorithm(Algorithm::AStar));
        assert!(e.is_active());
        assert_eq!(e.search().steps(), 2);

        assert!(e.switch_algorithm(Algorithm::Dijkstra));
        assert!(!e.is_active());
        assert_eq!(e.search().steps(), 0);
        assert_eq!(e.search().algorithm(), Algorithm::Dijkstra);
    }

    #[test]
    fn reset_is_idempotent_and_clears_path() {
        let mut e = open_engine(4, Algorithm::AStar);
        e.reset_search();
        e.reset_search();
        assert_eq!(e.search().open_cells(), &[e.grid().start()]);

        finish(&mut e);
        assert!(e.cells().any(|v| v.on_path));
        e.reset_search();
        e.reset_search();
        assert_eq!(e.status(), SearchStatus::Running);
        assert_eq!(e.search().open_cells(), &[e.grid().start()]);
        assert!(e.cells().all(|v| !v.on_path));
        assert_eq!(e.path(), None);
    }

    #[test]
    fn views_mirror_search_sets() {
        let mut e = open_engine(6, Algorithm::Dijkstra);
        e.start_search();
        for _ in 0..7 {
            e.tick().unwrap();
        }
        let open = e.cells().filter(|v| v.membership == Membership::Open).count();
        let closed = e.cells().filter(|v| v.membership == Membership::Closed).count();
        assert_eq!(open, e.search().open_cells().len());
        assert_eq!(closed, e.search().closed_cells().len());
        assert_eq!(closed, 7);
    }

    #[test]
    fn set_blocked_resets_search() {
        let mut e = open_engine(4, Algorithm::AStar);
        e.start_search();
        e.tick().unwrap();
        assert_eq!(e.set_blocked(Coord::new(1, 1), true), Ok(true));
        assert!(!e.is_active());
        assert_eq!(e.search().steps(), 0);
        assert!(e.cell_view(Coord::new(1, 1)).unwrap().blocked);
        assert_eq!(e.set_blocked(Coord::ZERO, true), Ok(false));
        assert!(matches!(
            e.set_blocked(Coord::new(4, 0), true),
            Err(EngineError::Grid(_))
        ));
    }

    #[test]
    fn set_blocked_is_refused_on_mazes_without_touching_the_search() {
        let mut e = Engine::new(seeded(3).with_grid_size(4).with_mode(GridMode::Maze)).unwrap();
        e.start_search();
        e.tick().unwrap();
        let walls: Vec<_> = e.cells().map(|v| v.walls).collect();

        assert_eq!(
            e.set_blocked(Coord::new(1, 1), true),
            Err(EngineError::Grid(GridError::WrongMode {
                expected: GridMode::Obstacles,
                found: GridMode::Maze,
            }))
        );
        assert!(e.cells().all(|v| !v.blocked));
        assert_eq!(e.cells().map(|v| v.walls).collect::<Vec<_>>(), walls);
        assert!(e.is_active());
        assert_eq!(e.search().steps(), 1);
    }

    #[test]
    fn non_square_grids_are_rejected() {
        let grid = Grid::parse("...\n...", 1.0).unwrap();
        assert_eq!((grid.rows(), grid.cols()), (2, 3));
        assert_eq!(
            Engine::from_grid(seeded(1), grid).err(),
            Some(EngineError::NonSquareGrid { rows: 2, cols: 3 })
        );
    }

    #[test]
    fn termination_bound_holds_through_the_facade() {
        for seed in 0..30 {
            let mut e = Engine::new(seeded(seed).with_grid_size(7)).unwrap();
            let n = e.grid().cell_count();
            e.start_search();
            let status = e.run_until_terminal(n).unwrap();
            assert!(status.is_terminal(), "seed {seed}");
        }
    }
}
