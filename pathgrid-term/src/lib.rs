//! Terminal front end for pathgrid: frame composition, key bindings and the
//! viewer state the frame loop in `main.rs` drives.
//!
//! The grid is drawn on a `(2·rows + 1) × (2·cols + 1)` glyph lattice: odd
//! rows/columns hold cells, even ones hold the edges and corners between
//! them, so maze walls get their own characters.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::event::KeyCode;
use crossterm::style::{self, Color, Print, SetForegroundColor};
use crossterm::{cursor, queue, terminal};

use pathgrid_core::{Coord, GridMode, Side};
use pathgrid_engine::{CellView, Engine, EngineError};
use pathgrid_search::{Algorithm, Membership, SearchStatus};

/// Largest grid the viewer will grow to.
pub const MAX_GRID_SIZE: usize = 40;

pub const HELP: &str =
    "space start  p pause  r reset  n new grid  m maze  a A*  d Dijkstra  +/- size  q quit";

// ---------------------------------------------------------------------------
// Glyphs
// ---------------------------------------------------------------------------

/// One character position of a composed frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Glyph {
    Empty,
    Wall,
    Post,
    Blocked,
    Open,
    Closed,
    Path,
    Start,
    Goal,
}

impl Glyph {
    pub fn ch(self) -> char {
        match self {
            Glyph::Empty => ' ',
            Glyph::Wall => '#',
            Glyph::Post => '+',
            Glyph::Blocked => '█',
            Glyph::Open => 'o',
            Glyph::Closed => '·',
            Glyph::Path => '*',
            Glyph::Start => 'S',
            Glyph::Goal => 'G',
        }
    }

    pub fn color(self) -> Color {
        match self {
            Glyph::Empty => Color::Reset,
            Glyph::Wall | Glyph::Post => Color::Grey,
            Glyph::Blocked => Color::DarkGrey,
            Glyph::Open => Color::Green,
            Glyph::Closed => Color::Red,
            Glyph::Path => Color::Blue,
            Glyph::Start | Glyph::Goal => Color::Yellow,
        }
    }
}

fn cell_glyph(v: &CellView, goal: Coord) -> Glyph {
    if v.coord == Coord::ZERO {
        Glyph::Start
    } else if v.coord == goal && !v.blocked {
        Glyph::Goal
    } else if v.blocked {
        Glyph::Blocked
    } else if v.on_path {
        Glyph::Path
    } else {
        match v.membership {
            Membership::Open => Glyph::Open,
            Membership::Closed => Glyph::Closed,
            Membership::Neither => Glyph::Empty,
        }
    }
}

/// Compose the engine's current state into a glyph lattice.
pub fn compose(engine: &Engine) -> Vec<Vec<Glyph>> {
    let grid = engine.grid();
    let (rows, cols) = (grid.rows(), grid.cols());
    let goal = grid.coord(grid.goal());
    let views: Vec<CellView> = engine.cells().collect();
    let at = |i: usize, j: usize| &views[i * cols + j];

    let mut frame = vec![vec![Glyph::Empty; 2 * cols + 1]; 2 * rows + 1];

    for i in 0..rows {
        for j in 0..cols {
            frame[2 * i + 1][2 * j + 1] = cell_glyph(at(i, j), goal);
        }
    }

    // Horizontal edges: between (i - 1, j) and (i, j).
    for i in 0..=rows {
        for j in 0..cols {
            let above = (i > 0).then(|| at(i - 1, j));
            let below = (i < rows).then(|| at(i, j));
            frame[2 * i][2 * j + 1] = edge_glyph(above, below, Side::South);
        }
    }

    // Vertical edges: between (i, j - 1) and (i, j).
    for i in 0..rows {
        for j in 0..=cols {
            let left = (j > 0).then(|| at(i, j - 1));
            let right = (j < cols).then(|| at(i, j));
            frame[2 * i + 1][2 * j] = edge_glyph(left, right, Side::East);
        }
    }

    // Corners get a post wherever a wall meets them.
    for r in (0..=2 * rows).step_by(2) {
        for c in (0..=2 * cols).step_by(2) {
            let touches_wall = [
                r.checked_sub(1).map(|r| frame[r][c]),
                frame.get(r + 1).map(|row| row[c]),
                c.checked_sub(1).map(|c| frame[r][c]),
                frame[r].get(c + 1).copied(),
            ]
            .into_iter()
            .flatten()
            .any(|g| g == Glyph::Wall);
            if touches_wall {
                frame[r][c] = Glyph::Post;
            }
        }
    }

    frame
}

/// Glyph for the edge between `a` and `b`, where `side` is the side of `a`
/// that faces `b`. A missing cell means the outer border.
fn edge_glyph(a: Option<&CellView>, b: Option<&CellView>, side: Side) -> Glyph {
    match (a, b) {
        (Some(a), Some(b)) => {
            if a.walls.is_sealed(side) || b.walls.is_sealed(side.opposite()) {
                Glyph::Wall
            } else if a.on_path && b.on_path {
                Glyph::Path
            } else {
                Glyph::Empty
            }
        }
        _ => Glyph::Wall,
    }
}

/// The one-line summary shown under the grid.
pub fn status_line(engine: &Engine) -> String {
    let grid = engine.grid();
    let state = match (engine.status(), engine.is_active()) {
        (SearchStatus::Running, true) => "running".to_string(),
        (SearchStatus::Running, false) if engine.search().steps() > 0 => "paused".to_string(),
        (SearchStatus::Running, false) => "ready".to_string(),
        (SearchStatus::GoalReached, _) => match engine.path_len() {
            Some(n) => format!("goal reached, path {n}"),
            None => "goal reached".to_string(),
        },
        (SearchStatus::NoSolution, _) => "no solution".to_string(),
    };
    format!(
        "{} | {} {}x{} | {} | steps {} | open {} closed {}",
        engine.algorithm(),
        engine.mode(),
        grid.rows(),
        grid.cols(),
        state,
        engine.search().steps(),
        engine.search().open_cells().len(),
        engine.search().closed_cells().len(),
    )
}

/// Write one frame to `out` in place. Each line clears its own tail and
/// everything below the help line is cleared, so a shrinking grid leaves
/// nothing behind. The screen is never cleared as a whole.
pub fn draw<W: Write>(out: &mut W, viewer: &Viewer) -> io::Result<()> {
    let frame = compose(&viewer.engine);
    for (y, row) in frame.iter().enumerate() {
        queue!(out, cursor::MoveTo(0, y as u16))?;
        for g in row {
            queue!(out, SetForegroundColor(g.color()), Print(g.ch()))?;
        }
        queue!(out, terminal::Clear(terminal::ClearType::UntilNewLine))?;
    }
    let y = frame.len() as u16;
    let lines = [
        String::new(),
        status_line(&viewer.engine),
        viewer.notice.clone().unwrap_or_default(),
        HELP.to_string(),
    ];
    queue!(out, style::ResetColor)?;
    for (k, line) in lines.iter().enumerate() {
        queue!(
            out,
            cursor::MoveTo(0, y + k as u16),
            Print(line),
            terminal::Clear(terminal::ClearType::UntilNewLine)
        )?;
    }
    queue!(out, terminal::Clear(terminal::ClearType::FromCursorDown))?;
    out.flush()
}

/// Fixed-rate frame schedule. Frames that fall behind are dropped rather
/// than replayed in a burst.
#[derive(Copy, Clone, Debug)]
pub struct FrameClock {
    period: Duration,
    next: Instant,
}

impl FrameClock {
    /// A clock running at `fps` frames per second whose first frame is due
    /// at `now`.
    pub fn new(fps: u32, now: Instant) -> Self {
        Self {
            period: Duration::from_secs(1) / fps.max(1),
            next: now,
        }
    }

    /// If a frame is due at `now`, schedule the next one and return `true`.
    pub fn advance(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }
        self.next += self.period;
        if self.next <= now {
            self.next = now + self.period;
        }
        true
    }

    /// How long input may be waited for before the next frame is due.
    pub fn timeout(&self, now: Instant) -> Duration {
        self.next.saturating_duration_since(now)
    }
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Something the user asked the viewer to do.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Start,
    Pause,
    Reset,
    NewGrid,
    NewMaze,
    UseAlgorithm(Algorithm),
    Grow,
    Shrink,
    Quit,
}

/// Key bindings.
pub fn action_for_key(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Char('s') => Some(Action::Start),
        KeyCode::Char('p') => Some(Action::Pause),
        KeyCode::Char('r') => Some(Action::Reset),
        KeyCode::Char('n') => Some(Action::NewGrid),
        KeyCode::Char('m') => Some(Action::NewMaze),
        KeyCode::Char('a') => Some(Action::UseAlgorithm(Algorithm::AStar)),
        KeyCode::Char('d') => Some(Action::UseAlgorithm(Algorithm::Dijkstra)),
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => Some(Action::Grow),
        KeyCode::Char('-') | KeyCode::Down => Some(Action::Shrink),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

/// Whether the frame loop should keep going.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

// ---------------------------------------------------------------------------
// Viewer
// ---------------------------------------------------------------------------

/// Viewer state: the engine plus a transient notice for the user.
pub struct Viewer {
    pub engine: Engine,
    pub notice: Option<String>,
}

impl Viewer {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            notice: None,
        }
    }

    /// Apply a user action.
    pub fn apply(&mut self, action: Action) -> Result<Flow, EngineError> {
        self.notice = None;
        match action {
            Action::Start => self.engine.start_search(),
            Action::Pause => self.engine.pause_search(),
            Action::Reset => self.engine.reset_search(),
            Action::NewGrid => self.engine.regenerate_grid(GridMode::Obstacles)?,
            Action::NewMaze => self.engine.regenerate_grid(GridMode::Maze)?,
            Action::UseAlgorithm(alg) => {
                if !self.engine.switch_algorithm(alg) {
                    self.notice = Some(format!("already using {alg}"));
                }
            }
            Action::Grow | Action::Shrink => self.resize(action == Action::Grow)?,
            Action::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn resize(&mut self, grow: bool) -> Result<(), EngineError> {
        if self.engine.is_running() {
            self.notice = Some("pause or reset the search before resizing".to_string());
            return Ok(());
        }
        let n = self.engine.config().grid_size;
        let next = if grow {
            (n + 1).min(MAX_GRID_SIZE)
        } else {
            n.saturating_sub(1).max(1)
        };
        if next != n {
            self.engine.set_grid_size(next)?;
        }
        Ok(())
    }

    /// Advance the engine by one frame.
    pub fn frame(&mut self) -> Result<SearchStatus, EngineError> {
        self.engine.tick()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathgrid_core::Grid;
    use pathgrid_engine::EngineConfig;

    fn open_viewer(n: usize) -> Viewer {
        let grid = Grid::new(n, n, 1.0).unwrap();
        Viewer::new(Engine::from_grid(EngineConfig::default().with_seed(1), grid).unwrap())
    }

    fn run_out(v: &mut Viewer) {
        v.apply(Action::Start).unwrap();
        while v.engine.is_running() {
            v.frame().unwrap();
        }
    }

    #[test]
    fn lattice_dimensions_and_border() {
        let v = open_viewer(3);
        let frame = compose(&v.engine);
        assert_eq!(frame.len(), 7);
        assert!(frame.iter().all(|row| row.len() == 7));
        assert_eq!(frame[0][1], Glyph::Wall);
        assert_eq!(frame[1][0], Glyph::Wall);
        assert_eq!(frame[0][0], Glyph::Post);
        assert_eq!(frame[1][1], Glyph::Start);
        assert_eq!(frame[5][5], Glyph::Goal);
        // Interior edges of an obstacle grid are open.
        assert_eq!(frame[2][1], Glyph::Empty);
        assert_eq!(frame[2][2], Glyph::Empty);
    }

    #[test]
    fn finished_search_draws_a_connected_path() {
        let mut v = open_viewer(4);
        run_out(&mut v);
        let frame = compose(&v.engine);
        let path_cells = (0..4)
            .flat_map(|i| (0..4).map(move |j| (i, j)))
            .filter(|&(i, j)| frame[2 * i + 1][2 * j + 1] == Glyph::Path)
            .count();
        // Six moves: seven cells, minus start and goal which keep their markers.
        assert_eq!(path_cells, 5);
        let path_edges = frame.iter().flatten().filter(|&&g| g == Glyph::Path).count() - path_cells;
        assert_eq!(path_edges, 6);
    }

    #[test]
    fn maze_walls_appear_between_cells() {
        let engine = Engine::new(
            EngineConfig::default()
                .with_grid_size(5)
                .with_mode(GridMode::Maze)
                .with_seed(2),
        )
        .unwrap();
        let frame = compose(&engine);
        let interior_walls = (1..5)
            .flat_map(|i| (0..5).map(move |j| (2 * i, 2 * j + 1)))
            .chain((0..5).flat_map(|i| (1..5).map(move |j| (2 * i + 1, 2 * j))))
            .filter(|&(r, c)| frame[r][c] == Glyph::Wall)
            .count();
        // 40 interior edges, 24 of them carved.
        assert_eq!(interior_walls, 40 - 24);
    }

    #[test]
    fn blocked_cells_are_drawn() {
        let grid = Grid::parse("..#\n...\n...", 1.0).unwrap();
        let engine = Engine::from_grid(EngineConfig::default(), grid).unwrap();
        let frame = compose(&engine);
        assert_eq!(frame[1][5], Glyph::Blocked);
    }

    #[test]
    fn draw_overwrites_in_place() {
        let mut v = open_viewer(3);
        v.notice = Some("hello".to_string());
        let mut out = Vec::new();
        draw(&mut out, &v).unwrap();
        let text = String::from_utf8(out).unwrap();
        // ESC[2J is a full-screen clear.
        assert!(!text.contains("\x1b[2J"));
        assert!(text.contains(&status_line(&v.engine)));
        assert!(text.contains("hello"));
        assert!(text.contains(HELP));
    }

    #[test]
    fn frame_clock_runs_at_fixed_rate() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new(10, t0);
        assert!(clock.advance(t0));
        assert!(!clock.advance(t0 + Duration::from_millis(50)));
        assert_eq!(
            clock.timeout(t0 + Duration::from_millis(50)),
            Duration::from_millis(50)
        );
        assert!(clock.advance(t0 + Duration::from_millis(100)));
        assert!(!clock.advance(t0 + Duration::from_millis(150)));
    }

    #[test]
    fn frame_clock_does_not_burst_after_a_stall() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new(10, t0);
        assert!(clock.advance(t0));
        let late = t0 + Duration::from_secs(2);
        assert!(clock.advance(late));
        assert!(!clock.advance(late));
        assert_eq!(clock.timeout(late), Duration::from_millis(100));
    }

    #[test]
    fn frames_keep_coming_under_steady_input() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new(10, t0);
        let mut v = open_viewer(5);
        v.apply(Action::Start).unwrap();
        // One no-op key per 10 ms for half a second; a frame runs whenever
        // one is due, whatever input arrived in between.
        let mut frames = 0;
        for ms in (0..500).step_by(10) {
            let now = t0 + Duration::from_millis(ms);
            if clock.advance(now) {
                v.frame().unwrap();
                frames += 1;
            }
            v.apply(Action::UseAlgorithm(Algorithm::AStar)).unwrap();
        }
        assert_eq!(frames, 5);
        assert_eq!(v.engine.search().steps(), 5);
    }

    #[test]
    fn key_bindings() {
        assert_eq!(action_for_key(KeyCode::Char(' ')), Some(Action::Start));
        assert_eq!(
            action_for_key(KeyCode::Char('d')),
            Some(Action::UseAlgorithm(Algorithm::Dijkstra))
        );
        assert_eq!(action_for_key(KeyCode::Esc), Some(Action::Quit));
        assert_eq!(action_for_key(KeyCode::Char('z')), None);
    }

    #[test]
    fn resize_is_refused_while_running() {
        let mut v = open_viewer(5);
        v.apply(Action::Start).unwrap();
        v.frame().unwrap();
        v.apply(Action::Grow).unwrap();
        assert_eq!(v.engine.grid().rows(), 5);
        assert!(v.notice.is_some());

        v.apply(Action::Reset).unwrap();
        v.apply(Action::Grow).unwrap();
        assert_eq!(v.engine.grid().rows(), 6);
        assert!(v.notice.is_none());
    }

    #[test]
    fn shrink_stops_at_one() {
        let mut v = open_viewer(2);
        v.apply(Action::Shrink).unwrap();
        v.apply(Action::Shrink).unwrap();
        assert_eq!(v.engine.grid().rows(), 1);
        run_out(&mut v);
        assert_eq!(v.engine.status(), SearchStatus::GoalReached);
        assert_eq!(v.engine.path_len(), Some(0));
    }

    #[test]
    fn quit_and_status_line() {
        let mut v = open_viewer(3);
        assert!(status_line(&v.engine).contains("ready"));
        run_out(&mut v);
        let line = status_line(&v.engine);
        assert!(line.starts_with("A*"), "{line}");
        assert!(line.contains("goal reached, path 4"), "{line}");
        assert_eq!(v.apply(Action::Quit), Ok(Flow::Quit));
    }

    #[test]
    fn same_algorithm_leaves_a_notice() {
        let mut v = open_viewer(3);
        v.apply(Action::UseAlgorithm(Algorithm::AStar)).unwrap();
        assert!(v.notice.is_some());
        v.apply(Action::UseAlgorithm(Algorithm::Dijkstra)).unwrap();
        assert!(v.notice.is_none());
        assert_eq!(v.engine.algorithm(), Algorithm::Dijkstra);
    }
}
