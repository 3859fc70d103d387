//! pathgrid-term: watch A* and Dijkstra explore a grid, one step per frame.

use std::io;
use std::time::Instant;

use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, style, terminal,
};

use pathgrid_core::GridMode;
use pathgrid_engine::{Engine, EngineConfig};
use pathgrid_search::{Algorithm, Heuristic};
use pathgrid_term::{
    Action, Flow, FrameClock, MAX_GRID_SIZE, Viewer, action_for_key, draw, status_line,
};

#[derive(Parser, Debug)]
#[command(version, about = "Step-by-step A* and Dijkstra on obstacle grids and mazes")]
struct Args {
    /// Cells per side
    #[arg(long, short = 'n', default_value_t = 5)]
    size: usize,
    /// Grid mode: obstacles or maze
    #[arg(long, short, default_value_t = GridMode::Obstacles)]
    mode: GridMode,
    /// Search: astar or dijkstra
    #[arg(long, short, default_value_t = Algorithm::AStar)]
    algorithm: Algorithm,
    /// A* heuristic: euclidean or manhattan
    #[arg(long, default_value_t = Heuristic::Euclidean)]
    heuristic: Heuristic,
    /// Probability that a cell is blocked in obstacle mode
    #[arg(long, short, default_value_t = 0.3)]
    density: f64,
    /// Seed for grid generation
    #[arg(long)]
    seed: Option<u64>,
    /// Search steps per second
    #[arg(long, default_value_t = 30)]
    fps: u32,
}

impl Args {
    fn config(&self) -> EngineConfig {
        let config = EngineConfig::default()
            .with_grid_size(self.size.min(MAX_GRID_SIZE))
            .with_mode(self.mode)
            .with_algorithm(self.algorithm)
            .with_heuristic(self.heuristic)
            .with_obstacle_density(self.density)
            .with_frame_rate(self.fps);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

/// Raw mode plus alternate screen, restored on drop.
struct Terminal {
    out: io::Stdout,
}

impl Terminal {
    fn init() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All)
        )?;
        Ok(Self { out })
    }

    fn draw(&mut self, viewer: &Viewer) -> io::Result<()> {
        draw(&mut self.out, viewer)
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.out,
            style::ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

fn run(viewer: &mut Viewer, term: &mut Terminal) -> Result<(), Box<dyn std::error::Error>> {
    let mut clock = FrameClock::new(viewer.engine.config().frame_rate, Instant::now());
    loop {
        if clock.advance(Instant::now()) {
            viewer.frame()?;
            term.draw(viewer)?;
        }

        if !event::poll(clock.timeout(Instant::now()))? {
            continue;
        }
        if let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event::read()?
        {
            let ctrl_c = code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL);
            let action = if ctrl_c {
                Some(Action::Quit)
            } else {
                action_for_key(code)
            };
            if let Some(action) = action {
                if viewer.apply(action)? == Flow::Quit {
                    return Ok(());
                }
                term.draw(viewer)?;
            }
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let engine = Engine::new(args.config())?;
    let mut viewer = Viewer::new(engine);
    let mut term = Terminal::init()?;
    term.draw(&viewer)?;
    let result = run(&mut viewer, &mut term);
    drop(term);
    if result.is_ok() {
        println!("{}", status_line(&viewer.engine));
    }
    result
}
