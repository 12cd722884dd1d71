use std::time::{Duration, Instant};

use crate::config::{CELL_SIZE, STEP_INTERVAL};
use crate::simulation::engine::Engine;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
}

/// Outcome of one frame callback
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Not running; the frame loop should not re-arm
    Idle,
    /// Running, but the step interval has not elapsed yet
    Waiting,
    /// A generation was applied and the surface needs a redraw
    Stepped,
}

/// Start/stop state machine around an [`Engine`].
///
/// Stepping is throttled against wall-clock time rather than frame count, so
/// the automaton advances at most once per `interval` whatever the display
/// refresh rate.
pub struct Controller {
    engine: Engine,
    state: RunState,
    last_step: Option<Instant>,
    interval: Duration,
}

impl Controller {
    pub fn new(engine: Engine) -> Self {
        Self::with_interval(engine, STEP_INTERVAL)
    }

    pub fn with_interval(engine: Engine, interval: Duration) -> Self {
        Self {
            engine,
            state: RunState::Idle,
            last_step: None,
            interval,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state() == RunState::Running
    }

    /// Begin stepping; the first generation lands one interval after `now`
    pub fn start(&mut self, now: Instant) {
        if self.state == RunState::Idle {
            self.state = RunState::Running;
            self.last_step = Some(now);
            log::info!("Simulation started at generation {}", self.engine.generation());
        }
    }

    pub fn stop(&mut self) {
        if self.state == RunState::Running {
            self.state = RunState::Idle;
            self.last_step = None;
            log::info!("Simulation stopped at generation {}", self.engine.generation());
        }
    }

    /// The Start/Stop control
    pub fn toggle_running(&mut self, now: Instant) -> RunState {
        match self.state {
            RunState::Idle => self.start(now),
            RunState::Running => self.stop(),
        }
        self.state
    }

    pub fn clear(&mut self) {
        self.stop();
        self.engine.clear();
        log::info!("Grid cleared");
    }

    pub fn randomize(&mut self, density: f64) {
        self.stop();
        self.engine.randomize(density);
        log::info!(
            "Grid randomized at density {:.2}: {} live cells",
            density,
            self.engine.population()
        );
    }

    /// Rebuild the grid for a new surface size. The run state is kept.
    pub fn resize_surface(&mut self, width: u32, height: u32) {
        self.engine.resize_surface(width, height);
        log::info!(
            "Grid resized to {}x{} for a {}x{} surface",
            self.engine.cols(),
            self.engine.rows(),
            width,
            height
        );
    }

    /// Toggle the cell under a surface-local logical pixel position.
    ///
    /// Returns true when a cell changed. Clicks are ignored while running and
    /// when they fall outside the grid.
    pub fn click(&mut self, x: f64, y: f64) -> bool {
        if self.is_running() {
            log::debug!("Ignoring click at ({:.0}, {:.0}) while running", x, y);
            return false;
        }
        let Some((col, row)) = pixel_to_cell(x, y) else {
            return false;
        };
        if !self.engine.toggle(col, row) {
            return false;
        }
        log::debug!(
            "Cell ({}, {}) is now {} with {} live neighbours",
            col,
            row,
            self.engine.cell(col, row).value(),
            self.engine.count_neighbors(col, row)
        );
        true
    }

    /// Per-frame callback
    pub fn tick(&mut self, now: Instant) -> Tick {
        if self.state == RunState::Idle {
            return Tick::Idle;
        }

        let due = match self.last_step {
            Some(last) => now.saturating_duration_since(last) >= self.interval,
            None => true,
        };
        if !due {
            return Tick::Waiting;
        }

        self.engine.step();
        self.last_step = Some(now);
        log::debug!(
            "Generation {}: {} live cells",
            self.engine.generation(),
            self.engine.population()
        );
        Tick::Stepped
    }

    /// One-line status shown in the window title
    pub fn status(&self) -> String {
        let label = match self.state {
            RunState::Idle => "Idle",
            RunState::Running => "Running",
        };
        format!(
            "Game of Life - {} - generation {} - {} alive",
            label,
            self.engine.generation(),
            self.engine.population()
        )
    }
}

/// Map a surface-local pixel position to a (col, row) pair.
/// Negative or non-finite positions map to nothing.
pub fn pixel_to_cell(x: f64, y: f64) -> Option<(usize, usize)> {
    if !(x.is_finite() && y.is_finite()) || x < 0.0 || y < 0.0 {
        return None;
    }
    let size = CELL_SIZE as f64;
    Some(((x / size).floor() as usize, (y / size).floor() as usize))
}
