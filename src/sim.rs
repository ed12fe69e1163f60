// sim.rs - Simulation controller and tick scheduling

use std::str::FromStr;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::grid::{COLS, Grid, ROWS};
use crate::patterns;

/// Scheduling interval presets for the tick timer.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Speed {
    Slow,
    Normal,
    Fast,
}

impl Speed {
    pub const ALL: [Speed; 3] = [Speed::Slow, Speed::Normal, Speed::Fast];

    pub fn interval(self) -> Duration {
        match self {
            Speed::Slow => Duration::from_millis(800),
            Speed::Normal => Duration::from_millis(200),
            Speed::Fast => Duration::from_millis(50),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Speed::Slow => "Slow",
            Speed::Normal => "Normal",
            Speed::Fast => "Fast",
        }
    }
}

impl Default for Speed {
    fn default() -> Self {
        Speed::Normal
    }
}

impl FromStr for Speed {
    type Err = SimError;

    fn from_str(level: &str) -> Result<Self, Self::Err> {
        match level {
            "slow" => Ok(Speed::Slow),
            "normal" => Ok(Speed::Normal),
            "fast" => Ok(Speed::Fast),
            _ => Err(SimError::InvalidSpeedLevel(level.to_owned())),
        }
    }
}

/// Local, recoverable failures; none of these ever halts the scheduler.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    #[error("grid is {got_rows}x{got_cols}, expected {expected_rows}x{expected_cols}")]
    DimensionMismatch {
        got_rows: usize,
        got_cols: usize,
        expected_rows: usize,
        expected_cols: usize,
    },
    #[error("unrecognized speed level {0:?} (expected slow, normal or fast)")]
    InvalidSpeedLevel(String),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RunState {
    Idle,
    Running,
}

/// Owns the current grid, the generation counter and the tick scheduler.
///
/// Scheduling is cooperative: the controller never spawns a thread. `start`
/// arms a deadline, the host's frame loop pumps `poll`, and each fired tick
/// re-arms the deadline from the speed setting as it is at that moment. A
/// `stop` between frames disarms the deadline and is re-checked at the top of
/// `tick`, so a tick dispatched before the stop exits without touching the
/// grid.
pub struct Simulation {
    grid: Grid,
    generation: u32,
    state: RunState,
    speed: Speed,
    next_tick: Option<Instant>,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation {
    pub fn new() -> Self {
        Self {
            grid: Grid::empty(),
            generation: 0,
            state: RunState::Idle,
            speed: Speed::default(),
            next_tick: None,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// Idle -> Running; the first tick is due immediately. No-op if already
    /// running.
    pub fn start(&mut self, now: Instant) {
        if self.state == RunState::Running {
            return;
        }
        self.state = RunState::Running;
        self.next_tick = Some(now);
    }

    /// Running -> Idle, cancelling the pending tick. No-op if already idle.
    pub fn stop(&mut self) {
        self.state = RunState::Idle;
        self.next_tick = None;
    }

    pub fn toggle_running(&mut self, now: Instant) {
        if self.is_running() {
            self.stop();
        } else {
            self.start(now);
        }
    }

    /// Fire the due tick, if any. Returns whether a tick ran. Called by the
    /// UI frame loop; at most one generation advances per call.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_tick {
            Some(due) if self.state == RunState::Running && now >= due => {
                self.tick(now);
                true
            }
            _ => false,
        }
    }

    /// One scheduled step: advance a generation and re-arm the deadline.
    ///
    /// The run flag is consulted first, so a tick dispatched before a
    /// concurrent `stop` exits without mutating anything. An extinct grid
    /// stops the simulation instead of advancing.
    pub fn tick(&mut self, now: Instant) {
        if self.state != RunState::Running {
            return;
        }
        if !self.grid.has_life() {
            log::info!("population extinct at generation {}, stopping", self.generation);
            self.stop();
            return;
        }
        self.generation += 1;
        self.grid = self.grid.step();
        self.next_tick = Some(now + self.speed.interval());
    }

    /// Replace the current grid wholesale. Run state and generation are left
    /// alone; resets come from `clear`, `randomize` and preset loads.
    pub fn set_grid(&mut self, grid: Grid) -> Result<(), SimError> {
        if grid.rows() != ROWS || grid.cols() != COLS {
            return Err(SimError::DimensionMismatch {
                got_rows: grid.rows(),
                got_cols: grid.cols(),
                expected_rows: ROWS,
                expected_cols: COLS,
            });
        }
        self.grid = grid;
        Ok(())
    }

    /// Flip one cell. Editing is only allowed while idle; while running this
    /// is a silent no-op (the UI models non-clickable cells, not an error).
    /// Returns whether the cell was flipped.
    pub fn toggle_cell(&mut self, row: usize, col: usize) -> bool {
        if self.is_running() {
            log::debug!("ignoring edit of ({row}, {col}) while running");
            return false;
        }
        if row >= ROWS || col >= COLS {
            return false;
        }
        self.grid.toggle(row, col);
        true
    }

    /// Takes effect when the next fired tick re-arms the deadline; a tick
    /// already scheduled keeps its old due time.
    pub fn set_speed(&mut self, speed: Speed) {
        self.speed = speed;
    }

    pub fn set_speed_level(&mut self, level: &str) -> Result<(), SimError> {
        self.speed = level.parse()?;
        Ok(())
    }

    /// Load a named preset: replace the grid, reset the generation counter
    /// and force idle. Returns false for unknown names, leaving everything
    /// unchanged.
    pub fn load_preset(&mut self, name: &str) -> bool {
        match patterns::lookup(name) {
            Some(grid) => {
                log::debug!("loading preset {name:?}");
                self.reset_with(grid);
                true
            }
            None => false,
        }
    }

    /// Reseed every cell independently with the fixed live probability,
    /// reset the generation counter and force idle.
    pub fn randomize(&mut self) {
        let grid = Grid::random(&mut rand::rng());
        self.reset_with(grid);
    }

    /// All-dead grid, generation 0, idle.
    pub fn clear(&mut self) {
        self.reset_with(Grid::empty());
    }

    fn reset_with(&mut self, grid: Grid) {
        self.stop();
        self.grid = grid;
        self.generation = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> Instant {
        Instant::now()
    }

    fn blinker_sim() -> Simulation {
        let mut sim = Simulation::new();
        sim.set_grid(Grid::from_cells(&[(12, 21), (12, 22), (12, 23)]))
            .unwrap();
        sim
    }

    #[test]
    fn starts_idle_with_an_empty_grid() {
        let sim = Simulation::new();
        assert!(!sim.is_running());
        assert_eq!(sim.generation(), 0);
        assert!(!sim.grid().has_life());
        assert_eq!(sim.speed(), Speed::Normal);
    }

    #[test]
    fn tick_advances_one_generation() {
        let mut sim = blinker_sim();
        let t0 = now();
        sim.start(t0);
        sim.tick(t0);
        assert_eq!(sim.generation(), 1);
        assert!(sim.grid().get(11, 22));
        assert!(sim.grid().get(13, 22));
        assert!(!sim.grid().get(12, 21));
    }

    #[test]
    fn first_tick_is_due_immediately_after_start() {
        let mut sim = blinker_sim();
        let t0 = now();
        sim.start(t0);
        assert!(sim.poll(t0));
        assert_eq!(sim.generation(), 1);
    }

    #[test]
    fn start_while_running_is_a_no_op() {
        let mut sim = blinker_sim();
        let t0 = now();
        sim.start(t0);
        assert!(sim.poll(t0));
        // A second start must not re-arm the deadline to "immediately".
        sim.start(t0);
        assert!(!sim.poll(t0 + Duration::from_millis(100)));
        assert_eq!(sim.generation(), 1);
    }

    #[test]
    fn stop_then_tick_changes_nothing() {
        let mut sim = blinker_sim();
        let t0 = now();
        sim.start(t0);
        sim.tick(t0);
        let snapshot = sim.grid().clone();
        sim.stop();
        sim.tick(t0 + Duration::from_secs(1));
        assert_eq!(sim.generation(), 1);
        assert_eq!(*sim.grid(), snapshot);
        assert!(!sim.poll(t0 + Duration::from_secs(2)));
    }

    #[test]
    fn extinction_stops_without_advancing() {
        let mut sim = Simulation::new();
        // A lone cell dies after one generation.
        assert!(sim.toggle_cell(5, 5));
        let t0 = now();
        sim.start(t0);
        sim.tick(t0);
        assert_eq!(sim.generation(), 1);
        assert!(!sim.grid().has_life());
        sim.tick(t0 + Duration::from_secs(1));
        assert_eq!(sim.generation(), 1);
        assert!(!sim.is_running());
    }

    #[test]
    fn starting_on_an_empty_grid_stops_on_the_first_tick() {
        let mut sim = Simulation::new();
        let t0 = now();
        sim.start(t0);
        assert!(sim.poll(t0));
        assert_eq!(sim.generation(), 0);
        assert!(!sim.is_running());
    }

    #[test]
    fn editing_is_rejected_while_running() {
        let mut sim = blinker_sim();
        sim.start(now());
        let snapshot = sim.grid().clone();
        assert!(!sim.toggle_cell(0, 0));
        assert_eq!(*sim.grid(), snapshot);
        sim.stop();
        assert!(sim.toggle_cell(0, 0));
        assert!(sim.grid().get(0, 0));
    }

    #[test]
    fn set_grid_rejects_wrong_dimensions() {
        let mut sim = blinker_sim();
        let before = sim.grid().clone();
        let err = sim.set_grid(Grid::new(5, 5)).unwrap_err();
        assert_eq!(
            err,
            SimError::DimensionMismatch {
                got_rows: 5,
                got_cols: 5,
                expected_rows: ROWS,
                expected_cols: COLS,
            }
        );
        assert_eq!(*sim.grid(), before);
    }

    #[test]
    fn speed_levels_parse_and_unknown_levels_are_rejected() {
        let mut sim = Simulation::new();
        sim.set_speed_level("fast").unwrap();
        assert_eq!(sim.speed(), Speed::Fast);
        assert_eq!(Speed::Fast.interval(), Duration::from_millis(50));

        let err = sim.set_speed_level("warp").unwrap_err();
        assert_eq!(err, SimError::InvalidSpeedLevel("warp".into()));
        assert_eq!(sim.speed(), Speed::Fast);
    }

    #[test]
    fn speed_change_applies_from_the_next_reschedule() {
        let mut sim = blinker_sim();
        let t0 = now();
        sim.start(t0);
        sim.tick(t0); // next tick due at t0 + 200ms
        sim.set_speed(Speed::Fast);
        // The already-armed deadline keeps the old interval.
        assert!(!sim.poll(t0 + Duration::from_millis(100)));
        assert!(sim.poll(t0 + Duration::from_millis(200)));
        // From here on the new interval is in effect.
        assert!(sim.poll(t0 + Duration::from_millis(250)));
    }

    #[test]
    fn randomize_then_clear_is_an_empty_idle_grid() {
        let mut sim = Simulation::new();
        sim.randomize();
        assert!(!sim.is_running());
        sim.clear();
        assert_eq!(sim.generation(), 0);
        assert!(!sim.grid().has_life());
        assert!(!sim.is_running());
    }

    #[test]
    fn loading_a_preset_resets_and_stops() {
        let mut sim = blinker_sim();
        let t0 = now();
        sim.start(t0);
        sim.tick(t0);
        assert!(sim.load_preset("Penta"));
        assert!(!sim.is_running());
        assert_eq!(sim.generation(), 0);
        assert!(sim.grid().get(12, 18));
    }

    #[test]
    fn unknown_preset_leaves_state_untouched() {
        let mut sim = blinker_sim();
        let before = sim.grid().clone();
        assert!(!sim.load_preset("Spaceship"));
        assert_eq!(*sim.grid(), before);
    }

    #[test]
    fn glider_preset_advances_to_the_documented_offset() {
        let mut sim = Simulation::new();
        assert!(sim.load_preset("Glider"));
        let t0 = now();
        sim.start(t0);
        sim.tick(t0);
        let expected = Grid::from_cells(&[(7, 6), (7, 8), (8, 7), (8, 8), (9, 7)]);
        assert_eq!(*sim.grid(), expected);
        assert_eq!(sim.generation(), 1);
    }
}
