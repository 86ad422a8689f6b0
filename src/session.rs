use std::thread;
use std::time::Duration;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use crate::board::Board;
use crate::config::*;
use crate::error::{Error, Result};
use crate::grid::{CellState, Grid};
use crate::rule::Rule;
use crate::step::Diff;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Status {
  /// Not started yet.
  Stopped,
  Running,
  /// Stopped by the user or by a pause-after target.
  Paused,
}

/// One game: a grid, the board showing it and the stepping timer.
///
/// Only one mutator touches the grid at a time: steps run to completion inside
/// [`Session::tick`], and manual edits are refused while the timer runs.
pub struct Session {
  grid: Grid,
  board: Box<dyn Board>,
  period: Duration,
  status: Status,
  /// Last generation that may be reached before the timer halts.
  pause_at: Option<u64>,
  pause_from_current: bool,
}

impl Session {
  pub fn new(config: &SessionConfig, board: Box<dyn Board>) -> Result<Self> {
    config.validate()?;
    let seed = config.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);
    let grid = Grid::with_filling(
      config.width, config.height, config.rule, config.filling, &mut rng);
    info!(
      "new {}x{} game, rule {}, filling {:?}, seed {}",
      config.width, config.height, config.rule, config.filling, seed,
    );

    let mut session = Self::from_grid(grid, board, config.cell_size, config.period)?;
    if let Some(PauseAfter { generations, from }) = config.pause_after {
      session.pause_after(generations, from);
    }
    Ok(session)
  }

  /// Starts a stopped session on an existing grid and draws it.
  pub fn from_grid(
    grid: Grid,
    mut board: Box<dyn Board>,
    cell_size: u32,
    period: Duration,
  ) -> Result<Self> {
    board.set_cell_size(cell_size);
    board.redraw(&grid)?;
    Ok(Self {
      grid,
      board,
      period,
      status: Status::Stopped,
      pause_at: None,
      pause_from_current: false,
    })
  }

  pub fn grid(&self) -> &Grid {
    &self.grid
  }

  pub fn status(&self) -> Status {
    self.status
  }

  pub fn is_running(&self) -> bool {
    self.status == Status::Running
  }

  pub fn generation(&self) -> u64 {
    self.grid.generation()
  }

  pub fn period(&self) -> Duration {
    self.period
  }

  pub fn board_kind(&self) -> &'static str {
    self.board.kind()
  }

  pub fn cell_size(&self) -> u32 {
    self.board.cell_size()
  }

  pub fn board_size(&self) -> (usize, usize) {
    (self.grid.width(), self.grid.height())
  }

  /// Liveness and live neighbor count of `(x, y)`.
  pub fn cell(&self, x: usize, y: usize) -> CellState {
    self.grid.state(self.grid.topology().index(x, y))
  }

  /// Generation the timer halts at, if armed.
  pub fn pause_target(&self) -> Option<u64> {
    self.pause_at
  }

  /// Steps once and redraws the changed cells.
  pub fn run_one(&mut self) -> Result<Diff> {
    let diff = self.grid.step();
    self.board.redraw_diff(&self.grid, &diff)?;
    Ok(diff)
  }

  /// Starts the timer. Returns `false` if an armed pause-after target is
  /// already reached, in which case nothing starts.
  pub fn run_cycle(&mut self) -> bool {
    if self.pause_reached() {
      debug!("pause target {:?} already reached", self.pause_at);
      self.status = Status::Paused;
      return false;
    }
    if self.status != Status::Running {
      info!("running from generation {} every {:?}", self.generation(), self.period);
      self.status = Status::Running;
    }
    true
  }

  /// Cancels the timer. The current step, if any, has already completed.
  pub fn stop(&mut self) {
    if self.status == Status::Running {
      info!("stopped at generation {}", self.generation());
      self.status = Status::Paused;
    }
  }

  /// One firing of the timer. Returns whether a generation was computed.
  pub fn tick(&mut self) -> Result<bool> {
    if self.status != Status::Running {
      return Ok(false);
    }
    if self.pause_reached() {
      debug!("pausing at generation {}", self.generation());
      self.stop();
      if self.pause_from_current {
        self.clear_pause_after();
      }
      return Ok(false);
    }
    self.run_one()?;
    Ok(true)
  }

  /// Fires [`Session::tick`] every period until the session stops or
  /// `max_ticks` timer firings happen. Returns the number of generations
  /// computed.
  pub fn run_loop(&mut self, max_ticks: Option<u64>) -> Result<u64> {
    let mut ticks = 0;
    let mut steps = 0;
    while self.is_running() && max_ticks.map_or(true, |max| ticks < max) {
      ticks += 1;
      if self.tick()? {
        steps += 1;
      }
      if self.is_running() && self.period != Duration::from_secs(0) {
        thread::sleep(self.period);
      }
    }
    Ok(steps)
  }

  pub fn change_period(&mut self, period: Duration) {
    if self.is_running() {
      self.stop();
      self.period = period;
      self.run_cycle();
    } else {
      self.period = period;
    }
  }

  /// Arms a halt `generations` generations from the start of the game or from
  /// now.
  pub fn pause_after(&mut self, generations: u64, from: PauseFrom) {
    let target = match from {
      PauseFrom::Beginning => generations,
      PauseFrom::Current => self.generation() + generations,
    };
    debug!("pause armed at generation {}", target);
    self.pause_at = Some(target);
    self.pause_from_current = from == PauseFrom::Current;
  }

  pub fn clear_pause_after(&mut self) {
    self.pause_at = None;
    self.pause_from_current = false;
  }

  fn pause_reached(&self) -> bool {
    match self.pause_at {
      Some(target) => target < self.generation() + 1,
      None => false,
    }
  }

  /// Swaps the rule without touching the cells.
  pub fn set_rule(&mut self, rule: Rule) {
    debug!("rule {} -> {}", self.grid.rule(), rule);
    self.grid.set_rule(rule);
  }

  /// Replaces the board, redrawing everything on the new one. Returns the old
  /// board. If the new board fails to draw, the session keeps its old board
  /// and its status.
  pub fn set_board(&mut self, mut board: Box<dyn Board>) -> Result<Box<dyn Board>> {
    if board.cell_size() != self.board.cell_size() {
      board.set_cell_size(self.board.cell_size());
    }
    board.redraw(&self.grid)?;

    let was_running = self.is_running();
    self.stop();
    info!("board {} -> {}", self.board.kind(), board.kind());
    let old = std::mem::replace(&mut self.board, board);

    if was_running {
      self.run_cycle();
    }
    Ok(old)
  }

  pub fn change_cell_size(&mut self, size: u32) -> Result<()> {
    self.board.set_cell_size(size);
    self.board.redraw(&self.grid)
  }

  /// Marks a cell alive by hand. Refused while running.
  pub fn mark_cell_live(&mut self, x: usize, y: usize) -> Result<bool> {
    self.mark_cell(x, y, true)
  }

  /// Marks a cell dead by hand. Refused while running.
  pub fn mark_cell_dead(&mut self, x: usize, y: usize) -> Result<bool> {
    self.mark_cell(x, y, false)
  }

  fn mark_cell(&mut self, x: usize, y: usize, alive: bool) -> Result<bool> {
    if self.is_running() {
      return Err(Error::SessionRunning);
    }
    let pos = self.grid.topology().index(x, y);
    let changed = self.grid.set(pos, alive);
    if changed {
      self.board.redraw_cell(&self.grid, pos)?;
    }
    Ok(changed)
  }

  /// Ends the game for good, handing back the final grid.
  pub fn over(mut self) -> Grid {
    self.stop();
    info!(
      "game over at generation {}, population {}",
      self.generation(), self.grid.population(),
    );
    self.grid
  }
}
