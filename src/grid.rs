use rand::Rng;
use crate::rule::*;
use crate::topology::Topology;

/// One minus the inverse golden ratio.
pub const GOLDEN_FILL_PROBABILITY: f64 = 1.0 - 0.6180341996797237;

/// Liveness and live neighbor count of one cell, packed as
/// `live_neighbors << 1 | alive`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct CellState(u8);

impl CellState {
  pub const DEAD: CellState = CellState(0);
  pub const ALIVE: CellState = CellState(1);

  pub fn is_alive(self) -> bool {
    self.0 & 1 != 0
  }

  pub fn live_neighbors(self) -> u8 {
    self.0 >> 1
  }

  /// Dead with no live neighbors.
  pub(crate) fn is_quiescent(self) -> bool {
    self.0 == 0
  }

  pub(crate) fn bits(self) -> u8 {
    self.0
  }

  pub(crate) fn toggle(&mut self) {
    self.0 ^= 1;
  }

  pub(crate) fn inc_neighbors(&mut self) {
    debug_assert!(self.live_neighbors() < 8);
    self.0 += 2;
  }

  pub(crate) fn dec_neighbors(&mut self) {
    debug_assert!(self.live_neighbors() > 0);
    self.0 -= 2;
  }
}

/// How a new grid is populated.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Filling {
  AllDead,
  AllLive,
  /// Every cell is independently alive with the given probability.
  Random(f64),
}

impl Filling {
  pub const GOLDEN: Filling = Filling::Random(GOLDEN_FILL_PROBABILITY);
}

impl Default for Filling {
  fn default() -> Self {
    Filling::GOLDEN
  }
}

/// A bounded board of cells with incrementally maintained neighbor counts.
#[derive(Debug, Clone)]
pub struct Grid {
  pub(crate) topology: Topology,
  pub(crate) cells: Vec<CellState>,
  pub(crate) table: RuleTable,
  rule: Rule,
  pub(crate) generation: u64,
}

impl Grid {
  /// An all-dead grid.
  pub fn new(width: usize, height: usize, rule: Rule) -> Self {
    let topology = Topology::new(width, height);
    let cells = vec![CellState::DEAD; topology.len()];
    Self {
      topology,
      cells,
      table: RuleTable::new(rule),
      rule,
      generation: 0,
    }
  }

  pub fn with_filling<R: Rng>(
    width: usize,
    height: usize,
    rule: Rule,
    filling: Filling,
    rng: &mut R,
  ) -> Self {
    let mut grid = Self::new(width, height, rule);
    match filling {
      Filling::AllDead => return grid,
      Filling::AllLive => {
        grid.cells.iter_mut().for_each(|cell| *cell = CellState::ALIVE);
      }
      Filling::Random(p) => {
        let p = p.max(0.0).min(1.0);
        for cell in &mut grid.cells {
          if rng.random_bool(p) {
            *cell = CellState::ALIVE;
          }
        }
      }
    }
    grid.count_neighbors();
    grid
  }

  /// Builds a grid from rows of text, `#` or `O` marking live cells.
  ///
  /// # Panics
  ///
  /// Panics if there are no rows or every row is empty.
  pub fn from_rows(rows: &[&str], rule: Rule) -> Self {
    let height = rows.len();
    let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
    let mut grid = Self::new(width, height, rule);
    for (y, row) in rows.iter().enumerate() {
      for (x, c) in row.chars().enumerate() {
        if c == '#' || c == 'O' {
          let pos = grid.topology.index(x, y);
          grid.cells[pos] = CellState::ALIVE;
        }
      }
    }
    grid.count_neighbors();
    grid
  }

  /// Recomputes every neighbor count from scratch. Only used when a grid is
  /// populated in bulk; afterwards counts are maintained incrementally.
  fn count_neighbors(&mut self) {
    for pos in 0..self.cells.len() {
      let count = self.topology.neighbor_slice(pos).iter()
        .filter(|&&n| self.cells[n as usize].is_alive())
        .count() as u8;
      self.cells[pos] = CellState(count << 1 | self.cells[pos].bits() & 1);
    }
  }

  pub fn width(&self) -> usize {
    self.topology.width()
  }

  pub fn height(&self) -> usize {
    self.topology.height()
  }

  pub fn topology(&self) -> &Topology {
    &self.topology
  }

  pub fn rule(&self) -> Rule {
    self.rule
  }

  /// Swaps the rule. Topology and cells are left untouched.
  pub fn set_rule(&mut self, rule: Rule) {
    self.rule = rule;
    self.table = RuleTable::new(rule);
  }

  pub fn generation(&self) -> u64 {
    self.generation
  }

  pub fn get(&self, x: usize, y: usize) -> bool {
    self.cells[self.topology.index(x, y)].is_alive()
  }

  pub fn state(&self, pos: usize) -> CellState {
    self.cells[pos]
  }

  pub fn live_neighbor_count(&self, x: usize, y: usize) -> u8 {
    self.cells[self.topology.index(x, y)].live_neighbors()
  }

  pub fn cells(&self) -> &[CellState] {
    &self.cells
  }

  pub fn population(&self) -> usize {
    self.cells.iter().filter(|cell| cell.is_alive()).count()
  }

  /// Flat indices of live cells, ascending.
  pub fn live_cells(&self) -> impl Iterator<Item = usize> + '_ {
    self.cells.iter().enumerate()
      .filter(|(_, cell)| cell.is_alive())
      .map(|(pos, _)| pos)
  }

  /// Returns `false` if the cell was already alive.
  pub fn set_alive(&mut self, x: usize, y: usize) -> bool {
    self.set(self.topology.index(x, y), true)
  }

  /// Returns `false` if the cell was already dead.
  pub fn set_dead(&mut self, x: usize, y: usize) -> bool {
    self.set(self.topology.index(x, y), false)
  }

  pub(crate) fn set(&mut self, pos: usize, alive: bool) -> bool {
    let cell = &mut self.cells[pos];
    if cell.is_alive() == alive {
      return false;
    }
    cell.toggle();
    for &n in self.topology.neighbor_slice(pos) {
      let neighbor = &mut self.cells[n as usize];
      if alive {
        neighbor.inc_neighbors();
      } else {
        neighbor.dec_neighbors();
      }
    }
    true
  }

  #[cfg(test)]
  pub(crate) fn debug(&self) -> Vec<String> {
    (0..self.height())
      .map(|y| {
        (0..self.width())
          .map(|x| if self.get(x, y) { '#' } else { '.' })
          .collect()
      })
      .collect()
  }
}
