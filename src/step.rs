use log::trace;
use crate::grid::Grid;

/// Cells that changed during one generation, as flat indices.
///
/// A board redrawing only these cells stays in sync with the grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diff {
  pub new_live: Vec<usize>,
  pub new_dead: Vec<usize>,
}

impl Diff {
  pub fn is_empty(&self) -> bool {
    self.new_live.is_empty() && self.new_dead.is_empty()
  }

  pub fn len(&self) -> usize {
    self.new_live.len() + self.new_dead.len()
  }
}

impl Grid {
  /// Advances one generation.
  ///
  /// Transitions are decided against the neighbor counts of the current
  /// generation; the counts of the neighbors of flipped cells are updated
  /// only once every decision is made.
  pub fn step(&mut self) -> Diff {
    let mut diff = Diff::default();
    let table = self.table;
    // a dead cell without live neighbors can only change under B0
    let skip_quiescent = !table.flips(0);

    for (pos, cell) in self.cells.iter_mut().enumerate() {
      if skip_quiescent && cell.is_quiescent() {
        continue;
      }
      if table.flips(cell.bits()) {
        if cell.is_alive() {
          diff.new_dead.push(pos);
        } else {
          diff.new_live.push(pos);
        }
        // own alive bit only; counts are read unchanged by later cells
        cell.toggle();
      }
    }

    let Self { topology, cells, .. } = self;
    for &pos in &diff.new_dead {
      for &n in topology.neighbor_slice(pos) {
        cells[n as usize].dec_neighbors();
      }
    }
    for &pos in &diff.new_live {
      for &n in topology.neighbor_slice(pos) {
        cells[n as usize].inc_neighbors();
      }
    }

    self.generation += 1;
    trace!(
      "generation {}: {} born, {} died",
      self.generation, diff.new_live.len(), diff.new_dead.len(),
    );
    diff
  }

  /// Advances `num_gen` generations, discarding the diffs.
  pub fn simulate(&mut self, num_gen: u64) {
    for _ in 0..num_gen {
      self.step();
    }
  }
}

#[cfg(test)]
mod tests {
  use crate::grid::*;
  use crate::rule::Rule;
  use pretty_assertions::assert_eq;
  use rand::rngs::StdRng;
  use rand::SeedableRng;
  use rustc_hash::FxHashSet;

  /// Next generation computed cell by cell from alive flags only.
  fn naive_next(grid: &Grid) -> Vec<bool> {
    let topo = grid.topology();
    (0..topo.len())
      .map(|pos| {
        let n = topo.neighbors(pos).filter(|&m| grid.state(m).is_alive()).count() as u8;
        if grid.state(pos).is_alive() {
          grid.rule().survives(n)
        } else {
          grid.rule().births(n)
        }
      })
      .collect()
  }

  fn alive_flags(grid: &Grid) -> Vec<bool> {
    grid.cells().iter().map(|cell| cell.is_alive()).collect()
  }

  fn assert_counts(grid: &Grid) {
    let topo = grid.topology();
    for pos in 0..topo.len() {
      let expected = topo.neighbors(pos).filter(|&m| grid.state(m).is_alive()).count() as u8;
      assert_eq!(grid.state(pos).live_neighbors(), expected, "cell {}", pos);
    }
  }

  #[test]
  fn test_lonely_cell_dies() {
    let mut grid = Grid::new(5, 5, Rule::LIFE);
    grid.set_alive(2, 2);
    let diff = grid.step();
    assert_eq!(diff.new_dead, vec![grid.topology().index(2, 2)]);
    assert!(diff.new_live.is_empty());
    assert_eq!(grid.population(), 0);
    assert_eq!(grid.generation(), 1);
    assert_counts(&grid);
  }

  #[test]
  fn test_blinker() {
    let mut grid = Grid::from_rows(&[
      ".....",
      "..#..",
      "..#..",
      "..#..",
      ".....",
    ], Rule::LIFE);

    let diff = grid.step();
    assert_eq!(grid.debug(), vec![
      ".....",
      ".....",
      ".###.",
      ".....",
      ".....",
    ]);
    assert_eq!(diff.len(), 4);

    grid.step();
    assert_eq!(grid.debug(), vec![
      ".....",
      "..#..",
      "..#..",
      "..#..",
      ".....",
    ]);
    assert_counts(&grid);
  }

  #[test]
  fn test_l_tromino_becomes_block() {
    let mut grid = Grid::from_rows(&[
      "......",
      ".##...",
      ".#....",
      "......",
      "......",
    ], Rule::LIFE);

    grid.simulate(2);
    let block = vec![
      "......",
      ".##...",
      ".##...",
      "......",
      "......",
    ];
    assert_eq!(grid.debug(), block);

    let diff = grid.step();
    assert!(diff.is_empty());
    assert_eq!(grid.debug(), block);
  }

  #[test]
  fn test_glider_hits_wall() {
    let mut grid = Grid::from_rows(&[
      ".#....",
      "..#...",
      "###...",
      "......",
      "......",
      "......",
    ], Rule::LIFE);

    grid.simulate(4);
    assert_eq!(grid.debug(), vec![
      "......",
      "..#...",
      "...#..",
      ".###..",
      "......",
      "......",
    ]);

    // no wraparound: the glider becomes a block in the corner
    grid.simulate(12);
    assert_eq!(grid.debug(), vec![
      "......",
      "......",
      "......",
      "......",
      "....##",
      "....##",
    ]);
    assert_counts(&grid);
  }

  #[test]
  fn test_birth_on_zero() {
    let mut grid = Grid::new(3, 3, "/0".parse().unwrap());
    let diff = grid.step();
    assert_eq!(diff.new_live.len(), 9);
    assert_eq!(grid.population(), 9);
    assert_counts(&grid);

    let diff = grid.step();
    assert_eq!(diff.new_dead.len(), 9);
    assert_eq!(grid.population(), 0);
    assert_counts(&grid);
  }

  #[test]
  fn test_diff_matches_naive() {
    let rules = [Rule::LIFE, Rule::HIGH_LIFE, Rule::DAY_AND_NIGHT, "34/34".parse().unwrap()];
    for (seed, &rule) in rules.iter().enumerate() {
      let mut rng = StdRng::seed_from_u64(seed as u64);
      let mut grid = Grid::with_filling(23, 17, rule, Filling::GOLDEN, &mut rng);

      for _ in 0..40 {
        let before = alive_flags(&grid);
        let expected = naive_next(&grid);
        let diff = grid.step();

        let live: FxHashSet<usize> = diff.new_live.iter().copied().collect();
        let dead: FxHashSet<usize> = diff.new_dead.iter().copied().collect();
        assert_eq!(live.len(), diff.new_live.len(), "duplicate births");
        assert_eq!(dead.len(), diff.new_dead.len(), "duplicate deaths");
        assert!(live.is_disjoint(&dead));

        let mut patched = before.clone();
        for &pos in &diff.new_live {
          assert!(!before[pos]);
          patched[pos] = true;
        }
        for &pos in &diff.new_dead {
          assert!(before[pos]);
          patched[pos] = false;
        }
        assert_eq!(patched, expected);
        assert_eq!(alive_flags(&grid), expected);
      }
      assert_counts(&grid);
    }
  }

  #[test]
  fn test_counts_survive_mixed_edits() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut grid = Grid::with_filling(15, 12, Rule::LIFE, Filling::GOLDEN, &mut rng);
    for i in 0..30usize {
      grid.step();
      let (x, y) = (i * 7 % 15, i * 5 % 12);
      if i % 2 == 0 {
        grid.set_alive(x, y);
        grid.set_alive(x, y);
      } else {
        grid.set_dead(x, y);
      }
      assert_counts(&grid);
    }
  }
}
