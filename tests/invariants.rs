use lifegame::{Filling, Grid, Rule};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Live neighbor count of every cell, recomputed from alive flags.
fn recount(grid: &Grid) -> Vec<u8> {
  let topo = grid.topology();
  (0..topo.len())
    .map(|pos| topo.neighbors(pos).filter(|&n| grid.state(n).is_alive()).count() as u8)
    .collect()
}

fn counts(grid: &Grid) -> Vec<u8> {
  grid.cells().iter().map(|cell| cell.live_neighbors()).collect()
}

#[test]
fn neighbor_counts_match_recount() {
  let rules = ["23/3", "23/36", "34678/3678", "34/34", "1357/1357", "/2", "012345678/3"];
  for (seed, rule) in rules.iter().enumerate() {
    let rule: Rule = rule.parse().unwrap();
    let mut rng = StdRng::seed_from_u64(seed as u64);
    let (w, h) = (rng.random_range(1..40), rng.random_range(1..40));
    let mut grid = Grid::with_filling(w, h, rule, Filling::GOLDEN, &mut rng);
    assert_eq!(counts(&grid), recount(&grid));

    for i in 0..200 {
      if rng.random_bool(0.3) {
        let (x, y) = (rng.random_range(0..w), rng.random_range(0..h));
        if rng.random_bool(0.5) {
          grid.set_alive(x, y);
        } else {
          grid.set_dead(x, y);
        }
      } else {
        grid.step();
      }
      if i % 10 == 0 {
        assert_eq!(counts(&grid), recount(&grid), "rule {} after {} operations", rule, i);
      }
    }
    assert_eq!(counts(&grid), recount(&grid));
  }
}

#[test]
fn repeated_edits_count_once() {
  let mut grid = Grid::new(8, 8, Rule::LIFE);
  for _ in 0..5 {
    grid.set_alive(3, 4);
  }
  let topo = grid.topology();
  let pos = topo.index(3, 4);
  for n in topo.neighbors(pos) {
    assert_eq!(grid.state(n).live_neighbors(), 1);
  }
  assert_eq!(counts(&grid).iter().map(|&c| c as usize).sum::<usize>(), 8);

  for _ in 0..5 {
    grid.set_dead(3, 4);
  }
  assert!(counts(&grid).iter().all(|&c| c == 0));
}

#[test]
fn topology_does_not_depend_on_cells() {
  let mut rng = StdRng::seed_from_u64(8);
  let a = Grid::with_filling(9, 6, Rule::LIFE, Filling::AllLive, &mut rng);
  let b = Grid::with_filling(9, 6, Rule::HIGH_LIFE, Filling::GOLDEN, &mut rng);
  for pos in 0..a.topology().len() {
    let na: Vec<usize> = a.topology().neighbors(pos).collect();
    let nb: Vec<usize> = b.topology().neighbors(pos).collect();
    assert_eq!(na, nb);
  }
}

#[test]
fn full_board_collapses_to_corners() {
  let mut rng = StdRng::seed_from_u64(0);
  let mut grid = Grid::with_filling(10, 20, Rule::LIFE, Filling::AllLive, &mut rng);
  let diff = grid.step();
  assert_eq!(diff.new_dead.len(), 200 - 4);
  assert!(diff.new_live.is_empty());
  assert_eq!(grid.population(), 4);
  assert_eq!(counts(&grid), recount(&grid));
}
