use std::convert::TryFrom;

/// Offsets of the Moore neighborhood, row by row.
const OFFSETS: [(isize, isize); 8] = [
  (-1, -1), (0, -1), (1, -1),
  (-1, 0),           (1, 0),
  (-1, 1),  (0, 1),  (1, 1),
];

/// Neighbor lists of every cell on a bounded `width` x `height` board.
///
/// Cell `(x, y)` lives at index `x * height + y`. Offsets falling off the board
/// are clipped, so corners have 3 neighbors, edges 5 and interior cells 8.
/// There is no wraparound.
#[derive(Debug, Clone)]
pub struct Topology {
  width: usize,
  height: usize,
  /// `adjacency[starts[i]..starts[i + 1]]` are the neighbors of cell `i`.
  starts: Vec<u32>,
  adjacency: Vec<u32>,
}

impl Topology {
  /// Whether every neighbor list of a `width` x `height` board can be indexed
  /// with `u32`.
  pub fn fits(width: usize, height: usize) -> bool {
    width.checked_mul(height)
      .and_then(|len| len.checked_mul(8))
      .map_or(false, |n| u32::try_from(n).is_ok())
  }

  /// # Panics
  ///
  /// Panics on an empty board or one that does not [`fit`](Topology::fits).
  pub fn new(width: usize, height: usize) -> Self {
    assert!(width > 0 && height > 0, "empty board {}x{}", width, height);
    assert!(Self::fits(width, height), "board {}x{} is too large to index", width, height);
    let len = width * height;

    let mut starts = Vec::with_capacity(len + 1);
    let mut adjacency = Vec::with_capacity(len * 8);
    starts.push(0);

    for x in 0..width as isize {
      for y in 0..height as isize {
        for &(dx, dy) in &OFFSETS {
          let (nx, ny) = (x + dx, y + dy);
          if nx >= 0 && ny >= 0 && (nx as usize) < width && (ny as usize) < height {
            adjacency.push((nx as usize * height + ny as usize) as u32);
          }
        }
        starts.push(adjacency.len() as u32);
      }
    }

    Self {
      width,
      height,
      starts,
      adjacency,
    }
  }

  pub fn width(&self) -> usize {
    self.width
  }

  pub fn height(&self) -> usize {
    self.height
  }

  /// Number of cells.
  pub fn len(&self) -> usize {
    self.starts.len() - 1
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Flat index of `(x, y)`.
  ///
  /// # Panics
  ///
  /// Panics on out of bounds access. Callers clip coordinates themselves.
  pub fn index(&self, x: usize, y: usize) -> usize {
    self.try_index(x, y).unwrap_or_else(|| panic!(
      "out of bounds access: ({}, {}) on a {}x{} board", x, y, self.width, self.height,
    ))
  }

  /// Flat index of `(x, y)`, `None` off the board.
  pub fn try_index(&self, x: usize, y: usize) -> Option<usize> {
    if x < self.width && y < self.height {
      Some(x * self.height + y)
    } else {
      None
    }
  }

  pub fn coords(&self, index: usize) -> (usize, usize) {
    assert!(index < self.len(), "out of bounds access: cell {}", index);
    (index / self.height, index % self.height)
  }

  pub fn neighbors(&self, index: usize) -> impl ExactSizeIterator<Item = usize> + '_ {
    self.neighbor_slice(index).iter().map(|&n| n as usize)
  }

  pub(crate) fn neighbor_slice(&self, index: usize) -> &[u32] {
    &self.adjacency[self.starts[index] as usize..self.starts[index + 1] as usize]
  }
}
