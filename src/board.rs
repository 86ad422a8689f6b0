use std::io::Write;
use crate::error::Result;
use crate::grid::Grid;
use crate::step::Diff;

/// Something that displays a grid.
///
/// `redraw_diff` receives every changed cell and nothing else, so a board that
/// was fully redrawn once can keep in sync from diffs alone.
pub trait Board {
  /// Name of the rendering engine, e.g. `"text"`.
  fn kind(&self) -> &'static str;

  fn cell_size(&self) -> u32;

  fn set_cell_size(&mut self, size: u32);

  fn redraw(&mut self, grid: &Grid) -> Result<()>;

  fn redraw_diff(&mut self, grid: &Grid, diff: &Diff) -> Result<()>;

  fn redraw_cell(&mut self, grid: &Grid, pos: usize) -> Result<()>;
}

/// Draws nothing. Used for benchmarks and scripted runs.
#[derive(Debug, Default)]
pub struct HeadlessBoard {
  cell_size: u32,
}

impl HeadlessBoard {
  pub fn new(cell_size: u32) -> Self {
    Self { cell_size }
  }
}

impl Board for HeadlessBoard {
  fn kind(&self) -> &'static str {
    "headless"
  }

  fn cell_size(&self) -> u32 {
    self.cell_size
  }

  fn set_cell_size(&mut self, size: u32) {
    self.cell_size = size;
  }

  fn redraw(&mut self, _grid: &Grid) -> Result<()> {
    Ok(())
  }

  fn redraw_diff(&mut self, _grid: &Grid, _diff: &Diff) -> Result<()> {
    Ok(())
  }

  fn redraw_cell(&mut self, _grid: &Grid, _pos: usize) -> Result<()> {
    Ok(())
  }
}

pub const LIVE_CHAR: u8 = b'#';
pub const DEAD_CHAR: u8 = b'.';

/// Renders the grid as rows of characters into a writer, one frame per redraw.
///
/// The frame buffer is patched from diffs; only a full redraw reads every cell.
pub struct TextBoard<W> {
  out: W,
  cell_size: u32,
  width: usize,
  /// Row-major, unlike the grid.
  frame: Vec<u8>,
}

impl<W: Write> TextBoard<W> {
  pub fn new(out: W, cell_size: u32) -> Self {
    Self {
      out,
      cell_size,
      width: 0,
      frame: vec![],
    }
  }

  pub fn frame(&self) -> Vec<String> {
    self.frame.chunks(self.width.max(1))
      .map(|row| String::from_utf8_lossy(row).into_owned())
      .collect()
  }

  pub fn into_inner(self) -> W {
    self.out
  }

  fn paint(&mut self, grid: &Grid, pos: usize) {
    let (x, y) = grid.topology().coords(pos);
    self.frame[y * self.width + x] = if grid.state(pos).is_alive() {
      LIVE_CHAR
    } else {
      DEAD_CHAR
    };
  }

  fn flush(&mut self, grid: &Grid) -> Result<()> {
    writeln!(
      self.out,
      "generation {}, population {}, rule {}",
      grid.generation(), grid.population(), grid.rule(),
    )?;
    for row in self.frame.chunks(self.width.max(1)) {
      self.out.write_all(row)?;
      self.out.write_all(b"\n")?;
    }
    self.out.flush()?;
    Ok(())
  }
}

impl<W: Write> Board for TextBoard<W> {
  fn kind(&self) -> &'static str {
    "text"
  }

  fn cell_size(&self) -> u32 {
    self.cell_size
  }

  fn set_cell_size(&mut self, size: u32) {
    self.cell_size = size;
  }

  fn redraw(&mut self, grid: &Grid) -> Result<()> {
    self.width = grid.width();
    self.frame = vec![DEAD_CHAR; self.width * grid.height()];
    for pos in grid.live_cells() {
      self.paint(grid, pos);
    }
    self.flush(grid)
  }

  fn redraw_diff(&mut self, grid: &Grid, diff: &Diff) -> Result<()> {
    for &pos in diff.new_live.iter().chain(&diff.new_dead) {
      self.paint(grid, pos);
    }
    self.flush(grid)
  }

  fn redraw_cell(&mut self, grid: &Grid, pos: usize) -> Result<()> {
    self.paint(grid, pos);
    self.flush(grid)
  }
}
