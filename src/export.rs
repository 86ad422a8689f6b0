use std::path::Path;
use image::{ImageBuffer, Luma};
use crate::error::Result;
use crate::grid::Grid;

pub type Snapshot = ImageBuffer<Luma<u8>, Vec<u8>>;

const LIVE: Luma<u8> = Luma([0]);
const DEAD: Luma<u8> = Luma([255]);

/// Paints every cell as a `cell_size` square, live cells black.
pub fn render(grid: &Grid, cell_size: u32) -> Snapshot {
  let cell_size = cell_size.max(1);
  let w = grid.width() as u32 * cell_size;
  let h = grid.height() as u32 * cell_size;
  ImageBuffer::from_fn(w, h, |px, py| {
    if grid.get((px / cell_size) as usize, (py / cell_size) as usize) {
      LIVE
    } else {
      DEAD
    }
  })
}

/// Saves a snapshot of the grid; the format follows the file extension.
pub fn save_image(grid: &Grid, cell_size: u32, path: impl AsRef<Path>) -> Result<()> {
  render(grid, cell_size).save(path)?;
  Ok(())
}
