use std::str::FromStr;
use std::time::Duration;
use crate::error::{Error, Result};
use crate::grid::Filling;
use crate::rule::Rule;
use crate::topology::Topology;

/// Boards larger than this ask for confirmation before a session starts.
pub const HUGE_BOARD_LIMIT: usize = 50_000;

/// Where a pause-after countdown starts.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PauseFrom {
  /// Pause at generation `generations`.
  Beginning,
  /// Pause `generations` generations after the moment of arming.
  Current,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PauseAfter {
  pub generations: u64,
  pub from: PauseFrom,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BoardKind {
  Text,
  Headless,
}

impl FromStr for BoardKind {
  type Err = Error;

  fn from_str(src: &str) -> Result<Self> {
    match src {
      "text" => Ok(BoardKind::Text),
      "headless" => Ok(BoardKind::Headless),
      _ => Err(Error::InvalidConfig(format!("unknown board {:?}", src))),
    }
  }
}

/// Everything needed to start a session.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionConfig {
  pub width: usize,
  pub height: usize,
  /// Pixels per cell.
  pub cell_size: u32,
  /// Delay between generations, zero runs as fast as possible.
  pub period: Duration,
  pub filling: Filling,
  pub pause_after: Option<PauseAfter>,
  pub rule: Rule,
  /// Seed of the random filling; drawn from the OS when `None`.
  pub seed: Option<u64>,
  pub board: BoardKind,
}

impl Default for SessionConfig {
  fn default() -> Self {
    // 100:62 is the golden ratio
    Self {
      width: 100,
      height: 62,
      cell_size: 7,
      period: Duration::from_millis(1000),
      filling: Filling::default(),
      pause_after: None,
      rule: Rule::default(),
      seed: None,
      board: BoardKind::Text,
    }
  }
}

impl SessionConfig {
  pub fn cells(&self) -> usize {
    self.width.saturating_mul(self.height)
  }

  pub fn validate(&self) -> Result<()> {
    if self.width == 0 || self.height == 0 {
      return Err(Error::InvalidConfig(format!(
        "board size {}x{} is empty", self.width, self.height)));
    }
    if !Topology::fits(self.width, self.height) {
      return Err(Error::InvalidConfig(format!(
        "board size {}x{} is too large to index", self.width, self.height)));
    }
    if self.cell_size == 0 {
      return Err(Error::InvalidConfig("cell size must be positive".to_owned()));
    }
    if let Filling::Random(p) = self.filling {
      if !(0.0..=1.0).contains(&p) {
        return Err(Error::InvalidConfig(format!(
          "live probability {} is outside [0, 1]", p)));
      }
    }
    Ok(())
  }

  /// Fails with [`Error::SizeTooLarge`] for boards over [`HUGE_BOARD_LIMIT`]
  /// cells. This is a warning: the caller may go ahead after confirmation.
  pub fn check_size(&self) -> Result<()> {
    let cells = self.cells();
    if cells > HUGE_BOARD_LIMIT {
      Err(Error::SizeTooLarge {
        cells,
        limit: HUGE_BOARD_LIMIT,
      })
    } else {
      Ok(())
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default() {
    let config = SessionConfig::default();
    assert_eq!(config.cells(), 6200);
    assert_eq!(config.rule.to_string(), "23/3");
    assert!(config.validate().is_ok());
    assert!(config.check_size().is_ok());
  }

  #[test]
  fn test_invalid() {
    let empty = SessionConfig { width: 0, ..Default::default() };
    assert!(matches!(empty.validate(), Err(Error::InvalidConfig(_))));

    let no_pixels = SessionConfig { cell_size: 0, ..Default::default() };
    assert!(matches!(no_pixels.validate(), Err(Error::InvalidConfig(_))));

    // 8 neighbor slots per cell overflow u32 at 2^29 cells
    let widest = SessionConfig { width: 1 << 14, height: (1 << 15) - 1, ..Default::default() };
    assert!(widest.validate().is_ok());
    let too_wide = SessionConfig { width: 1 << 14, height: 1 << 15, ..Default::default() };
    assert!(matches!(too_wide.validate(), Err(Error::InvalidConfig(_))));
    let huge = SessionConfig { width: 70_000, height: 70_000, ..Default::default() };
    assert!(matches!(huge.validate(), Err(Error::InvalidConfig(_))));

    let odds = SessionConfig { filling: Filling::Random(1.5), ..Default::default() };
    assert!(matches!(odds.validate(), Err(Error::InvalidConfig(_))));
  }

  #[test]
  fn test_size_too_large() {
    let edge = SessionConfig { width: 250, height: 200, ..Default::default() };
    assert!(edge.check_size().is_ok());

    let huge = SessionConfig { width: 251, height: 200, ..Default::default() };
    match huge.check_size() {
      Err(Error::SizeTooLarge { cells, limit }) => {
        assert_eq!(cells, 50_200);
        assert_eq!(limit, HUGE_BOARD_LIMIT);
      }
      other => panic!("{:?}", other),
    }
    // a warning, not a validation failure
    assert!(huge.validate().is_ok());
  }

  #[test]
  fn test_board_kind() {
    assert_eq!("text".parse::<BoardKind>().unwrap(), BoardKind::Text);
    assert_eq!("headless".parse::<BoardKind>().unwrap(), BoardKind::Headless);
    assert!("canvas".parse::<BoardKind>().is_err());
  }
}
