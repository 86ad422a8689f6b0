use std::fmt::{self, Display};
use std::str::FromStr;
use log::warn;
use regex::Regex;
use crate::error::{Error, Result};

/// Survival and birth neighbor counts of a life-like automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rule {
  survival: NeighborMask,
  birth: NeighborMask,
}

/// Bit `n` is set when `n` live neighbors are in the set.
pub(crate) type NeighborMask = u16;

const MAX_NEIGHBORS: u8 = 8;

impl Rule {
  /// `23/3`
  pub const LIFE: Rule = Rule {
    survival: 0b0_0000_1100,
    birth: 0b0_0000_1000,
  };

  /// `23/36`
  pub const HIGH_LIFE: Rule = Rule {
    survival: 0b0_0000_1100,
    birth: 0b0_0100_1000,
  };

  /// `34678/3678`
  pub const DAY_AND_NIGHT: Rule = Rule {
    survival: 0b1_1101_1000,
    birth: 0b1_1100_1000,
  };

  pub fn new(
    survival: impl IntoIterator<Item = u8>,
    birth: impl IntoIterator<Item = u8>,
  ) -> Result<Self> {
    let mut rule = Rule { survival: 0, birth: 0 };
    for n in survival {
      rule.survival |= mask_of(n)?;
    }
    for n in birth {
      rule.birth |= mask_of(n)?;
    }
    Ok(rule)
  }

  /// Parses `text`, keeping `fallback` if it is malformed.
  pub fn parse_or(text: &str, fallback: Rule) -> Rule {
    text.parse().unwrap_or_else(|e| {
      warn!("{}, keeping rule {}", e, fallback);
      fallback
    })
  }

  pub fn survives(&self, neighbors: u8) -> bool {
    neighbors <= MAX_NEIGHBORS && self.survival >> neighbors & 1 != 0
  }

  pub fn births(&self, neighbors: u8) -> bool {
    neighbors <= MAX_NEIGHBORS && self.birth >> neighbors & 1 != 0
  }

  pub fn survival(&self) -> impl Iterator<Item = u8> {
    counts(self.survival)
  }

  pub fn birth(&self) -> impl Iterator<Item = u8> {
    counts(self.birth)
  }
}

impl Default for Rule {
  fn default() -> Self {
    Rule::LIFE
  }
}

fn mask_of(n: u8) -> Result<NeighborMask> {
  if n > MAX_NEIGHBORS {
    Err(Error::InvalidRuleSpec {
      spec: n.to_string(),
      reason: format!("neighbor count {} is out of range 0-{}", n, MAX_NEIGHBORS),
    })
  } else {
    Ok(1 << n)
  }
}

fn counts(mut mask: NeighborMask) -> impl Iterator<Item = u8> {
  std::iter::from_fn(move || {
    if mask == 0 {
      None
    } else {
      let n = mask.trailing_zeros() as u8;
      mask &= mask - 1;
      Some(n)
    }
  })
}

/// Accepts `S/B` (e.g. `23/3`) and `B/S` (e.g. `B3/S23`) notation. Repeated
/// digits are merged.
impl FromStr for Rule {
  type Err = Error;

  fn from_str(src: &str) -> Result<Self> {
    let re = Regex::new(r"^(?:([0-9]*)/([0-9]*)|[Bb]([0-9]*)/[Ss]([0-9]*))$").unwrap();
    let invalid = |reason: String| Error::InvalidRuleSpec {
      spec: src.to_owned(),
      reason,
    };

    let caps = re.captures(src.trim())
      .ok_or_else(|| invalid("expected S/B or B/S notation".to_owned()))?;
    let (survival, birth) = match (caps.get(1), caps.get(2)) {
      (Some(s), Some(b)) => (s.as_str(), b.as_str()),
      _ => (&caps[4], &caps[3]),
    };

    Ok(Rule {
      survival: parse_counts(survival).map_err(invalid)?,
      birth: parse_counts(birth).map_err(invalid)?,
    })
  }
}

fn parse_counts(digits: &str) -> std::result::Result<NeighborMask, String> {
  digits.bytes().try_fold(0, |mask, c| {
    let n = c - b'0';
    if n > MAX_NEIGHBORS {
      Err(format!("neighbor count {} is out of range 0-{}", n, MAX_NEIGHBORS))
    } else {
      Ok(mask | 1 << n)
    }
  })
}

impl Display for Rule {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    for n in self.survival() {
      write!(f, "{}", n)?;
    }
    write!(f, "/")?;
    for n in self.birth() {
      write!(f, "{}", n)?;
    }
    Ok(())
  }
}

/// A rule compiled into a lookup table indexed by packed cell state
/// (`live_neighbors << 1 | alive`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleTable {
  flips: [bool; STATES],
}

const STATES: usize = ((MAX_NEIGHBORS as usize) << 1 | 1) + 1;

impl RuleTable {
  pub fn new(rule: Rule) -> Self {
    let mut flips = [false; STATES];
    for n in 0..=MAX_NEIGHBORS {
      flips[(n as usize) << 1] = rule.births(n);
      flips[(n as usize) << 1 | 1] = !rule.survives(n);
    }
    Self { flips }
  }

  /// Whether a live cell with `neighbors` live neighbors dies.
  pub fn should_die(&self, neighbors: u8) -> bool {
    self.flips[(neighbors as usize) << 1 | 1]
  }

  /// Whether a dead cell with `neighbors` live neighbors comes alive.
  pub fn should_birth(&self, neighbors: u8) -> bool {
    self.flips[(neighbors as usize) << 1]
  }

  #[inline]
  pub(crate) fn flips(&self, state: u8) -> bool {
    self.flips[state as usize]
  }
}
