use std::fmt::{self, Display};
use std::time::{Duration, Instant};
use itertools::{Itertools, MinMaxResult};
use log::info;
use crate::board::HeadlessBoard;
use crate::config::{PauseAfter, PauseFrom, SessionConfig};
use crate::error::Result;
use crate::session::Session;

pub const GENERATIONS_PER_RUN: u64 = 250;
pub const RUNS: usize = 10;

/// Generations-per-second samples of repeated games.
#[derive(Debug, Clone, Default)]
pub struct Benchmark {
  samples: Vec<f64>,
}

impl Benchmark {
  /// Plays [`RUNS`] fresh games of [`GENERATIONS_PER_RUN`] generations each,
  /// as fast as possible and without drawing.
  pub fn run(config: &SessionConfig) -> Result<Self> {
    let config = SessionConfig {
      period: Duration::from_secs(0),
      pause_after: Some(PauseAfter {
        generations: GENERATIONS_PER_RUN,
        from: PauseFrom::Beginning,
      }),
      ..config.clone()
    };

    let mut bench = Self::default();
    for i in 0..RUNS {
      let mut session = Session::new(&config, Box::new(HeadlessBoard::new(config.cell_size)))?;
      let start = Instant::now();
      session.run_cycle();
      let generations = session.run_loop(None)?;
      bench.push(generations, start.elapsed());
      session.over();
      info!("{}/{} times repeated", i + 1, RUNS);
    }
    Ok(bench)
  }

  pub fn push(&mut self, generations: u64, elapsed: Duration) {
    let secs = elapsed.as_secs_f64().max(f64::EPSILON);
    self.samples.push(generations as f64 / secs);
  }

  pub fn samples(&self) -> &[f64] {
    &self.samples
  }

  pub fn mean(&self) -> f64 {
    self.samples.iter().sum::<f64>() / self.samples.len() as f64
  }

  pub fn std_dev(&self) -> f64 {
    let mean = self.mean();
    let variance = self.samples.iter()
      .map(|gps| (gps - mean).powi(2))
      .sum::<f64>() / self.samples.len() as f64;
    variance.sqrt()
  }

  /// Coefficient of variation, in percent.
  pub fn cv(&self) -> f64 {
    self.std_dev() / self.mean() * 100.0
  }

  pub fn range(&self) -> f64 {
    match self.samples.iter().minmax() {
      MinMaxResult::MinMax(min, max) => max - min,
      _ => 0.0,
    }
  }
}

struct Num(f64);

impl Display for Num {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    if self.0.fract() == 0.0 {
      write!(f, "{}", self.0)
    } else {
      write!(f, "{:.4}", self.0)
    }
  }
}

impl Display for Benchmark {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(
      f,
      "mean: {}gps, CV: {}%, range: {}",
      Num(self.mean()), Num(self.cv()), Num(self.range()),
    )
  }
}
