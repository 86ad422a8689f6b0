pub mod benchmark;
pub mod board;
pub mod config;
mod error;
pub mod export;
pub mod grid;
pub mod rule;
pub mod session;
pub mod step;
pub mod topology;

pub use error::{Error, Result};
pub use grid::{CellState, Filling, Grid};
pub use rule::Rule;
pub use session::Session;
pub use step::Diff;
