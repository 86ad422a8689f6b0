use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid rule spec {spec:?}: {reason}")]
  InvalidRuleSpec {
    spec: String,
    reason: String,
  },

  #[error("board of {cells} cells exceeds the {limit} cell threshold")]
  SizeTooLarge {
    cells: usize,
    limit: usize,
  },

  #[error("invalid session config: {0}")]
  InvalidConfig(String),

  #[error("the session is running; stop it first")]
  SessionRunning,

  #[error(transparent)]
  Image(#[from] image::ImageError),

  #[error(transparent)]
  Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
