use error_stack::Context;
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
  InvalidArgument(String),
  SceneError,
  PlaybackError,
  OutputError,
}

impl Context for CliError {}

impl Display for CliError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    use CliError::*;
    match self {
      InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
      SceneError => write!(f, "failed to set up scene"),
      PlaybackError => write!(f, "playback failed"),
      OutputError => write!(f, "failed to write output"),
    }
  }
}
