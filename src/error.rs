use thiserror::Error;

/// Fallback message when a failure carries no description of its own.
pub const GENERIC_LOAD_ERROR: &str = "Failed to load videos";

/// Why a load of `videos.json` failed.
///
/// `Display` is the text shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
  #[error("Failed to fetch videos: {0}")]
  HttpStatus(u16),
  #[error("{}", describe(.0))]
  Transport(String),
  #[error("{}", describe(.0))]
  Parse(String),
}

fn describe(msg: &str) -> &str {
  if msg.trim().is_empty() { GENERIC_LOAD_ERROR } else { msg }
}

impl From<reqwest::Error> for LoadError {
  fn from(e: reqwest::Error) -> Self {
    if e.is_decode() { LoadError::Parse(e.to_string()) } else { LoadError::Transport(e.to_string()) }
  }
}

impl From<serde_json::Error> for LoadError {
  fn from(e: serde_json::Error) -> Self {
    LoadError::Parse(e.to_string())
  }
}

impl From<std::io::Error> for LoadError {
  fn from(e: std::io::Error) -> Self {
    LoadError::Transport(e.to_string())
  }
}
