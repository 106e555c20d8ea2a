//! Failure taxonomy for a single cycle.

use std::path::PathBuf;

use thiserror::Error;

/// Raised when the text log cannot be
/// appended to.
#[derive(Debug, Error)]
#[error("append to {} failed: {source}", .path.display())]
pub struct SinkError {
  pub path:   PathBuf,
  #[source]
  pub source: std::io::Error
}

/// Step of the database write that
/// failed.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum StoreStage {
  Connect,
  Statement,
  Commit
}

impl std::fmt::Display for StoreStage {
  fn fmt(
    &self,
    f: &mut std::fmt::Formatter<'_>
  ) -> std::fmt::Result {
    let s = match self {
      | StoreStage::Connect => "connect",
      | StoreStage::Statement => {
        "statement"
      }
      | StoreStage::Commit => "commit"
    };

    f.write_str(s)
  }
}

#[derive(Debug, Error)]
#[error("postgres {stage} error: {message}")]
pub struct StoreError {
  pub stage:   StoreStage,
  pub message: String
}

impl StoreError {
  pub fn new(
    stage: StoreStage,
    message: impl Into<String>
  ) -> Self {
    Self {
      stage,
      message: message.into()
    }
  }
}

#[derive(Debug, Error)]
pub enum CycleError {
  #[error("io failure: {0}")]
  Io(#[from] SinkError),
  #[error("data store failure: {0}")]
  DataStore(#[from] StoreError)
}

impl CycleError {
  pub fn kind(&self) -> &'static str {
    match self {
      | CycleError::Io(_) => "IoFailure",
      | CycleError::DataStore(_) => {
        "DataStoreFailure"
      }
    }
  }
}
