//! Append-only text log: one decimal
//! value per line.

use std::path::{
  Path,
  PathBuf
};

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use crate::domain::error::SinkError;
use crate::ports::sink::LineSink;

pub struct TextFileSink {
  path: PathBuf
}

impl TextFileSink {
  pub fn new(
    path: impl Into<PathBuf>
  ) -> Self {
    Self { path: path.into() }
  }

  fn fail(
    &self,
    source: std::io::Error
  ) -> SinkError {
    SinkError {
      path: self.path.clone(),
      source
    }
  }
}

#[async_trait::async_trait]
impl LineSink for TextFileSink {
  async fn append(
    &self,
    value: i32
  ) -> Result<(), SinkError> {
    // Parent directories are not
    // created; a missing one is a
    // failure.
    let mut file = OpenOptions::new()
      .create(true)
      .append(true)
      .open(&self.path)
      .await
      .map_err(|e| self.fail(e))?;

    let line = format!("{value}\n");

    file
      .write_all(line.as_bytes())
      .await
      .map_err(|e| self.fail(e))?;

    // tokio buffers writes on a
    // background thread; flush before
    // the handle is dropped.
    file
      .flush()
      .await
      .map_err(|e| self.fail(e))?;

    Ok(())
  }
}

/// Deletes the text log. Returns
/// `false` when there was nothing to
/// delete.
pub async fn remove_text_log(
  path: &Path
) -> std::io::Result<bool> {
  match tokio::fs::remove_file(path).await
  {
    | Ok(()) => Ok(true),
    | Err(e)
      if e.kind()
        == std::io::ErrorKind::NotFound =>
    {
      Ok(false)
    }
    | Err(e) => Err(e)
  }
}
