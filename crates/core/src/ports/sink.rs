use crate::domain::error::SinkError;

/// Line-per-value text log.
#[async_trait::async_trait]
pub trait LineSink: Send + Sync {
  async fn append(
    &self,
    value: i32
  ) -> Result<(), SinkError>;
}
