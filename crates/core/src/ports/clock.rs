//! Clock abstraction (epoch
//! milliseconds plus an awaitable
//! pause).

use std::time::Duration;

#[async_trait::async_trait]
pub trait Clock: Send + Sync {
  async fn now_epoch_ms(&self) -> i64;

  async fn sleep(
    &self,
    duration: Duration
  );
}
