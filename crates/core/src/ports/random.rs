//! Random source abstraction
//! (inclusive integer ranges).
#[async_trait::async_trait]
pub trait RandomSource: Send + Sync {
  /// Uniform integer in `[low, high]`.
  async fn next_in_range(
    &self,
    low: i32,
    high: i32
  ) -> i32;
}
