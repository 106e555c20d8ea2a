//! Persistence for generated numbers.

use crate::domain::error::StoreError;
use crate::domain::model::NumberRow;

#[async_trait::async_trait]
pub trait NumberRepo: Send + Sync {
  /// Inserts one row for `value` inside
  /// its own transaction and returns the
  /// stored row.
  async fn insert_number(
    &self,
    value: i32
  ) -> Result<NumberRow, StoreError>;
}
