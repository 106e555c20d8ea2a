//! Postgres-backed `NumberRepo`.
//!
//! Every insert opens its own
//! connection, wraps the statement in a
//! transaction, and closes the
//! connection afterwards. Nothing is
//! pooled between cycles.

mod connection;

use chrono::NaiveDateTime;
use chrono_tz::Tz;
use sqlx::Connection;
use sqlx::postgres::PgConnectOptions;
use tracing::debug;

use crate::domain::error::{
  StoreError,
  StoreStage
};
use crate::domain::model::{
  NumberRow,
  PostgresConfig
};
use crate::ports::repo::NumberRepo;

const INSERT_NUMBER: &str = r#"
  INSERT INTO numbers (id, number, ctime)
  VALUES (nextval('numbers_seq'), $1, NOW())
  RETURNING
    id::BIGINT,
    number::INTEGER,
    ctime::TIMESTAMP
"#;

const CHECK_SCHEMA: &str = r#"
  SELECT
    to_regclass('numbers') IS NOT NULL,
    to_regclass('numbers_seq') IS NOT NULL
"#;

/// Presence of the objects the insert
/// depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaStatus {
  pub has_table:    bool,
  pub has_sequence: bool
}

impl SchemaStatus {
  pub fn is_ready(&self) -> bool {
    self.has_table && self.has_sequence
  }
}

pub struct PostgresRepo {
  opts:    PgConnectOptions,
  tz_name: String
}

impl PostgresRepo {
  pub fn new(
    cfg: &PostgresConfig,
    timezone: &Tz
  ) -> Self {
    Self {
      opts:    connection::connect_options(
        cfg
      ),
      tz_name: timezone.name().to_string()
    }
  }

  pub async fn check_schema(
    &self
  ) -> Result<SchemaStatus, StoreError> {
    let mut conn = connection::open(
      &self.opts,
      &self.tz_name
    )
    .await?;

    let res =
      sqlx::query_as::<_, (bool, bool)>(
        CHECK_SCHEMA
      )
      .fetch_one(&mut conn)
      .await;

    let _ = conn.close().await;

    let (has_table, has_sequence) = res
      .map_err(|e| {
        StoreError::new(
          StoreStage::Statement,
          format!("check_schema error: {e}")
        )
      })?;

    Ok(SchemaStatus {
      has_table,
      has_sequence
    })
  }
}

#[async_trait::async_trait]
impl NumberRepo for PostgresRepo {
  async fn insert_number(
    &self,
    value: i32
  ) -> Result<NumberRow, StoreError> {
    let mut conn = connection::open(
      &self.opts,
      &self.tz_name
    )
    .await?;

    let mut tx =
      conn.begin().await.map_err(|e| {
        StoreError::new(
          StoreStage::Statement,
          format!("begin error: {e}")
        )
      })?;

    // Dropping `tx` on error rolls it
    // back.
    let (id, number, ctime) =
      sqlx::query_as::<
        _,
        (i64, i32, NaiveDateTime)
      >(INSERT_NUMBER)
      .bind(value)
      .fetch_one(&mut *tx)
      .await
      .map_err(|e| {
        StoreError::new(
          StoreStage::Statement,
          format!("insert_number error: {e}")
        )
      })?;

    tx.commit().await.map_err(|e| {
      StoreError::new(
        StoreStage::Commit,
        e.to_string()
      )
    })?;

    // Close failures after commit are
    // only logged.
    if let Err(e) = conn.close().await {
      debug!(error = %e, "postgres close error");
    }

    Ok(NumberRow {
      id,
      number,
      ctime
    })
  }
}
