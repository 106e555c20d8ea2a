//! Helpers to open and configure a
//! single Postgres connection.

use sqlx::postgres::{
  PgConnectOptions,
  PgConnection
};
use sqlx::{
  ConnectOptions,
  Connection
};

use crate::domain::error::{
  StoreError,
  StoreStage
};
use crate::domain::model::PostgresConfig;

pub fn connect_options(
  cfg: &PostgresConfig
) -> PgConnectOptions {
  PgConnectOptions::new()
    .host(&cfg.host)
    .port(cfg.port)
    .username(&cfg.user)
    .password(&cfg.password)
    .database(&cfg.database)
    .disable_statement_logging()
}

pub async fn open(
  opts: &PgConnectOptions,
  tz_name: &str
) -> Result<PgConnection, StoreError> {
  let mut conn =
    PgConnection::connect_with(opts)
      .await
      .map_err(|e| {
        StoreError::new(
          StoreStage::Connect,
          e.to_string()
        )
      })?;

  if let Err(e) =
    set_session_defaults(&mut conn, tz_name)
      .await
  {
    let _ = conn.close().await;

    return Err(StoreError::new(
      StoreStage::Connect,
      format!(
        "session setup failed: {e}"
      )
    ));
  }

  Ok(conn)
}

async fn set_session_defaults(
  conn: &mut PgConnection,
  tz_name: &str
) -> Result<(), sqlx::Error> {
  // Postgres does not accept bind
  // params in SET TIME ZONE; embed the
  // literal safely.
  let stmt = format!(
    "SET TIME ZONE '{}'",
    tz_name.replace('\'', "''")
  );

  sqlx::query(&stmt)
    .execute(&mut *conn)
    .await?;

  Ok(())
}
