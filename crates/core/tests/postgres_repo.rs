//! Postgres repository tests.
//!
//! The live tests run only when
//! `NUMTICK_TEST_POSTGRES` is set; they
//! connect with the `POSTGRES_*`
//! variables (same defaults as the
//! config loader) and create `numbers`
//! and `numbers_seq` if missing. The
//! empty-database test also needs the
//! role to be allowed `CREATE DATABASE`.

mod support;

use std::collections::HashSet;

use chrono::NaiveDateTime;
use numtick_core::app::runner::Runner;
use numtick_core::domain::error::{
  CycleError,
  StoreStage
};
use numtick_core::domain::model::{
  FailurePolicy,
  PostgresConfig
};
use numtick_core::infra::postgres_repo::PostgresRepo;
use numtick_core::ports::repo::NumberRepo;
use sqlx::postgres::{
  PgConnectOptions,
  PgConnection
};
use sqlx::Connection;
use support::{
  harness_with,
  read_lines
};

const SCHEMA_SQL: &str = include_str!(concat!(
  env!("CARGO_MANIFEST_DIR"),
  "/res/sql/postgres/schema.sql"
));

fn unreachable_config() -> PostgresConfig {
  PostgresConfig {
    host:     "127.0.0.1".to_string(),
    port:     1,
    user:     "nobody".to_string(),
    password: "nothing".to_string(),
    database: "none".to_string()
  }
}

fn live_config() -> Option<PostgresConfig> {
  std::env::var("NUMTICK_TEST_POSTGRES").ok()?;

  let var = |k: &str, default: &str| {
    std::env::var(k)
      .ok()
      .filter(|v| !v.trim().is_empty())
      .unwrap_or_else(|| default.to_string())
  };

  Some(PostgresConfig {
    host:     var("POSTGRES_HOST", "localhost"),
    port:     var("POSTGRES_PORT", "5432").parse().ok()?,
    user:     var("POSTGRES_USER", "postgres"),
    password: var("POSTGRES_PASSWORD", "postgres"),
    database: var("POSTGRES_DB", "postgres")
  })
}

async fn plain_connection(cfg: &PostgresConfig) -> PgConnection {
  let opts = PgConnectOptions::new()
    .host(&cfg.host)
    .port(cfg.port)
    .username(&cfg.user)
    .password(&cfg.password)
    .database(&cfg.database);
  PgConnection::connect_with(&opts).await.unwrap()
}

async fn admin_connection(cfg: &PostgresConfig) -> PgConnection {
  let mut conn = plain_connection(cfg).await;
  sqlx::raw_sql(SCHEMA_SQL).execute(&mut conn).await.unwrap();
  sqlx::query("SET TIME ZONE 'UTC'").execute(&mut conn).await.unwrap();
  conn
}

#[tokio::test]
async fn unreachable_host_fails_at_connect() {
  let repo = PostgresRepo::new(&unreachable_config(), &chrono_tz::UTC);

  let err = repo.insert_number(1).await.unwrap_err();

  assert_eq!(err.stage, StoreStage::Connect);
  assert!(err.to_string().starts_with("postgres connect error"));
}

#[tokio::test]
async fn check_schema_on_unreachable_host_fails_at_connect() {
  let repo = PostgresRepo::new(&unreachable_config(), &chrono_tz::UTC);

  let err = repo.check_schema().await.unwrap_err();

  assert_eq!(err.stage, StoreStage::Connect);
}

#[tokio::test]
async fn live_cycles_insert_one_row_each() {
  let Some(cfg) = live_config() else {
    return;
  };
  let mut admin = admin_connection(&cfg).await;
  let started = sqlx::query_scalar::<_, NaiveDateTime>("SELECT LOCALTIMESTAMP")
    .fetch_one(&mut admin)
    .await
    .unwrap();
  let before = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM numbers")
    .fetch_one(&mut admin)
    .await
    .unwrap();

  let dir = tempfile::tempdir().unwrap();
  let repo = PostgresRepo::new(&cfg, &chrono_tz::UTC);
  let h = harness_with(
    &dir.path().join("my_text.txt"),
    FailurePolicy::Terminate,
    &[42, 42, 1000],
    repo
  );

  let mut reports = Vec::new();
  for cycle in 1..=3 {
    reports.push(Runner::run_cycle(&h.ctx, cycle).await.unwrap());
  }

  let after = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM numbers")
    .fetch_one(&mut admin)
    .await
    .unwrap();
  assert_eq!(after - before, 3);
  assert_eq!(read_lines(&h.path), vec!["42", "42", "1000"]);

  let ids: HashSet<i64> = reports.iter().map(|r| r.row.id).collect();
  assert_eq!(ids.len(), 3);
  for r in &reports {
    assert_eq!(r.row.number, r.value);
    assert!(r.row.ctime >= started, "{} < {}", r.row.ctime, started);

    let stored = sqlx::query_scalar::<_, i32>("SELECT number FROM numbers WHERE id = $1")
      .bind(r.row.id as i32)
      .fetch_one(&mut admin)
      .await
      .unwrap();
    assert_eq!(stored, r.value);
  }

  admin.close().await.unwrap();
}

#[tokio::test]
async fn live_check_schema_reports_ready() {
  let Some(cfg) = live_config() else {
    return;
  };
  admin_connection(&cfg).await.close().await.unwrap();

  let status = PostgresRepo::new(&cfg, &chrono_tz::UTC)
    .check_schema()
    .await
    .unwrap();

  assert!(status.is_ready());
}

#[tokio::test]
async fn live_empty_database_fails_at_statement_and_reports_not_ready() {
  let Some(cfg) = live_config() else {
    return;
  };
  let nanos = std::time::SystemTime::now()
    .duration_since(std::time::UNIX_EPOCH)
    .unwrap()
    .subsec_nanos();
  let scratch = format!("numtick_empty_{}_{nanos}", std::process::id());

  let mut admin = plain_connection(&cfg).await;
  sqlx::query(&format!("CREATE DATABASE \"{scratch}\""))
    .execute(&mut admin)
    .await
    .unwrap();

  let empty = PostgresConfig {
    database: scratch.clone(),
    ..cfg.clone()
  };
  let repo = PostgresRepo::new(&empty, &chrono_tz::UTC);

  let insert_err = repo.insert_number(7).await.unwrap_err();
  let status = repo.check_schema().await.unwrap();

  let dir = tempfile::tempdir().unwrap();
  let h = harness_with(
    &dir.path().join("my_text.txt"),
    FailurePolicy::Terminate,
    &[7],
    PostgresRepo::new(&empty, &chrono_tz::UTC)
  );
  let cycle_err = Runner::run_cycle(&h.ctx, 1).await.unwrap_err();
  let lines = read_lines(&h.path);

  sqlx::query(&format!("DROP DATABASE \"{scratch}\" WITH (FORCE)"))
    .execute(&mut admin)
    .await
    .unwrap();
  admin.close().await.unwrap();

  assert_eq!(insert_err.stage, StoreStage::Statement, "{insert_err}");
  assert!(insert_err.message.contains("numbers"), "{insert_err}");
  assert!(!status.has_table);
  assert!(!status.has_sequence);
  assert!(!status.is_ready());

  assert_eq!(cycle_err.kind(), "DataStoreFailure");
  assert!(matches!(
    cycle_err,
    CycleError::DataStore(ref e) if e.stage == StoreStage::Statement
  ));
  // The append happens before the insert and is not rolled back.
  assert_eq!(lines, vec!["7"]);
}
