//! Domain models: runtime settings,
//! Postgres connection parameters, and
//! the shapes produced by each cycle.

use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDateTime;
use chrono_tz::Tz;

/// Smallest value a cycle can produce.
pub const MIN_VALUE: i32 = 1;

/// Largest value a cycle can produce.
pub const MAX_VALUE: i32 = 1000;

/// Pause before every cycle.
pub const CYCLE_INTERVAL: Duration =
  Duration::from_secs(5);

/// Relative path of the append-only
/// text log.
pub const OUTPUT_PATH: &str =
  "./my_text.txt";

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum FailurePolicy {
  /// Stop the loop on the first failed
  /// cycle.
  Terminate,
  /// Log the failure and move on to the
  /// next cycle.
  Continue
}

#[derive(Debug, Clone)]
pub struct PostgresConfig {
  pub host:     String,
  pub port:     u16,
  pub user:     String,
  pub password: String,
  pub database: String
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub timezone:  Tz,
  pub on_error:  FailurePolicy,
  pub log_level: String,
  pub postgres:  PostgresConfig
}

/// Knobs the runner reads every cycle.
#[derive(Debug, Clone)]
pub struct RunSettings {
  pub interval:    Duration,
  pub min_value:   i32,
  pub max_value:   i32,
  pub on_error:    FailurePolicy,
  pub timezone:    Tz,
  pub output_path: PathBuf
}

impl RunSettings {
  pub fn from_config(
    cfg: &AppConfig
  ) -> Self {
    Self {
      interval:    CYCLE_INTERVAL,
      min_value:   MIN_VALUE,
      max_value:   MAX_VALUE,
      on_error:    cfg.on_error,
      timezone:    cfg.timezone,
      output_path: PathBuf::from(
        OUTPUT_PATH
      )
    }
  }
}

/// Row returned by the insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberRow {
  pub id:     i64,
  pub number: i32,
  pub ctime:  NaiveDateTime
}

#[derive(Debug, Clone)]
pub struct CycleReport {
  pub value: i32,
  pub row:   NumberRow
}

#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq,
)]
pub struct RunSummary {
  pub completed: u64,
  pub failed:    u64
}
