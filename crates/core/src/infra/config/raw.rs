use serde::Deserialize;

use super::defaults::{
  default_log_level,
  default_on_error,
  default_pg_database,
  default_pg_host,
  default_pg_password,
  default_pg_port,
  default_pg_user,
  default_timezone
};

#[derive(Debug, Deserialize, Default)]
pub(crate) struct RawAppFile {
  #[serde(default)]
  pub app:      RawApp,
  #[serde(default)]
  pub runner:   RawRunner,
  #[serde(default)]
  pub postgres: RawPostgres,
  #[serde(default)]
  pub logging:  RawLogging
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawApp {
  #[serde(default = "default_timezone")]
  pub timezone: String
}

impl Default for RawApp {
  fn default() -> Self {
    Self {
      timezone: default_timezone()
    }
  }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawRunner {
  #[serde(default = "default_on_error")]
  pub on_error: String
}

impl Default for RawRunner {
  fn default() -> Self {
    Self {
      on_error: default_on_error()
    }
  }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawPostgres {
  #[serde(default = "default_pg_host")]
  pub host:     String,
  #[serde(default = "default_pg_port")]
  pub port:     u16,
  #[serde(default = "default_pg_user")]
  pub user:     String,
  #[serde(
    default = "default_pg_password"
  )]
  pub password: String,
  #[serde(
    default = "default_pg_database"
  )]
  pub db:       String
}

impl Default for RawPostgres {
  fn default() -> Self {
    Self {
      host:     default_pg_host(),
      port:     default_pg_port(),
      user:     default_pg_user(),
      password: default_pg_password(),
      db:       default_pg_database()
    }
  }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawLogging {
  #[serde(default = "default_log_level")]
  pub level: String
}

impl Default for RawLogging {
  fn default() -> Self {
    Self {
      level: default_log_level()
    }
  }
}
