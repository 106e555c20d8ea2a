use chrono_tz::Tz;

use super::ConfigError;
use super::raw::RawPostgres;
use crate::domain::model::{
  FailurePolicy,
  PostgresConfig
};

pub(crate) fn parse_on_error(
  s: &str
) -> Result<FailurePolicy, ConfigError> {
  match s.trim().to_ascii_lowercase().as_str()
  {
    | "terminate" => {
      Ok(FailurePolicy::Terminate)
    }
    | "continue" => {
      Ok(FailurePolicy::Continue)
    }
    | other => {
      Err(ConfigError::Invalid(format!(
        "invalid runner.on_error \
         '{other}', expected \
         'terminate' or 'continue'"
      )))
    }
  }
}

pub(crate) fn parse_timezone(
  s: &str
) -> Result<Tz, ConfigError> {
  let trimmed = s.trim();

  trimmed.parse().map_err(|_| {
    ConfigError::Invalid(format!(
      "invalid timezone '{trimmed}'"
    ))
  })
}

/// Overlays the connection parameters
/// found through `lookup` onto the file
/// values. Blank variables are ignored.
pub(crate) fn apply_env_overrides<F>(
  pg: &mut RawPostgres,
  lookup: F
) -> Result<(), ConfigError>
where
  F: Fn(&str) -> Option<String>
{
  let get = |key: &str| {
    lookup(key)
      .map(|v| v.trim().to_string())
      .filter(|v| !v.is_empty())
  };

  if let Some(host) = get("POSTGRES_HOST") {
    pg.host = host;
  }

  if let Some(port) = get("POSTGRES_PORT") {
    pg.port = port.parse().map_err(|_| {
      ConfigError::Invalid(format!(
        "invalid POSTGRES_PORT '{port}'"
      ))
    })?;
  }

  if let Some(user) = get("POSTGRES_USER") {
    pg.user = user;
  }

  if let Some(password) =
    get("POSTGRES_PASSWORD")
  {
    pg.password = password;
  }

  if let Some(db) = get("POSTGRES_DB") {
    pg.db = db;
  }

  Ok(())
}

pub(crate) fn parse_postgres(
  pg: RawPostgres
) -> Result<PostgresConfig, ConfigError> {
  if pg.host.trim().is_empty() {
    return Err(ConfigError::Invalid(
      "postgres.host cannot be empty"
        .into()
    ));
  }

  if pg.port == 0 {
    return Err(ConfigError::Invalid(
      "postgres.port cannot be 0".into()
    ));
  }

  if pg.db.trim().is_empty() {
    return Err(ConfigError::Invalid(
      "postgres.db cannot be empty".into()
    ));
  }

  Ok(PostgresConfig {
    host:     pg.host.trim().to_string(),
    port:     pg.port,
    user:     pg.user,
    password: pg.password,
    database: pg.db.trim().to_string()
  })
}
