use std::path::Path;

use tokio::fs;

use super::ConfigError;
use super::defaults::normalize_log_level;
use super::parse::{
  apply_env_overrides,
  parse_on_error,
  parse_postgres,
  parse_timezone
};
use super::raw::RawAppFile;
use super::schema::{
  check_config_shape,
  load_config_schema
};
use crate::domain::model::AppConfig;

pub struct ConfigLoader;

impl ConfigLoader {
  /// Loads `config_path`, validating it
  /// against `schemas/config.schema.json`
  /// next to it, then applies the
  /// `POSTGRES_*` environment overrides.
  pub async fn load(
    config_path: &Path
  ) -> Result<AppConfig, ConfigError> {
    Self::load_with_env(config_path, |k| {
      std::env::var(k).ok()
    })
    .await
  }

  pub async fn load_with_env<F>(
    config_path: &Path,
    lookup: F
  ) -> Result<AppConfig, ConfigError>
  where
    F: Fn(&str) -> Option<String>
  {
    let base_dir = config_path
      .parent()
      .ok_or_else(|| {
        ConfigError::Invalid(
          "config path has no parent"
            .into()
        )
      })?;

    let schema_dir =
      base_dir.join("schemas");

    let config_schema =
      load_config_schema(&schema_dir).await?;

    let app_content =
      fs::read_to_string(config_path)
        .await?;

    check_config_shape(
      &config_schema,
      &app_content,
      config_path
    )?;

    let mut raw: RawAppFile =
      toml::from_str(&app_content)?;

    apply_env_overrides(
      &mut raw.postgres,
      lookup
    )?;

    let timezone =
      parse_timezone(&raw.app.timezone)?;

    let on_error =
      parse_on_error(&raw.runner.on_error)?;

    let log_level =
      normalize_log_level(&raw.logging.level)?;

    let postgres =
      parse_postgres(raw.postgres)?;

    Ok(AppConfig {
      timezone,
      on_error,
      log_level,
      postgres
    })
  }
}
