//! Structural check of `config.toml`
//! against the shipped
//! `schemas/config.schema.json`, run
//! before any field is interpreted.
use std::path::Path;

use serde_json::Value;
use tokio::fs;

use super::ConfigError;

pub(crate) const CONFIG_SCHEMA_FILE: &str =
  "config.schema.json";

// Caps the violations listed in one
// error message.
const MAX_REPORTED: usize = 5;

pub(crate) async fn load_config_schema(
  schema_dir: &Path
) -> Result<Value, ConfigError> {
  let path =
    schema_dir.join(CONFIG_SCHEMA_FILE);

  let text = fs::read_to_string(&path)
    .await
    .map_err(|e| {
      ConfigError::Invalid(format!(
        "config schema missing at {}: {e}",
        path.display()
      ))
    })?;

  serde_json::from_str(&text).map_err(|e| {
    ConfigError::Invalid(format!(
      "config schema at {} is not JSON: \
       {e}",
      path.display()
    ))
  })
}

/// Fails with every violation (up to
/// `MAX_REPORTED`), each prefixed by the
/// offending key path, e.g.
/// `/runner/on_error`.
pub(crate) fn check_config_shape(
  schema: &Value,
  toml_text: &str,
  config_path: &Path
) -> Result<(), ConfigError> {
  let validator =
    jsonschema::validator_for(schema)
      .map_err(|e| {
        ConfigError::Invalid(format!(
          "{CONFIG_SCHEMA_FILE} does not \
           compile: {e}"
        ))
      })?;

  let doc: toml::Value =
    toml::from_str(toml_text)?;

  let doc = serde_json::to_value(doc)
    .map_err(|e| {
      ConfigError::Invalid(format!(
        "{} cannot be checked: {e}",
        config_path.display()
      ))
    })?;

  let violations: Vec<String> = validator
    .iter_errors(&doc)
    .take(MAX_REPORTED)
    .map(|e| {
      let at = e.instance_path.to_string();

      if at.is_empty() {
        format!("(top level): {e}")
      } else {
        format!("{at}: {e}")
      }
    })
    .collect();

  if violations.is_empty() {
    return Ok(());
  }

  Err(ConfigError::Invalid(format!(
    "{} does not match \
     {CONFIG_SCHEMA_FILE}: {}",
    config_path.display(),
    violations.join("; ")
  )))
}
