use super::ConfigError;

pub(crate) fn default_timezone() -> String {
  "UTC".to_string()
}

pub(crate) fn default_on_error() -> String {
  "terminate".to_string()
}

pub(crate) fn default_pg_host() -> String {
  "localhost".to_string()
}

pub(crate) fn default_pg_port() -> u16 {
  5432
}

pub(crate) fn default_pg_user() -> String {
  "postgres".to_string()
}

pub(crate) fn default_pg_password() -> String {
  "postgres".to_string()
}

pub(crate) fn default_pg_database() -> String {
  "postgres".to_string()
}

pub(crate) fn default_log_level() -> String {
  "info".to_string()
}

pub(crate) fn normalize_log_level(
  level: &str
) -> Result<String, ConfigError> {
  let l = level.trim().to_ascii_lowercase();

  if l.is_empty() {
    return Err(ConfigError::Invalid(
      "logging.level cannot be empty"
        .into()
    ));
  }

  match l.as_str() {
    | "error" | "warn" | "info"
    | "debug" | "trace" | "off" => Ok(l),
    | _ => {
      Err(ConfigError::Invalid(format!(
        "invalid logging.level \
         '{level}', expected \
         error|warn|info|debug|trace|off"
      )))
    }
  }
}
