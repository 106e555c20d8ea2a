use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
pub enum BootError {
  #[error("fatal: {0}")]
  Fatal(String)
}

/// Filter used when `RUST_LOG` is unset:
/// the configured level for our crates,
/// sqlx held at `warn` so per-statement
/// logs stay out of the cycle output.
pub fn default_directives(
  level: &str
) -> String {
  format!(
    "{level},numtick_core={level},\
     numtick={level},sqlx=warn"
  )
}

pub fn init_logging(level: &str) {
  let filter =
    EnvFilter::try_from_default_env()
      .unwrap_or_else(|_| {
        EnvFilter::new(default_directives(
          level
        ))
      });

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(true)
    .with_level(true)
    .init();
}
