use std::path::PathBuf;
use std::sync::Arc;

use numtick_core::app::context::AppContext;
use numtick_core::app::runner::Runner;
use numtick_core::domain::model::RunSettings;
use numtick_core::infra::config::ConfigLoader;
use numtick_core::infra::logging::{
  BootError,
  init_logging
};
use numtick_core::infra::postgres_repo::PostgresRepo;
use numtick_core::infra::random::MutexRng;
use numtick_core::infra::system_clock::SystemClock;
use numtick_core::infra::text_file::TextFileSink;
use tracing::info;

/// Binary entrypoint:
/// - parses CLI args (`CONFIG_PATH` and
///   optional `--cycles N`)
/// - loads the TOML config, initializes
///   logging
/// - wires the text file sink, Postgres
///   repo, clock and rng into the
///   runner
/// - exits with `BootError` on startup
///   errors or when the runner stops on
///   a failed cycle
#[tokio::main]
async fn main() -> Result<(), BootError>
{
  let args = parse_args()?;

  let cfg_path =
    pick_config_path(args.config_path);

  let cfg = ConfigLoader::load(&cfg_path)
    .await
    .map_err(|e| {
      BootError::Fatal(e.to_string())
    })?;

  init_logging(&cfg.log_level);

  let settings =
    Arc::new(RunSettings::from_config(&cfg));

  info!(
    config = %cfg_path.display(),
    timezone = %cfg.timezone,
    on_error = ?cfg.on_error,
    output = %settings.output_path.display(),
    db = %format!(
      "postgres://{}@{}:{}/{}",
      cfg.postgres.user,
      cfg.postgres.host,
      cfg.postgres.port,
      cfg.postgres.database
    ),
    interval_ms = settings.interval.as_millis(),
    "Loaded config"
  );

  let ctx = AppContext {
    sink:     Arc::new(TextFileSink::new(
      settings.output_path.clone()
    )),
    repo:     Arc::new(PostgresRepo::new(
      &cfg.postgres,
      &cfg.timezone
    )),
    clock:    Arc::new(SystemClock),
    rng:      Arc::new(MutexRng::new()),
    settings
  };

  let result = match args.max_cycles {
    | Some(n) => {
      info!(cycles = n, "Bounded run");

      Runner::run_cycles(ctx, Some(n))
        .await
        .map(|_| ())
    }
    | None => Runner::run_forever(ctx).await
  };

  // The runner already logged the
  // failing cycle.
  result.map_err(|e| {
    BootError::Fatal(e.to_string())
  })
}

fn pick_config_path(
  arg1: Option<String>
) -> PathBuf {
  if let Some(p) = arg1 {
    return PathBuf::from(p);
  }

  if let Ok(p) =
    std::env::var("CONFIG_PATH")
    && !p.trim().is_empty()
  {
    return PathBuf::from(p);
  }

  let candidates = [
    PathBuf::from(
      "crates/ticker/res/config.toml"
    ),
    PathBuf::from("res/config.toml")
  ];

  for p in &candidates {
    if p.exists() {
      return p.clone();
    }
  }

  candidates[0].clone()
}

struct Args {
  config_path: Option<String>,
  max_cycles:  Option<u64>
}

fn parse_args() -> Result<Args, BootError>
{
  let mut args =
    std::env::args().skip(1);

  let mut config_path = None;

  let mut max_cycles = None;

  while let Some(arg) = args.next() {
    if arg == "--cycles" {
      let n = args
        .next()
        .and_then(|n| n.parse::<u64>().ok())
        .filter(|n| *n > 0)
        .ok_or_else(|| {
          BootError::Fatal(
            "--cycles requires a count \
             > 0"
              .into()
          )
        })?;

      max_cycles = Some(n);
    } else {
      config_path = Some(arg);
    }
  }

  Ok(Args {
    config_path,
    max_cycles
  })
}
