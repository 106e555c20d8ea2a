use std::path::PathBuf;

use clap::{
  Parser,
  Subcommand
};
use numtick_core::domain::model::OUTPUT_PATH;
use numtick_core::infra::config::ConfigLoader;
use numtick_core::infra::postgres_repo::PostgresRepo;
use numtick_core::infra::text_file::remove_text_log;

#[derive(Parser)]
#[command(
  author,
  version,
  about = "numtick ops CLI"
)]
struct Args {
  #[command(subcommand)]
  command: Command
}

#[derive(Subcommand)]
enum Command {
  /// Validate TOML config (schema +
  /// semantic checks).
  Validate {
    /// Path to config.toml (defaults
    /// to CONFIG_PATH or
    /// crates/ticker/res/config.toml).
    config_path: Option<PathBuf>
  },
  /// Connect to Postgres and verify the
  /// `numbers` table and `numbers_seq`
  /// sequence exist.
  CheckDb {
    /// Path to config.toml (defaults
    /// to CONFIG_PATH or
    /// crates/ticker/res/config.toml).
    config_path: Option<PathBuf>
  },
  /// Remove the text log with a safety
  /// flag.
  Clean {
    /// File to remove (defaults to
    /// ./my_text.txt).
    #[arg(long)]
    path:    Option<PathBuf>,
    /// Required to perform destructive
    /// actions.
    #[arg(long)]
    confirm: bool
  }
}

#[tokio::main]
async fn main() -> Result<(), String> {
  let args = Args::parse();

  match args.command {
    | Command::Validate {
      config_path
    } => {
      let cfg_path =
        pick_config_path(config_path);

      ConfigLoader::load(&cfg_path)
        .await
        .map_err(|e| e.to_string())?;

      println!(
        "ok: config validated at {}",
        cfg_path.display()
      );
    }
    | Command::CheckDb {
      config_path
    } => {
      let cfg_path =
        pick_config_path(config_path);

      let cfg =
        ConfigLoader::load(&cfg_path)
          .await
          .map_err(|e| e.to_string())?;

      let status = PostgresRepo::new(
        &cfg.postgres,
        &cfg.timezone
      )
      .check_schema()
      .await
      .map_err(|e| e.to_string())?;

      if !status.is_ready() {
        return Err(format!(
          "schema incomplete: \
           numbers table present={}, \
           numbers_seq present={}",
          status.has_table,
          status.has_sequence
        ));
      }

      println!(
        "ok: numbers and numbers_seq \
         present on {}:{}/{}",
        cfg.postgres.host,
        cfg.postgres.port,
        cfg.postgres.database
      );
    }
    | Command::Clean {
      path,
      confirm
    } => {
      if !confirm {
        return Err(
          "refusing to clean without \
           --confirm"
            .to_string()
        );
      }

      let target = path.unwrap_or_else(
        || PathBuf::from(OUTPUT_PATH)
      );

      let removed = remove_text_log(&target)
        .await
        .map_err(|e| {
          format!(
            "failed to remove {}: {e}",
            target.display()
          )
        })?;

      if removed {
        println!(
          "ok: removed {}",
          target.display()
        );
      } else {
        println!(
          "ok: nothing to remove, {} \
           does not exist",
          target.display()
        );
      }
    }
  }

  Ok(())
}

fn pick_config_path(
  arg: Option<PathBuf>
) -> PathBuf {
  if let Some(p) = arg {
    return p;
  }

  // CLI flags win; fall back to
  // CONFIG_PATH, then the repo-local
  // default.
  if let Ok(p) =
    std::env::var("CONFIG_PATH")
    && !p.trim().is_empty()
  {
    return PathBuf::from(p);
  }

  PathBuf::from(
    "crates/ticker/res/config.toml"
  )
}
