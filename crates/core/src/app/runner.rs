// Cycle loop: sleeps, draws a number,
// appends it to the text log, then
// inserts it into Postgres.
use std::time::Instant;

use tracing::{
  debug,
  error,
  info,
  warn
};

use crate::app::context::AppContext;
use crate::domain::error::CycleError;
use crate::domain::model::{
  CycleReport,
  FailurePolicy,
  RunSummary
};
use crate::infra::time::format_tick_time;
use crate::ports::clock::Clock;
use crate::ports::random::RandomSource;
use crate::ports::repo::NumberRepo;
use crate::ports::sink::LineSink;

pub struct Runner;

impl Runner {
  /// Runs cycles until the process is
  /// killed. Only returns when the
  /// failure policy is `Terminate` and a
  /// cycle fails.
  pub async fn run_forever<S, R, C, G>(
    ctx: AppContext<S, R, C, G>
  ) -> Result<(), CycleError>
  where
    S: LineSink + ?Sized + 'static,
    R: NumberRepo + ?Sized + 'static,
    C: Clock + 'static,
    G: RandomSource + 'static
  {
    Self::run_cycles(ctx, None)
      .await
      .map(|_| ())
  }

  /// Runs at most `max_cycles` cycles
  /// (unbounded when `None`).
  pub async fn run_cycles<S, R, C, G>(
    ctx: AppContext<S, R, C, G>,
    max_cycles: Option<u64>
  ) -> Result<RunSummary, CycleError>
  where
    S: LineSink + ?Sized + 'static,
    R: NumberRepo + ?Sized + 'static,
    C: Clock + 'static,
    G: RandomSource + 'static
  {
    let mut summary =
      RunSummary::default();

    let mut cycle: u64 = 0;

    loop {
      if max_cycles
        .is_some_and(|max| cycle >= max)
      {
        break;
      }

      cycle += 1;

      ctx
        .clock
        .sleep(ctx.settings.interval)
        .await;

      match Self::run_cycle(&ctx, cycle)
        .await
      {
        | Ok(_) => summary.completed += 1,
        | Err(e) => {
          summary.failed += 1;

          match ctx.settings.on_error {
            | FailurePolicy::Terminate => {
              error!(
                cycle,
                kind = e.kind(),
                error = %e,
                "Cycle failed, stopping"
              );

              return Err(e);
            }
            | FailurePolicy::Continue => {
              warn!(
                cycle,
                kind = e.kind(),
                error = %e,
                "Cycle failed, continuing"
              );
            }
          }
        }
      }
    }

    info!(
      completed = summary.completed,
      failed = summary.failed,
      "Run finished"
    );

    Ok(summary)
  }

  /// One cycle without the leading
  /// sleep: draw a value, append it to
  /// the sink, then insert it. The
  /// insert is skipped when the append
  /// fails.
  pub async fn run_cycle<S, R, C, G>(
    ctx: &AppContext<S, R, C, G>,
    cycle: u64
  ) -> Result<CycleReport, CycleError>
  where
    S: LineSink + ?Sized,
    R: NumberRepo + ?Sized,
    C: Clock,
    G: RandomSource
  {
    let started = Instant::now();

    let now_ms =
      ctx.clock.now_epoch_ms().await;

    let settings = &ctx.settings;

    let value = ctx
      .rng
      .next_in_range(
        settings.min_value,
        settings.max_value
      )
      .await;

    debug!(cycle, value, "Drew value");

    ctx.sink.append(value).await?;

    let row =
      ctx.repo.insert_number(value).await?;

    info!(
      cycle,
      value,
      id = row.id,
      tick_time = %format_tick_time(now_ms, &settings.timezone),
      total_ms = started.elapsed().as_millis(),
      "Cycle complete"
    );

    Ok(CycleReport { value, row })
  }
}
