//! In-memory port implementations shared
//! by the integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::{
  Path,
  PathBuf
};
use std::sync::atomic::{
  AtomicBool,
  AtomicI64,
  Ordering
};
use std::sync::{
  Arc,
  Mutex
};
use std::time::Duration;

use numtick_core::app::context::AppContext;
use numtick_core::domain::error::{
  StoreError,
  StoreStage
};
use numtick_core::domain::model::{
  FailurePolicy,
  MAX_VALUE,
  MIN_VALUE,
  NumberRow,
  RunSettings
};
use numtick_core::infra::text_file::TextFileSink;
use numtick_core::ports::clock::Clock;
use numtick_core::ports::random::RandomSource;
use numtick_core::ports::repo::NumberRepo;

/// Clock that never blocks: `sleep`
/// records the request and advances the
/// virtual time.
#[derive(Default)]
pub struct FakeClock {
  now_ms: AtomicI64,
  sleeps: Mutex<Vec<Duration>>
}

impl FakeClock {
  pub fn sleeps(&self) -> Vec<Duration> {
    self.sleeps.lock().unwrap().clone()
  }
}

#[async_trait::async_trait]
impl Clock for FakeClock {
  async fn now_epoch_ms(&self) -> i64 {
    self.now_ms.load(Ordering::SeqCst)
  }

  async fn sleep(&self, duration: Duration) {
    self.sleeps.lock().unwrap().push(duration);
    self
      .now_ms
      .fetch_add(duration.as_millis() as i64, Ordering::SeqCst);
  }
}

/// Replays a fixed list of values; the
/// last one repeats once the list runs
/// out.
pub struct ScriptedRng {
  values: Mutex<VecDeque<i32>>,
  last:   Mutex<i32>
}

impl ScriptedRng {
  pub fn new(values: &[i32]) -> Self {
    Self {
      values: Mutex::new(values.iter().copied().collect()),
      last:   Mutex::new(*values.last().unwrap_or(&MIN_VALUE))
    }
  }
}

#[async_trait::async_trait]
impl RandomSource for ScriptedRng {
  async fn next_in_range(&self, _low: i32, _high: i32) -> i32 {
    match self.values.lock().unwrap().pop_front() {
      | Some(v) => {
        *self.last.lock().unwrap() = v;
        v
      }
      | None => *self.last.lock().unwrap()
    }
  }
}

#[derive(Default)]
pub struct MemoryRepo {
  rows:    Mutex<Vec<NumberRow>>,
  failing: AtomicBool
}

impl MemoryRepo {
  pub fn rows(&self) -> Vec<NumberRow> {
    self.rows.lock().unwrap().clone()
  }

  pub fn set_failing(&self, failing: bool) {
    self.failing.store(failing, Ordering::SeqCst);
  }
}

#[async_trait::async_trait]
impl NumberRepo for MemoryRepo {
  async fn insert_number(&self, value: i32) -> Result<NumberRow, StoreError> {
    if self.failing.load(Ordering::SeqCst) {
      return Err(StoreError::new(
        StoreStage::Connect,
        "connection refused"
      ));
    }

    let mut rows = self.rows.lock().unwrap();
    let row = NumberRow {
      id:     rows.len() as i64 + 1,
      number: value,
      ctime:  chrono::Utc::now().naive_utc()
    };
    rows.push(row.clone());
    Ok(row)
  }
}

pub fn settings(output_path: &Path, on_error: FailurePolicy) -> RunSettings {
  RunSettings {
    interval: Duration::from_secs(5),
    min_value: MIN_VALUE,
    max_value: MAX_VALUE,
    on_error,
    timezone: chrono_tz::UTC,
    output_path: output_path.to_path_buf()
  }
}

pub struct Harness<R: NumberRepo> {
  pub ctx:   AppContext<TextFileSink, R, FakeClock, ScriptedRng>,
  pub repo:  Arc<R>,
  pub clock: Arc<FakeClock>,
  pub path:  PathBuf
}

pub fn harness_with<R: NumberRepo>(
  output_path: &Path,
  on_error: FailurePolicy,
  values: &[i32],
  repo: R
) -> Harness<R> {
  let repo = Arc::new(repo);
  let clock = Arc::new(FakeClock::default());
  let ctx = AppContext {
    settings: Arc::new(settings(output_path, on_error)),
    sink:     Arc::new(TextFileSink::new(output_path)),
    repo:     Arc::clone(&repo),
    clock:    Arc::clone(&clock),
    rng:      Arc::new(ScriptedRng::new(values))
  };

  Harness {
    ctx,
    repo,
    clock,
    path: output_path.to_path_buf()
  }
}

pub fn harness(
  output_path: &Path,
  on_error: FailurePolicy,
  values: &[i32]
) -> Harness<MemoryRepo> {
  harness_with(output_path, on_error, values, MemoryRepo::default())
}

pub fn read_lines(path: &Path) -> Vec<String> {
  std::fs::read_to_string(path)
    .map(|s| s.lines().map(str::to_string).collect())
    .unwrap_or_default()
}
