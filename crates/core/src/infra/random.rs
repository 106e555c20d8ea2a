//! Mutex-protected RNG implementing the
//! `RandomSource` port.

use rand::rngs::StdRng;
use rand::{
  Rng,
  SeedableRng
};
use tokio::sync::Mutex;

use crate::ports::random::RandomSource;

pub struct MutexRng {
  inner: Mutex<StdRng>
}

impl MutexRng {
  pub fn new() -> Self {
    let seed = rand::rng().random::<[u8; 32]>();

    Self {
      inner: Mutex::new(
        StdRng::from_seed(seed)
      )
    }
  }

  /// Deterministic stream for a given
  /// seed.
  pub fn seeded(seed: u64) -> Self {
    Self {
      inner: Mutex::new(
        StdRng::seed_from_u64(seed)
      )
    }
  }
}

impl Default for MutexRng {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait::async_trait]
impl RandomSource for MutexRng {
  async fn next_in_range(
    &self,
    low: i32,
    high: i32
  ) -> i32 {
    let mut g = self.inner.lock().await;

    g.random_range(low..=high)
  }
}
