use std::sync::Arc;

use crate::domain::model::RunSettings;
use crate::ports::clock::Clock;
use crate::ports::random::RandomSource;
use crate::ports::repo::NumberRepo;
use crate::ports::sink::LineSink;

/// Bundles the runtime dependencies the
/// runner needs (settings, text sink,
/// number repository, clock, and
/// randomness source).
pub struct AppContext<S, R, C, G>
where
  S: LineSink + ?Sized,
  R: NumberRepo + ?Sized,
  C: Clock,
  G: RandomSource
{
  pub settings: Arc<RunSettings>,
  pub sink:     Arc<S>,
  pub repo:     Arc<R>,
  pub clock:    Arc<C>,
  pub rng:      Arc<G>
}

impl<S, R, C, G> Clone
  for AppContext<S, R, C, G>
where
  S: LineSink + ?Sized,
  R: NumberRepo + ?Sized,
  C: Clock,
  G: RandomSource
{
  fn clone(&self) -> Self {
    Self {
      settings: Arc::clone(
        &self.settings
      ),
      sink:     Arc::clone(&self.sink),
      repo:     Arc::clone(&self.repo),
      clock:    Arc::clone(&self.clock),
      rng:      Arc::clone(&self.rng)
    }
  }
}
