//! Hyperparameters of the differential evolution optimizer.

use std::ops::RangeInclusive;

use typed_builder::TypedBuilder;

use crate::{
  error::{Error, Result},
  random::{is_sampleable, RandomSource},
  retrying::RetryPolicy,
};

/// Seed used unless another one is configured.
pub const DEFAULT_SEED: u64 = 4396;

/// Crossover probability of a generation.
///
/// When its bounds are equal, the probability is fixed. Otherwise a value is
/// drawn uniformly from `[low, high]` once per generation and shared by every
/// agent of that generation. Values above `1` are allowed and simply make the
/// trial copy the whole mutant.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct CrossoverProbability {
  low: f64,
  high: f64,
}

impl CrossoverProbability {
  /// Creates a crossover probability ranging over `[low, high]`.
  pub fn new(low: f64, high: f64) -> Self {
    Self { low, high }
  }

  /// Lower bound.
  pub fn low(&self) -> f64 {
    self.low
  }

  /// Upper bound.
  pub fn high(&self) -> f64 {
    self.high
  }

  /// Whether the probability never changes between generations.
  pub fn is_fixed(&self) -> bool {
    self.low == self.high
  }

  /// Returns this generation's probability. Draws from `rng` only when the
  /// probability isn't fixed.
  pub(crate) fn sample<R: RandomSource + ?Sized>(&self, rng: &mut R) -> f64 {
    if self.is_fixed() {
      self.low
    } else {
      rng.uniform(self.low, self.high)
    }
  }
}

impl From<f64> for CrossoverProbability {
  fn from(probability: f64) -> Self {
    Self::new(probability, probability)
  }
}

impl From<RangeInclusive<f64>> for CrossoverProbability {
  fn from(range: RangeInclusive<f64>) -> Self {
    let (low, high) = range.into_inner();
    Self::new(low, high)
  }
}

/// Hyperparameters of [`DifferentialEvolution`].
///
/// ```
/// # use diffevo::optimizer::hyperparameters::Hyperparameters;
/// let params = Hyperparameters::builder()
///   .population_size(20)
///   .mutation_factor(0.5)
///   .crossover(0.5..=1.3)
///   .build();
/// assert_eq!(params.seed, 4396);
/// ```
///
/// [`DifferentialEvolution`]: super::differential_evolution::DifferentialEvolution
#[derive(TypedBuilder, Clone, PartialEq, Debug)]
pub struct Hyperparameters {
  /// Number of agents, `NP`. Must be at least 4.
  #[builder(default = 20)]
  pub population_size: usize,
  /// Differential weight, `F`.
  #[builder(default = 0.8)]
  pub mutation_factor: f64,
  /// Crossover probability, `CR`. Accepts a `f64` or a `RangeInclusive<f64>`.
  #[builder(default = CrossoverProbability::from(0.95), setter(into))]
  pub crossover: CrossoverProbability,
  /// Seed of the optimizer's random generator.
  #[builder(default = DEFAULT_SEED)]
  pub seed: u64,
  /// How to handle trial vectors that violate constraints. Accepts a
  /// `RetryPolicy` or a `usize` attempt limit.
  #[builder(default, setter(into))]
  pub retry: RetryPolicy,
  /// Log each generation at `info` instead of `debug` level.
  #[builder(default = false)]
  pub verbose: bool,
}

impl Default for Hyperparameters {
  fn default() -> Self {
    Self::builder().build()
  }
}

impl Hyperparameters {
  /// Checks the values that don't depend on a target.
  ///
  /// The crossover range must be finite, ordered and narrow enough for its
  /// width to be finite, since a probability is drawn from it.
  pub fn validate(&self) -> Result<()> {
    if self.population_size < 4 {
      return Err(Error::PopulationTooSmall {
        size: self.population_size,
      });
    }
    if !self.mutation_factor.is_finite() {
      return Err(Error::InvalidMutationFactor {
        factor: self.mutation_factor,
      });
    }
    let CrossoverProbability { low, high } = self.crossover;
    if !is_sampleable(low, high) {
      return Err(Error::InvalidCrossoverRange { low, high });
    }
    Ok(())
  }
}
