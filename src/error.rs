//! Error types reported by the optimizer.

use thiserror::Error;

/// Errors that can occur while configuring or running an optimizer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
  /// Population is too small to pick three distinct donors besides the
  /// target agent.
  #[error("population size ({size}) must be >= 4")]
  PopulationTooSmall {
    /// The rejected population size.
    size: usize,
  },

  /// The target reports zero dimensions.
  #[error("target must have at least one dimension")]
  NoDimensions,

  /// The target reports a number of constraints different from its
  /// dimensionality.
  #[error("target has {dimensionality} dimensions but {constraints} constraints")]
  ConstraintCountMismatch {
    /// Reported dimensionality.
    dimensionality: usize,
    /// Number of reported constraints.
    constraints: usize,
  },

  /// A constraint's bounds are not finite or are reversed.
  #[error("invalid bounds at dimension {index}: [{lower}, {upper}]")]
  InvalidBounds {
    /// Dimension of the offending constraint.
    index: usize,
    /// Its lower bound.
    lower: f64,
    /// Its upper bound.
    upper: f64,
  },

  /// Mutation factor is not a finite number.
  #[error("invalid mutation factor: {factor}")]
  InvalidMutationFactor {
    /// The rejected factor.
    factor: f64,
  },

  /// Crossover probability bounds are not finite or are reversed.
  #[error("invalid crossover probability range: [{low}, {high}]")]
  InvalidCrossoverRange {
    /// Lower bound of the range.
    low: f64,
    /// Upper bound of the range.
    high: f64,
  },

  /// An operation requires an initialized population.
  #[error("population is not initialized")]
  NotInitialized,

  /// Population was already initialized.
  #[error("population is already initialized")]
  AlreadyInitialized,

  /// No valid trial vector was produced for a slot within the retry limit.
  ///
  /// The generation is left partially applied. Slots before `slot` may
  /// already hold their replacements, while the generation counter is not
  /// incremented. The optimizer should not be evolved any further.
  #[error(
    "no valid trial for slot {slot} after {attempts} attempts in generation {generation}"
  )]
  InfeasibleRegion {
    /// Generation being evolved, counting from 1.
    generation: usize,
    /// Population slot that could not be evolved.
    slot: usize,
    /// Attempts made.
    attempts: usize,
  },
}

/// A specialized `Result` type for optimizer operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
  /// Returns `true` if the error was caused by invalid hyperparameters or an
  /// invalid target.
  pub fn is_config_error(&self) -> bool {
    matches!(
      self,
      Error::PopulationTooSmall { .. }
        | Error::NoDimensions
        | Error::ConstraintCountMismatch { .. }
        | Error::InvalidBounds { .. }
        | Error::InvalidMutationFactor { .. }
        | Error::InvalidCrossoverRange { .. }
    )
  }

  /// Returns `true` if an operation was called in the wrong lifecycle state.
  pub fn is_misuse_error(&self) -> bool {
    matches!(self, Error::NotInitialized | Error::AlreadyInitialized)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_error_display() {
    assert_eq!(
      Error::PopulationTooSmall { size: 3 }.to_string(),
      "population size (3) must be >= 4"
    );
    assert_eq!(
      Error::InfeasibleRegion {
        generation: 2,
        slot: 7,
        attempts: 100
      }
      .to_string(),
      "no valid trial for slot 7 after 100 attempts in generation 2"
    );
  }

  #[test]
  fn test_categories() {
    assert!(Error::NoDimensions.is_config_error());
    assert!(!Error::NoDimensions.is_misuse_error());
    assert!(Error::NotInitialized.is_misuse_error());
    assert!(!Error::AlreadyInitialized.is_config_error());
    let infeasible = Error::InfeasibleRegion {
      generation: 1,
      slot: 0,
      attempts: 1,
    };
    assert!(!infeasible.is_config_error());
    assert!(!infeasible.is_misuse_error());
  }
}
