//! Abstract optimizer.

pub mod differential_evolution;
pub mod generational;
pub mod hyperparameters;

use crate::error::Result;

/// How a run ended.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Outcome {
  /// Every requested generation was evolved.
  Completed {
    /// Generations completed in total.
    generations: usize,
  },
  /// The termination operator stopped the run.
  Stopped {
    /// The generation after which the run stopped.
    generation: usize,
  },
}

impl Outcome {
  /// Number of completed generations, regardless of how the run ended.
  pub fn generations(&self) -> usize {
    match *self {
      Outcome::Completed { generations } => generations,
      Outcome::Stopped { generation } => generation,
    }
  }

  /// Whether the run was stopped early.
  pub fn is_stopped(&self) -> bool {
    matches!(self, Outcome::Stopped { .. })
  }
}

/// Represents an abstract optimizer.
pub trait Optimizer {
  /// Initializes the population, then evolves it for up to `max_generations`
  /// generations or until the termination operator stops the run.
  fn optimize(&mut self, max_generations: usize) -> Result<Outcome>;
}
