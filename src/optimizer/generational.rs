//! Generation-by-generation driver shared by population-based optimizers.

use tracing::info;

use super::{Optimizer, Outcome};
use crate::error::Result;

/// Represents an abstract generational algorithm: a population that is
/// initialized once and then evolved one generation at a time.
pub trait Generational {
  /// Samples and evaluates the initial population.
  fn initialize(&mut self) -> Result<()>;

  /// Evolves the population by one generation.
  ///
  /// If this fails halfway, the population may be left partially evolved.
  fn evolve(&mut self) -> Result<()>;

  /// Number of completed generations.
  fn generation(&self) -> usize;

  /// Records the number of generations the current run was asked for.
  fn set_max_generation(&mut self, max_generation: usize);

  /// Best fitness found so far, if the population is initialized.
  fn best(&self) -> Option<f64>;

  /// Runs the per-generation hooks. If returns `true`, the run stops.
  fn conclude_generation(&mut self) -> bool;
}

impl<G: Generational> Optimizer for G {
  fn optimize(&mut self, max_generations: usize) -> Result<Outcome> {
    self.initialize()?;
    self.set_max_generation(max_generations);
    info!(max_generations, "run started");

    for _ in 0..max_generations {
      self.evolve()?;
      if self.conclude_generation() {
        let generation = self.generation();
        info!(
          generation,
          best_fitness = self.best(),
          "early stop"
        );
        return Ok(Outcome::Stopped { generation });
      }
    }

    let generations = self.generation();
    info!(generations, best_fitness = self.best(), "normal end");
    Ok(Outcome::Completed { generations })
  }
}
