//! Read-only view of an optimizer's state.

use crate::score::{Agent, Fitness, GlobalBest};

/// A snapshot of an initialized optimizer, borrowed from it.
///
/// This is what observers and terminations receive after each generation.
/// It gives no way to mutate the optimizer.
#[derive(Clone, Copy, Debug)]
pub struct Progress<'a> {
  population: &'a [Agent],
  fitness: &'a [Fitness],
  best: GlobalBest,
  generation: usize,
  max_generation: usize,
}

impl<'a> Progress<'a> {
  pub(crate) fn new(
    population: &'a [Agent],
    fitness: &'a [Fitness],
    best: GlobalBest,
    generation: usize,
    max_generation: usize,
  ) -> Self {
    debug_assert_eq!(population.len(), fitness.len());
    debug_assert!(best.index < population.len());
    Self {
      population,
      fitness,
      best,
      generation,
      max_generation,
    }
  }

  /// Number of completed generations.
  pub fn generation(&self) -> usize {
    self.generation
  }

  /// Number of generations the current run was asked for. `0` until a run
  /// is started.
  pub fn max_generation(&self) -> usize {
    self.max_generation
  }

  /// Agents, indexed by population slot.
  pub fn population(&self) -> &'a [Agent] {
    self.population
  }

  /// Current fitness of each slot.
  pub fn fitness(&self) -> &'a [Fitness] {
    self.fitness
  }

  /// Slot holding the best agent.
  pub fn best_index(&self) -> usize {
    self.best.index
  }

  /// Fitness of the best slot.
  pub fn best_fitness(&self) -> Fitness {
    self.fitness[self.best.index]
  }

  /// The best agent.
  pub fn best_agent(&self) -> &'a [f64] {
    &self.population[self.best.index]
  }
}
