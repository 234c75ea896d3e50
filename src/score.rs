//! Type aliases for a more convenient representation of agents and their
//! fitness used throughout the library.

/// An alias for a fitness value. Lower is better.
///
/// `+infinity` is the conventional value for an infeasible agent that the
/// constraints alone can't express.
pub type Fitness = f64;

/// An alias for a candidate solution: one real value per dimension.
pub type Agent = Vec<f64>;

/// The best fitness ever recorded in the fitness ledger and the population
/// slot that produced it.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct GlobalBest {
  /// Population slot index.
  pub index: usize,
  /// Fitness recorded for that slot at the time it became the best.
  pub fitness: Fitness,
}

impl GlobalBest {
  /// The best before anything was evaluated: slot `0` at `+infinity`.
  pub(crate) fn unset() -> Self {
    Self {
      index: 0,
      fitness: Fitness::INFINITY,
    }
  }

  /// Records `fitness` of `index` if it is strictly better than the current
  /// best. Returns whether the best changed.
  pub(crate) fn offer(&mut self, index: usize, fitness: Fitness) -> bool {
    if fitness < self.fitness {
      self.index = index;
      self.fitness = fitness;
      true
    } else {
      false
    }
  }
}
