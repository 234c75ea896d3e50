//! Per-generation callbacks.

use crate::{progress::Progress, score::Fitness};

/// An operator that is shown the optimizer's state after each completed
/// generation. It can look but not touch.
///
/// # Examples
/// ```
/// # use diffevo::{observation::Observer, progress::Progress};
/// # fn takes_observer<O: Observer>(o: O) {}
/// let o = |p: &Progress| println!("{}: {}", p.generation(), p.best_fitness());
/// # takes_observer(o);
/// ```
///
/// **Note that you always can implement this trait instead of using closures.**
pub trait Observer {
  /// Receives the state of the optimizer after a completed generation.
  fn observe(&mut self, progress: &Progress<'_>);
}

impl<F> Observer for F
where
  F: FnMut(&Progress<'_>),
{
  fn observe(&mut self, progress: &Progress<'_>) {
    self(progress)
  }
}

/// An `Observer` that does nothing. Used when no observer is installed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct NoObserver();

impl Observer for NoObserver {
  fn observe(&mut self, _: &Progress<'_>) {}
}

/// An `Observer` that records the best fitness of every generation it sees.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct History {
  best: Vec<Fitness>,
}

impl History {
  /// Best fitness after each observed generation, oldest first.
  pub fn best_fitness(&self) -> &[Fitness] {
    &self.best
  }

  /// Number of observed generations.
  pub fn len(&self) -> usize {
    self.best.len()
  }

  /// Whether no generation was observed yet.
  pub fn is_empty(&self) -> bool {
    self.best.is_empty()
  }
}

impl Observer for History {
  fn observe(&mut self, progress: &Progress<'_>) {
    self.best.push(progress.best_fitness());
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::score::GlobalBest;

  fn takes_observer<O: Observer>(mut o: O) {
    let population = vec![vec![0.0]; 4];
    let fitness = vec![1.0; 4];
    let best = GlobalBest {
      index: 0,
      fitness: 1.0,
    };
    o.observe(&Progress::new(&population, &fitness, best, 1, 1));
  }

  #[test]
  fn test_observer_from_closure() {
    let mut seen = 0;
    takes_observer(|p: &Progress| seen += p.generation());
    assert_eq!(seen, 1);
  }

  #[test]
  fn test_custom_observer() {
    struct CustomObserver {}
    impl Observer for CustomObserver {
      fn observe(&mut self, _: &Progress<'_>) {}
    }
    takes_observer(CustomObserver {});
  }

  #[test]
  fn test_no_observer() {
    takes_observer(NoObserver());
  }

  #[test]
  fn test_history_records_each_generation() {
    let population = vec![vec![0.0]; 4];
    let fitness = vec![3.0, 2.0, 1.0, 4.0];
    let mut history = History::default();
    assert!(history.is_empty());
    for (generation, index) in [(1, 1), (2, 2)] {
      let best = GlobalBest {
        index,
        fitness: fitness[index],
      };
      history.observe(&Progress::new(&population, &fitness, best, generation, 2));
    }
    assert_eq!(history.best_fitness(), &[2.0, 1.0]);
    assert_eq!(history.len(), 2);
  }
}
