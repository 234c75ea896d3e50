//! Early-stop operators and utilities.

use crate::{progress::Progress, score::Fitness};

/// An operator that decides, after each completed generation, whether the
/// run should stop early. It's consulted after the observer.
///
/// # Examples
/// ```
/// # use diffevo::{progress::Progress, termination::Termination};
/// # fn takes_termination<T: Termination>(t: T) {}
/// // stop once the best agent is good enough
/// let t = |p: &Progress| p.best_fitness() < 1e-6;
/// # takes_termination(t);
/// ```
///
/// **Note that you always can implement this trait instead of using closures.**
pub trait Termination {
  /// If returns `true`, the run stops. The generation that was just
  /// completed still counts.
  fn terminate(&mut self, progress: &Progress<'_>) -> bool;
}

impl<F> Termination for F
where
  F: FnMut(&Progress<'_>) -> bool,
{
  fn terminate(&mut self, progress: &Progress<'_>) -> bool {
    self(progress)
  }
}

/// A `Termination` that never stops the run. Used when no termination is
/// installed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct NoTermination();

impl Termination for NoTermination {
  fn terminate(&mut self, _: &Progress<'_>) -> bool {
    false
  }
}

/// A `Termination` that stops the run once the optimizer has completed a
/// certain number of generations.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct GenerationTerminator(pub usize);

impl Termination for GenerationTerminator {
  fn terminate(&mut self, progress: &Progress<'_>) -> bool {
    progress.generation() >= self.0
  }
}

/// A `Termination` that stops the run once the best fitness is at or below
/// a threshold.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct FitnessTerminator(pub Fitness);

impl Termination for FitnessTerminator {
  fn terminate(&mut self, progress: &Progress<'_>) -> bool {
    progress.best_fitness() <= self.0
  }
}

/// A `Termination` that stops the run when the best fitness hasn't improved
/// for `patience` consecutive generations.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct StallTerminator {
  patience: usize,
  stalled: usize,
  best: Fitness,
}

impl StallTerminator {
  /// Creates a terminator that tolerates `patience` generations without
  /// improvement. A patience of `0` stops the run after its first
  /// generation.
  pub fn new(patience: usize) -> Self {
    Self {
      patience,
      stalled: 0,
      best: Fitness::INFINITY,
    }
  }
}

impl Termination for StallTerminator {
  fn terminate(&mut self, progress: &Progress<'_>) -> bool {
    let best = progress.best_fitness();
    if best < self.best {
      self.best = best;
      self.stalled = 0;
    } else {
      self.stalled += 1;
    }
    self.stalled >= self.patience
  }
}
