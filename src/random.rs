//! The uniform random source the optimizer draws from.

use rand::Rng;

/// A source of uniform reals and uniform integers.
///
/// Implemented for every [`Rng`]. The optimizer owns one seeded generator and
/// threads it through every draw, so the order of calls to these methods is
/// what makes a run reproducible.
pub trait RandomSource {
  /// A uniform real in `[low, high]`. Requires finite `low <= high`.
  fn uniform(&mut self, low: f64, high: f64) -> f64;

  /// A uniform integer in `[0, bound)`. Requires `bound > 0`.
  fn integer(&mut self, bound: usize) -> usize;

  /// A uniform real in `[0, 1)`.
  fn probability(&mut self) -> f64;
}

impl<R: Rng + ?Sized> RandomSource for R {
  fn uniform(&mut self, low: f64, high: f64) -> f64 {
    self.gen_range(low..=high)
  }

  fn integer(&mut self, bound: usize) -> usize {
    self.gen_range(0..bound)
  }

  fn probability(&mut self) -> f64 {
    self.gen::<f64>()
  }
}

/// Whether `uniform(low, high)` can be drawn: both bounds finite, ordered,
/// and their difference finite too.
pub fn is_sampleable(low: f64, high: f64) -> bool {
  low <= high && (high - low).is_finite()
}
