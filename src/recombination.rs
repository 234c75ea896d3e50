//! Binomial crossover of a target agent with its mutant.

use itertools::Itertools;

use crate::{random::RandomSource, score::Agent};

/// A trial vector along with the dimension that was forced to take the
/// mutant's value.
#[derive(Clone, PartialEq, Debug)]
pub struct Trial {
  /// Candidate agent.
  pub agent: Agent,
  /// Index of the dimension copied from the mutant regardless of the
  /// crossover draw.
  pub forced: usize,
}

/// Binomial crossover.
///
/// Draws one forced dimension uniformly, then one `[0, 1)` value per
/// dimension in order. A component comes from `mutant` when its draw is below
/// `probability` or it's the forced dimension, otherwise from `target`. The
/// forced dimension guarantees that the trial takes at least one mutant
/// component.
///
/// `target` and `mutant` must have equal, non-zero lengths.
pub fn binomial_crossover<R: RandomSource + ?Sized>(
  rng: &mut R,
  target: &[f64],
  mutant: &[f64],
  probability: f64,
) -> Trial {
  let forced = rng.integer(target.len());
  let agent = target
    .iter()
    .zip_eq(mutant)
    .enumerate()
    .map(|(d, (&t, &m))| {
      let draw = rng.probability();
      if draw < probability || d == forced {
        m
      } else {
        t
      }
    })
    .collect();
  Trial { agent, forced }
}
