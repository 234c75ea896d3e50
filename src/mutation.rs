//! Donor selection and mutant vector construction.

use crate::{random::RandomSource, score::Agent};

/// Number of donors a `rand/1` mutation needs.
pub const DONOR_NUM: usize = 3;

/// Picks three distinct donor slots `[a, b, c]`, none of them equal to
/// `target`, each drawn uniformly from `[0, population_size)`.
///
/// Every donor is drawn by independent rejection sampling: a draw colliding
/// with `target` or with an already chosen donor is thrown away and redrawn.
/// `a` is settled before `b`, and `b` before `c`.
///
/// `population_size` must be at least `DONOR_NUM + 1`, otherwise this never
/// returns.
pub fn pick_donors<R: RandomSource + ?Sized>(
  rng: &mut R,
  population_size: usize,
  target: usize,
) -> [usize; DONOR_NUM] {
  debug_assert!(population_size > DONOR_NUM, "not enough agents for donors");
  let mut donors = [target; DONOR_NUM];
  for k in 0..DONOR_NUM {
    donors[k] = loop {
      let candidate = rng.integer(population_size);
      if candidate != target && !donors[..k].contains(&candidate) {
        break candidate;
      }
    };
  }
  donors
}

/// Builds a `rand/1` mutant: `a + factor * (b - c)`, component-wise.
pub fn mutant(
  population: &[Agent],
  donors: [usize; DONOR_NUM],
  factor: f64,
) -> Agent {
  let [a, b, c] = donors.map(|d| &population[d]);
  a.iter()
    .zip(b)
    .zip(c)
    .map(|((a, b), c)| a + factor * (b - c))
    .collect()
}
