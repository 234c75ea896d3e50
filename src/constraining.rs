//! Per-dimension constraints and validity checks.

use itertools::Itertools;

/// A bounded interval for one parameter dimension.
///
/// Bounds are always meaningful: the optimizer samples its initial population
/// from `[lower, upper]` whether or not the constraint is enforced. Only an
/// enforced constraint makes out-of-range values invalid.
///
/// # Examples
/// ```
/// # use diffevo::constraining::Constraint;
/// let c = Constraint::new(0.0, 20.0);
/// assert!(c.check(20.0));
/// assert!(!c.check(20.5));
///
/// let c = Constraint::unenforced(0.0, 20.0);
/// assert!(c.check(1e9));
/// ```
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Constraint {
  lower: f64,
  upper: f64,
  enforced: bool,
}

impl Constraint {
  /// Creates an enforced constraint: values outside of `[lower, upper]` are
  /// rejected.
  pub fn new(lower: f64, upper: f64) -> Self {
    Self {
      lower,
      upper,
      enforced: true,
    }
  }

  /// Creates a constraint whose bounds are only used for sampling initial
  /// agents. Any value passes [`check`](Constraint::check).
  pub fn unenforced(lower: f64, upper: f64) -> Self {
    Self {
      lower,
      upper,
      enforced: false,
    }
  }

  /// Lower bound.
  pub fn lower(&self) -> f64 {
    self.lower
  }

  /// Upper bound.
  pub fn upper(&self) -> f64 {
    self.upper
  }

  /// Whether out-of-range values are rejected.
  pub fn is_enforced(&self) -> bool {
    self.enforced
  }

  /// Returns `true` when the value is valid, i.e. the constraint is not
  /// enforced or the value lies in `[lower, upper]` inclusive.
  pub fn check(&self, value: f64) -> bool {
    !(self.enforced && (value < self.lower || value > self.upper))
  }
}

/// Applies each constraint to its respective component in order and returns
/// `false` on the first violation.
///
/// A vector whose length differs from the number of constraints is never
/// valid.
pub fn is_valid(constraints: &[Constraint], agent: &[f64]) -> bool {
  constraints.len() == agent.len()
    && constraints
      .iter()
      .zip_eq(agent)
      .all(|(c, &value)| c.check(value))
}
