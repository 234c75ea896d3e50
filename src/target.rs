//! The objective being minimized and its parameter space.

use crate::{constraining::Constraint, score::Fitness};

/// Represents an optimization target: a parameter space described by one
/// [`Constraint`] per dimension and a fitness function over it.
///
/// The optimizer only ever **minimizes**. If you want to maximize something,
/// negate it yourself or wrap your target into [`Maximize`].
///
/// `evaluate` must be a pure function of its input. It's called by shared
/// reference, must not rely on previous calls, and should be total over the
/// constrained domain. Return `+infinity` for inputs that are infeasible in a
/// way the constraints can't express.
///
/// # Examples
/// ```
/// # use diffevo::{constraining::Constraint, target::Target};
/// struct Sphere(Vec<Constraint>);
///
/// impl Target for Sphere {
///   fn constraints(&self) -> &[Constraint] {
///     &self.0
///   }
///
///   fn evaluate(&self, agent: &[f64]) -> f64 {
///     agent.iter().map(|x| x * x).sum()
///   }
/// }
///
/// let sphere = Sphere(vec![Constraint::new(-5.0, 5.0); 3]);
/// assert_eq!(sphere.dimensionality(), 3);
/// assert_eq!(sphere.evaluate(&[1.0, 2.0, 2.0]), 9.0);
/// ```
///
/// **Note that you can use [`FnTarget`] instead of implementing this trait.**
pub trait Target {
  /// Number of parameters of an agent. Defaults to the number of constraints.
  fn dimensionality(&self) -> usize {
    self.constraints().len()
  }

  /// One constraint per dimension, in dimension order.
  fn constraints(&self) -> &[Constraint];

  /// Returns the fitness of given agent. The lower - the better.
  fn evaluate(&self, agent: &[f64]) -> Fitness;
}

impl<T: Target + ?Sized> Target for &T {
  fn dimensionality(&self) -> usize {
    (**self).dimensionality()
  }

  fn constraints(&self) -> &[Constraint] {
    (**self).constraints()
  }

  fn evaluate(&self, agent: &[f64]) -> Fitness {
    (**self).evaluate(agent)
  }
}

/// A [`Target`] made of a list of constraints and a closure.
///
/// # Examples
/// ```
/// # use diffevo::{constraining::Constraint, target::{FnTarget, Target}};
/// let t = FnTarget::new(vec![Constraint::new(0.0, 1.0)], |x: &[f64]| x[0]);
/// assert_eq!(t.evaluate(&[0.25]), 0.25);
/// ```
#[derive(Clone, Debug)]
pub struct FnTarget<F> {
  constraints: Vec<Constraint>,
  objective: F,
}

impl<F> FnTarget<F>
where
  F: Fn(&[f64]) -> Fitness,
{
  /// Creates a target from constraints and an objective closure.
  pub fn new(constraints: Vec<Constraint>, objective: F) -> Self {
    Self {
      constraints,
      objective,
    }
  }
}

impl<F> Target for FnTarget<F>
where
  F: Fn(&[f64]) -> Fitness,
{
  fn constraints(&self) -> &[Constraint] {
    &self.constraints
  }

  fn evaluate(&self, agent: &[f64]) -> Fitness {
    (self.objective)(agent)
  }
}

/// Turns a maximization target into a minimization one by negating its
/// fitness. Dimensionality and constraints are passed through untouched.
///
/// # Examples
/// ```
/// # use diffevo::{constraining::Constraint, target::{FnTarget, Maximize, Target}};
/// let gain = FnTarget::new(vec![Constraint::new(0.0, 1.0)], |x: &[f64]| x[0]);
/// let t = Maximize(gain);
/// assert_eq!(t.evaluate(&[0.75]), -0.75);
/// assert_eq!(t.raw(&[0.75]), 0.75);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Maximize<T>(pub T);

impl<T: Target> Maximize<T> {
  /// Evaluates the wrapped target without negation.
  pub fn raw(&self, agent: &[f64]) -> Fitness {
    self.0.evaluate(agent)
  }
}

impl<T: Target> Target for Maximize<T> {
  fn dimensionality(&self) -> usize {
    self.0.dimensionality()
  }

  fn constraints(&self) -> &[Constraint] {
    self.0.constraints()
  }

  fn evaluate(&self, agent: &[f64]) -> Fitness {
    -self.0.evaluate(agent)
  }
}
