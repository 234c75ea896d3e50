//! **diffevo** is a single-objective Differential Evolution (DE) optimizer. It
//! minimizes a scalar objective over a bounded real parameter space, without
//! derivatives, and does so reproducibly: every run is driven by one seeded
//! random generator.
//!
//! Here's a [quick start example](#example) for the impatient.
//!
//! This crate is built from a few abstractions:
//! - **Target** - the thing being minimized. It describes its parameter space
//!   with one [`Constraint`] per dimension and evaluates the fitness of a
//!   parameter vector. The lower - the better
//! - **Optimizer** - owns a population of candidate solutions (agents) and
//!   evolves it generation by generation. This crate implements the classic
//!   `DE/rand/1/bin` scheme in [`DifferentialEvolution`]
//! - **Observer** and **Termination** - optional operators called after each
//!   completed generation. The first one looks at the optimizer's state, the
//!   second one decides whether the run should stop early
//!
//! # Differential evolution
//!
//! Each generation, for every population slot in order:
//! 1. **Mutate**: pick three other random agents `a`, `b`, `c` and build a
//!    mutant `a + F * (b - c)`
//! 2. **Cross over**: take each component from the mutant with probability
//!    `CR`, otherwise from the slot's own agent. One random component always
//!    comes from the mutant
//! 3. **Validate**: if the trial vector violates an enforced constraint, redo
//!    the slot
//! 4. **Select**: replace the slot's agent if the trial is strictly better
//!
//! `CR` is either fixed or drawn once per generation from a range. See
//! [`Hyperparameters`] for the knobs and their defaults.
//!
//! # Constraints
//!
//! A [`Constraint`] is an interval. Its bounds are always used to sample the
//! initial population. Only *enforced* constraints reject trial vectors that
//! leave the interval, in which case the slot is simply redone. If the
//! feasible region can't be reached, the default [`RetryPolicy`] spins
//! forever. Set a limited policy to get an [`Error::InfeasibleRegion`]
//! instead.
//!
//! # Closures
//!
//! [`Observer`] and [`Termination`] are implemented by closures taking a
//! [`Progress`] reference, and [`FnTarget`] turns a closure into a target.
//! Annotate the closure's argument type (`|p: &Progress| ...`), otherwise the
//! compiler can't tell which lifetimes it should accept.
//!
//! # Logging
//!
//! The optimizer reports through [`tracing`]: the run header and summary at
//! `info` level, each generation at `debug` level (or `info` with
//! [`Hyperparameters::verbose`]), each rejected trial at `trace` level.
//! Install a subscriber to see them.
//!
//! # Example
//!
//! Find the maximum of `x sin(x) cos(2x) - 2x sin(3x)` on `[0, 20]`. The
//! optimizer minimizes, so the target is wrapped into [`Maximize`].
//! ```
//! use diffevo::prelude::*;
//!
//! let f = |x: &[f64]| {
//!   x.iter()
//!     .map(|x| x * x.sin() * (2.0 * x).cos() - 2.0 * x * (3.0 * x).sin())
//!     .sum()
//! };
//! let target = Maximize(FnTarget::new(vec![Constraint::new(0.0, 20.0)], f));
//! let params = Hyperparameters::builder()
//!   .population_size(20)
//!   .mutation_factor(0.5)
//!   .crossover(0.5..=1.3)
//!   .build();
//! let mut de = DifferentialEvolution::new(&target, params)
//!   .unwrap()
//!   .with_observer(|p: &Progress| {
//!     println!("generation {}: {}", p.generation(), -p.best_fitness())
//!   })
//!   .with_termination(StallTerminator::new(30));
//! let outcome = de.optimize(100).unwrap();
//! println!(
//!   "x = {:?} after {} generations",
//!   de.best_agent().unwrap(),
//!   outcome.generations()
//! );
//! ```
//!
//! [`Constraint`]: crate::constraining::Constraint
//! [`DifferentialEvolution`]: crate::optimizer::differential_evolution::DifferentialEvolution
//! [`Hyperparameters`]: crate::optimizer::hyperparameters::Hyperparameters
//! [`Hyperparameters::verbose`]: crate::optimizer::hyperparameters::Hyperparameters::verbose
//! [`RetryPolicy`]: crate::retrying::RetryPolicy
//! [`Error::InfeasibleRegion`]: crate::error::Error::InfeasibleRegion
//! [`Observer`]: crate::observation::Observer
//! [`Termination`]: crate::termination::Termination
//! [`Progress`]: crate::progress::Progress
//! [`FnTarget`]: crate::target::FnTarget
//! [`Maximize`]: crate::target::Maximize

#![warn(missing_docs)]

pub mod constraining;
pub mod error;
pub mod mutation;
pub mod observation;
pub mod optimizer;
pub mod progress;
pub mod random;
pub mod recombination;
pub mod retrying;
pub mod score;
pub mod target;
pub mod termination;

/// Everything needed to set up and run an optimizer.
pub mod prelude {
  pub use crate::{
    constraining::Constraint,
    error::{Error, Result},
    observation::{History, NoObserver, Observer},
    optimizer::{
      differential_evolution::DifferentialEvolution,
      generational::Generational,
      hyperparameters::{CrossoverProbability, Hyperparameters},
      Optimizer,
      Outcome,
    },
    progress::Progress,
    retrying::RetryPolicy,
    score::{Agent, Fitness},
    target::{FnTarget, Maximize, Target},
    termination::{
      FitnessTerminator,
      GenerationTerminator,
      NoTermination,
      StallTerminator,
      Termination,
    },
  };
}
