//! Classic `DE/rand/1/bin` differential evolution.

use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, info, trace, warn};

use super::{generational::Generational, hyperparameters::Hyperparameters};
use crate::{
  constraining::is_valid,
  error::{Error, Result},
  mutation::{mutant, pick_donors},
  observation::{NoObserver, Observer},
  progress::Progress,
  random::{is_sampleable, RandomSource},
  recombination::binomial_crossover,
  score::{Agent, Fitness, GlobalBest},
  target::Target,
  termination::{NoTermination, Termination},
};

/// A differential evolution optimizer bound to a borrowed [`Target`].
///
/// Every generation, each population slot in turn gets a trial vector built
/// from three other random agents (`a + F * (b - c)`) crossed over with the
/// slot's own agent. Trials violating an enforced constraint are redone for
/// the same slot. A valid trial replaces the slot's agent only if its fitness
/// is strictly lower. Slots are processed in order, so later slots may pick
/// donors that were already replaced in the same generation.
///
/// All random draws come from a single generator seeded at construction, so
/// two optimizers built alike and driven alike follow bit-identical
/// trajectories.
///
/// With a [`RetryPolicy::Limited`] policy, a generation can fail with
/// [`Error::InfeasibleRegion`] after some of its slots were already replaced.
/// Those replacements stay even though the generation counter doesn't move.
/// Treat such an optimizer as finished.
///
/// An observer and a termination operator can be attached with
/// [`with_observer`] and [`with_termination`]. Both are called after each
/// completed generation, observer first.
///
/// # Examples
/// ```
/// use diffevo::prelude::*;
///
/// let target = FnTarget::new(vec![Constraint::new(-5.0, 5.0); 2], |x: &[f64]| {
///   x.iter().map(|v| v * v).sum()
/// });
/// let mut de = DifferentialEvolution::new(&target, Hyperparameters::default())
///   .unwrap()
///   .with_termination(FitnessTerminator(1e-8));
/// de.optimize(500).unwrap();
/// assert!(de.best_fitness().unwrap() < 1e-6);
/// ```
///
/// [`RetryPolicy::Limited`]: crate::retrying::RetryPolicy::Limited
/// [`with_observer`]: DifferentialEvolution::with_observer
/// [`with_termination`]: DifferentialEvolution::with_termination
pub struct DifferentialEvolution<
  't,
  T: ?Sized,
  Obs = NoObserver,
  Ter = NoTermination,
> {
  target: &'t T,
  params: Hyperparameters,
  dimensionality: usize,
  rng: StdRng,
  population: Vec<Agent>,
  ledger: Vec<Fitness>,
  best: Option<GlobalBest>,
  generation: usize,
  max_generation: usize,
  observer: Obs,
  terminator: Ter,
}

impl<'t, T: Target + ?Sized> DifferentialEvolution<'t, T> {
  /// Creates an optimizer for `target`. Nothing is sampled or evaluated
  /// until the population is initialized.
  ///
  /// # Errors
  ///
  /// Fails if the hyperparameters are invalid (see
  /// [`Hyperparameters::validate`]), if the target has no dimensions, if its
  /// constraint count differs from its dimensionality, or if any bounds are
  /// not finite, reversed or too far apart for their width to be finite.
  /// Bounds are checked even for unenforced constraints, because
  /// initialization samples from them.
  pub fn new(target: &'t T, params: Hyperparameters) -> Result<Self> {
    params.validate()?;

    let dimensionality = target.dimensionality();
    if dimensionality == 0 {
      return Err(Error::NoDimensions);
    }
    let constraints = target.constraints();
    if constraints.len() != dimensionality {
      return Err(Error::ConstraintCountMismatch {
        dimensionality,
        constraints: constraints.len(),
      });
    }
    for (index, c) in constraints.iter().enumerate() {
      let (lower, upper) = (c.lower(), c.upper());
      if !is_sampleable(lower, upper) {
        return Err(Error::InvalidBounds {
          index,
          lower,
          upper,
        });
      }
    }

    Ok(Self {
      target,
      rng: StdRng::seed_from_u64(params.seed),
      params,
      dimensionality,
      population: Vec::new(),
      ledger: Vec::new(),
      best: None,
      generation: 0,
      max_generation: 0,
      observer: NoObserver(),
      terminator: NoTermination(),
    })
  }
}

impl<'t, T: Target + ?Sized, Obs, Ter> DifferentialEvolution<'t, T, Obs, Ter> {
  /// Replaces the observer called after each generation.
  pub fn with_observer<O: Observer>(
    self,
    observer: O,
  ) -> DifferentialEvolution<'t, T, O, Ter> {
    DifferentialEvolution {
      target: self.target,
      params: self.params,
      dimensionality: self.dimensionality,
      rng: self.rng,
      population: self.population,
      ledger: self.ledger,
      best: self.best,
      generation: self.generation,
      max_generation: self.max_generation,
      observer,
      terminator: self.terminator,
    }
  }

  /// Replaces the termination operator consulted after each generation.
  pub fn with_termination<S: Termination>(
    self,
    terminator: S,
  ) -> DifferentialEvolution<'t, T, Obs, S> {
    DifferentialEvolution {
      target: self.target,
      params: self.params,
      dimensionality: self.dimensionality,
      rng: self.rng,
      population: self.population,
      ledger: self.ledger,
      best: self.best,
      generation: self.generation,
      max_generation: self.max_generation,
      observer: self.observer,
      terminator,
    }
  }

  /// Returns the installed observer.
  pub fn observer(&self) -> &Obs {
    &self.observer
  }

  /// Returns the installed termination operator.
  pub fn terminator(&self) -> &Ter {
    &self.terminator
  }

  /// Returns the target being optimized.
  pub fn target(&self) -> &'t T {
    self.target
  }

  /// Returns the hyperparameters the optimizer was created with.
  pub fn hyperparameters(&self) -> &Hyperparameters {
    &self.params
  }

  /// Number of parameters of each agent.
  pub fn dimensionality(&self) -> usize {
    self.dimensionality
  }

  /// Number of completed generations.
  pub fn generation(&self) -> usize {
    self.generation
  }

  /// Number of generations the last run was asked for.
  pub fn max_generation(&self) -> usize {
    self.max_generation
  }

  /// Whether the population has been initialized.
  pub fn is_initialized(&self) -> bool {
    self.best.is_some()
  }

  /// Agents by population slot. Empty before initialization.
  pub fn population(&self) -> &[Agent] {
    &self.population
  }

  /// Fitness of each slot. Empty before initialization.
  pub fn fitness(&self) -> &[Fitness] {
    &self.ledger
  }

  /// Fitness of the best slot.
  ///
  /// # Errors
  ///
  /// Returns [`Error::NotInitialized`] before initialization.
  pub fn best_fitness(&self) -> Result<Fitness> {
    let best = self.best.ok_or(Error::NotInitialized)?;
    Ok(self.ledger[best.index])
  }

  /// Agent of the best slot.
  ///
  /// # Errors
  ///
  /// Returns [`Error::NotInitialized`] before initialization.
  pub fn best_agent(&self) -> Result<&[f64]> {
    let best = self.best.ok_or(Error::NotInitialized)?;
    Ok(&self.population[best.index])
  }

  /// A read-only view of the optimizer, the same one observers get.
  ///
  /// # Errors
  ///
  /// Returns [`Error::NotInitialized`] before initialization.
  pub fn progress(&self) -> Result<Progress<'_>> {
    let best = self.best.ok_or(Error::NotInitialized)?;
    Ok(Progress::new(
      &self.population,
      &self.ledger,
      best,
      self.generation,
      self.max_generation,
    ))
  }

  /// Checks `agent` against the target's constraints in dimension order.
  pub fn is_valid(&self, agent: &[f64]) -> bool {
    is_valid(self.target.constraints(), agent)
  }

  /// Produces a trial vector for `slot` that satisfies every enforced
  /// constraint, retrying as the retry policy allows.
  fn valid_trial(&mut self, slot: usize, probability: f64) -> Result<Agent> {
    let constraints = self.target.constraints();
    let factor = self.params.mutation_factor;
    let population_size = self.population.len();
    let generation = self.generation + 1;

    self
      .params
      .retry
      .attempt(|attempt| {
        let donors = pick_donors(&mut self.rng, population_size, slot);
        let mutant = mutant(&self.population, donors, factor);
        let trial = binomial_crossover(
          &mut self.rng,
          &self.population[slot],
          &mutant,
          probability,
        );
        if is_valid(constraints, &trial.agent) {
          Some(trial.agent)
        } else {
          trace!(generation, slot, attempt, "trial violates constraints");
          None
        }
      })
      .map_err(|attempts| {
        warn!(generation, slot, attempts, "no valid trial within retry limit");
        Error::InfeasibleRegion {
          generation,
          slot,
          attempts,
        }
      })
  }
}

impl<'t, T, Obs, Ter> Generational for DifferentialEvolution<'t, T, Obs, Ter>
where
  T: Target + ?Sized,
  Obs: Observer,
  Ter: Termination,
{
  fn initialize(&mut self) -> Result<()> {
    if self.best.is_some() {
      return Err(Error::AlreadyInitialized);
    }
    let params = &self.params;
    info!(
      population_size = params.population_size,
      dimensionality = self.dimensionality,
      mutation_factor = params.mutation_factor,
      crossover_low = params.crossover.low(),
      crossover_high = params.crossover.high(),
      seed = params.seed,
      "differential evolution"
    );

    let constraints = self.target.constraints();
    let mut best = GlobalBest::unset();
    let mut population = Vec::with_capacity(params.population_size);
    let mut ledger = Vec::with_capacity(params.population_size);
    for slot in 0..params.population_size {
      let agent: Agent = constraints
        .iter()
        .map(|c| self.rng.uniform(c.lower(), c.upper()))
        .collect();
      let fitness = self.target.evaluate(&agent);
      best.offer(slot, fitness);
      population.push(agent);
      ledger.push(fitness);
    }

    self.population = population;
    self.ledger = ledger;
    self.best = Some(best);
    Ok(())
  }

  fn evolve(&mut self) -> Result<()> {
    let Some(mut best) = self.best else {
      return Err(Error::NotInitialized);
    };

    let probability = self.params.crossover.sample(&mut self.rng);
    for slot in 0..self.population.len() {
      let trial = self.valid_trial(slot, probability)?;
      let fitness = self.target.evaluate(&trial);
      if fitness < self.ledger[slot] {
        self.population[slot] = trial;
        self.ledger[slot] = fitness;
        if best.offer(slot, fitness) {
          self.best = Some(best);
        }
      }
    }
    self.generation += 1;

    let generation = self.generation;
    if self.params.verbose {
      info!(generation, best_fitness = best.fitness, "evolved");
    } else {
      debug!(generation, best_fitness = best.fitness, "evolved");
    }
    Ok(())
  }

  fn generation(&self) -> usize {
    self.generation
  }

  fn set_max_generation(&mut self, max_generation: usize) {
    self.max_generation = max_generation;
  }

  fn best(&self) -> Option<Fitness> {
    self.best_fitness().ok()
  }

  fn conclude_generation(&mut self) -> bool {
    let Some(best) = self.best else {
      return false;
    };
    let progress = Progress::new(
      &self.population,
      &self.ledger,
      best,
      self.generation,
      self.max_generation,
    );
    self.observer.observe(&progress);
    self.terminator.terminate(&progress)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    constraining::Constraint,
    optimizer::{Optimizer, Outcome},
    retrying::RetryPolicy,
    target::FnTarget,
  };

  fn sphere(dimensions: usize) -> FnTarget<fn(&[f64]) -> f64> {
    FnTarget::new(vec![Constraint::new(-5.0, 5.0); dimensions], |x| {
      x.iter().map(|v| v * v).sum()
    })
  }

  #[test]
  fn test_rejects_small_population() {
    let target = sphere(2);
    let params = Hyperparameters::builder().population_size(3).build();
    assert!(matches!(
      DifferentialEvolution::new(&target, params),
      Err(Error::PopulationTooSmall { size: 3 })
    ));
  }

  #[test]
  fn test_rejects_dimensionless_target() {
    let target = sphere(0);
    assert!(matches!(
      DifferentialEvolution::new(&target, Hyperparameters::default()),
      Err(Error::NoDimensions)
    ));
  }

  #[test]
  fn test_rejects_constraint_count_mismatch() {
    struct Lying(Vec<Constraint>);
    impl Target for Lying {
      fn dimensionality(&self) -> usize {
        3
      }
      fn constraints(&self) -> &[Constraint] {
        &self.0
      }
      fn evaluate(&self, _: &[f64]) -> Fitness {
        0.0
      }
    }

    let target = Lying(vec![Constraint::new(0.0, 1.0); 2]);
    assert!(matches!(
      DifferentialEvolution::new(&target, Hyperparameters::default()),
      Err(Error::ConstraintCountMismatch {
        dimensionality: 3,
        constraints: 2
      })
    ));
  }

  #[test]
  fn test_rejects_meaningless_bounds() {
    let reversed = FnTarget::new(
      vec![Constraint::new(0.0, 1.0), Constraint::unenforced(2.0, 1.0)],
      |_: &[f64]| 0.0,
    );
    assert!(matches!(
      DifferentialEvolution::new(&reversed, Hyperparameters::default()),
      Err(Error::InvalidBounds { index: 1, .. })
    ));

    let infinite = FnTarget::new(
      vec![Constraint::unenforced(f64::NEG_INFINITY, 1.0)],
      |_: &[f64]| 0.0,
    );
    assert!(matches!(
      DifferentialEvolution::new(&infinite, Hyperparameters::default()),
      Err(Error::InvalidBounds { index: 0, .. })
    ));
  }

  #[test]
  fn test_rejects_bounds_with_overflowing_width() {
    let wide = FnTarget::new(
      vec![Constraint::new(0.0, 1.0), Constraint::new(-f64::MAX, f64::MAX)],
      |_: &[f64]| 0.0,
    );
    assert_eq!(
      DifferentialEvolution::new(&wide, Hyperparameters::default()).err(),
      Some(Error::InvalidBounds {
        index: 1,
        lower: -f64::MAX,
        upper: f64::MAX
      })
    );

    let widest_accepted = FnTarget::new(
      vec![Constraint::new(-f64::MAX / 2.0, f64::MAX / 2.0)],
      |_: &[f64]| 0.0,
    );
    let mut de =
      DifferentialEvolution::new(&widest_accepted, Hyperparameters::default())
        .unwrap();
    de.initialize().unwrap();
    assert!(de.population().iter().all(|a| a[0].is_finite()));
  }

  #[test]
  fn test_accessors_before_initialization() {
    let target = sphere(2);
    let mut de =
      DifferentialEvolution::new(&target, Hyperparameters::default()).unwrap();
    assert!(!de.is_initialized());
    assert_eq!(de.best_fitness(), Err(Error::NotInitialized));
    assert_eq!(de.best_agent(), Err(Error::NotInitialized));
    assert!(de.progress().is_err());
    assert_eq!(de.evolve(), Err(Error::NotInitialized));
    assert!(de.population().is_empty());
    assert_eq!(de.generation(), 0);
    assert_eq!(de.max_generation(), 0);
  }

  #[test]
  fn test_initialization_fills_ledger_by_slot() {
    let target = sphere(3);
    let mut de =
      DifferentialEvolution::new(&target, Hyperparameters::default()).unwrap();
    de.initialize().unwrap();

    assert_eq!(de.population().len(), 20);
    assert_eq!(de.fitness().len(), 20);
    for (agent, &fitness) in de.population().iter().zip(de.fitness()) {
      assert_eq!(agent.len(), 3);
      assert!(de.is_valid(agent));
      assert_eq!(fitness, target.evaluate(agent));
    }
    let min = de.fitness().iter().copied().fold(f64::INFINITY, f64::min);
    assert_eq!(de.best_fitness().unwrap(), min);
    assert_eq!(target.evaluate(de.best_agent().unwrap()), min);
  }

  #[test]
  fn test_initialization_happens_once() {
    let target = sphere(1);
    let mut de =
      DifferentialEvolution::new(&target, Hyperparameters::default()).unwrap();
    de.initialize().unwrap();
    let population = de.population().to_vec();
    assert_eq!(de.initialize(), Err(Error::AlreadyInitialized));
    assert_eq!(de.population(), population.as_slice());
    assert_eq!(de.optimize(1), Err(Error::AlreadyInitialized));
  }

  #[test]
  fn test_unenforced_bounds_are_sampled_from() {
    let target = FnTarget::new(
      vec![Constraint::unenforced(10.0, 11.0)],
      |x: &[f64]| x[0],
    );
    let mut de =
      DifferentialEvolution::new(&target, Hyperparameters::default()).unwrap();
    de.initialize().unwrap();
    assert!(de.population().iter().all(|a| (10.0..=11.0).contains(&a[0])));
  }

  #[test]
  fn test_infinite_fitness_keeps_accessors_valid() {
    let target =
      FnTarget::new(vec![Constraint::new(0.0, 1.0)], |_: &[f64]| f64::INFINITY);
    let mut de =
      DifferentialEvolution::new(&target, Hyperparameters::default()).unwrap();
    de.optimize(3).unwrap();
    assert_eq!(de.best_fitness(), Ok(f64::INFINITY));
    assert_eq!(de.best_agent().unwrap().len(), 1);
  }

  #[test]
  fn test_evolve_counts_generations() {
    let target = sphere(2);
    let mut de =
      DifferentialEvolution::new(&target, Hyperparameters::default()).unwrap();
    de.initialize().unwrap();
    for expected in 1..=5 {
      de.evolve().unwrap();
      assert_eq!(de.generation(), expected);
    }
  }

  #[test]
  fn test_optimize_records_max_generation() {
    let target = sphere(2);
    let mut de =
      DifferentialEvolution::new(&target, Hyperparameters::default()).unwrap();
    let outcome = de.optimize(7).unwrap();
    assert_eq!(outcome, Outcome::Completed { generations: 7 });
    assert_eq!(de.max_generation(), 7);
    assert_eq!(de.progress().unwrap().max_generation(), 7);
  }

  #[test]
  fn test_zero_generations_only_initializes() {
    let target = sphere(2);
    let mut de =
      DifferentialEvolution::new(&target, Hyperparameters::default())
        .unwrap()
        .with_observer(|_: &Progress| panic!("no generation was evolved"));
    assert_eq!(de.optimize(0), Ok(Outcome::Completed { generations: 0 }));
    assert!(de.is_initialized());
  }

  #[test]
  fn test_limited_retry_reports_infeasible_region() {
    let target = sphere(1);
    let params = Hyperparameters::builder()
      .mutation_factor(1e12)
      .crossover(1.0)
      .retry(RetryPolicy::Limited(50))
      .build();
    let mut de = DifferentialEvolution::new(&target, params).unwrap();
    de.initialize().unwrap();
    let err = de.evolve().unwrap_err();
    assert_eq!(
      err,
      Error::InfeasibleRegion {
        generation: 1,
        slot: 0,
        attempts: 50
      }
    );
    assert_eq!(de.generation(), 0);
  }

  #[test]
  fn test_failed_generation_keeps_earlier_slots() {
    use std::cell::Cell;

    // every evaluation is better than all previous ones, so each valid
    // trial replaces its slot
    let evaluations = Cell::new(0.0);
    let target = FnTarget::new(vec![Constraint::new(0.0, 1.0)], |_: &[f64]| {
      evaluations.set(evaluations.get() + 1.0);
      -evaluations.get()
    });

    for seed in 0..200 {
      let params = Hyperparameters::builder()
        .population_size(10)
        .mutation_factor(2.0)
        .crossover(1.0)
        .retry(1_usize)
        .seed(seed)
        .build();
      let mut de = DifferentialEvolution::new(&target, params).unwrap();
      de.initialize().unwrap();
      let population = de.population().to_vec();
      let fitness = de.fitness().to_vec();

      let failed = match de.evolve() {
        Err(Error::InfeasibleRegion { slot, .. }) if slot > 0 => slot,
        _ => continue,
      };
      assert_eq!(de.generation(), 0);
      for slot in 0..failed {
        assert!(de.fitness()[slot] < fitness[slot]);
        assert!(de.is_valid(&de.population()[slot]));
      }
      assert_eq!(&de.population()[failed..], &population[failed..]);
      assert_eq!(&de.fitness()[failed..], &fitness[failed..]);
      let min = de.fitness().iter().copied().fold(f64::INFINITY, f64::min);
      assert_eq!(de.best_fitness(), Ok(min));
      return;
    }
    panic!("every run failed at the first slot or not at all");
  }

  #[test]
  fn test_sphere_converges() {
    let target = sphere(3);
    let params = Hyperparameters::builder()
      .population_size(30)
      .mutation_factor(0.5)
      .crossover(0.9)
      .build();
    let mut de = DifferentialEvolution::new(&target, params).unwrap();
    de.optimize(300).unwrap();
    assert!(de.best_fitness().unwrap() < 1e-6);
  }
}
