use diffevo::prelude::*;

fn main() {
  tracing_subscriber::fmt::init();

  // f(x) = x sin(x) cos(2x) - 2x sin(3x), which has many local maxima
  let f = |x: &[f64]| {
    let x = x[0];
    x * x.sin() * (2.0 * x).cos() - 2.0 * x * (3.0 * x).sin()
  };
  // we're looking for its maximum on [0, 20]
  let target = Maximize(FnTarget::new(vec![Constraint::new(0.0, 20.0)], f));

  // crossover probability is redrawn from [0.5, 1.3] every generation
  let params = Hyperparameters::builder()
    .population_size(20)
    .mutation_factor(0.5)
    .crossover(0.5..=1.3)
    .verbose(true)
    .build();

  // prints where the population sits after each generation
  let digest = |p: &Progress| {
    let xs = p.population().iter().map(|a| a[0]);
    let (lo, hi) = xs.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| {
      (lo.min(x), hi.max(x))
    });
    println!(
      "{:3}: x in [{lo:7.4}, {hi:7.4}], best f({:.4}) = {:.4}",
      p.generation(),
      p.best_agent()[0],
      -p.best_fitness(),
    );
  };

  let mut de = match DifferentialEvolution::new(&target, params) {
    Ok(de) => de.with_observer(digest),
    Err(e) => {
      eprintln!("{e}");
      return;
    }
  };
  match de.optimize(100) {
    Ok(outcome) => {
      let x = de.best_agent().map(|a| a[0]).unwrap_or(f64::NAN);
      println!(
        "maximum f({x}) = {} after {} generations",
        target.raw(&[x]),
        outcome.generations()
      );
    }
    Err(e) => eprintln!("{e}"),
  }
}
