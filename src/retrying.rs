//! Retry policy for producing a valid trial vector.

/// How many times the optimizer may redo a slot whose trial vector violates
/// an enforced constraint.
///
/// [`Unbounded`](RetryPolicy::Unbounded) retries until a valid trial appears.
/// If the feasible region can't be reached from the current population, the
/// run never finishes. [`Limited`](RetryPolicy::Limited) gives up after the
/// given number of attempts and reports an error instead.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum RetryPolicy {
  /// Retry forever.
  #[default]
  Unbounded,
  /// Make at most this many attempts per slot.
  Limited(usize),
}

impl From<usize> for RetryPolicy {
  fn from(attempts: usize) -> Self {
    RetryPolicy::Limited(attempts)
  }
}

impl RetryPolicy {
  /// Calls `attempt` with the attempt number, counting from 1, until it
  /// returns `Some`. Returns `Err` with the number of attempts made if the
  /// policy's limit runs out first.
  pub fn attempt<T>(
    &self,
    mut attempt: impl FnMut(usize) -> Option<T>,
  ) -> Result<T, usize> {
    let mut made = 0;
    loop {
      if let RetryPolicy::Limited(limit) = *self {
        if made >= limit {
          return Err(made);
        }
      }
      made += 1;
      if let Some(value) = attempt(made) {
        return Ok(value);
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_unbounded_runs_until_success() {
    let result = RetryPolicy::Unbounded.attempt(|n| (n == 1000).then_some(n));
    assert_eq!(result, Ok(1000));
  }

  #[test]
  fn test_limited_gives_up() {
    let mut calls = 0;
    let result: Result<(), usize> = RetryPolicy::Limited(5).attempt(|_| {
      calls += 1;
      None
    });
    assert_eq!(result, Err(5));
    assert_eq!(calls, 5);
  }

  #[test]
  fn test_limited_succeeds_on_last_attempt() {
    assert_eq!(RetryPolicy::from(3).attempt(|n| (n == 3).then_some(n)), Ok(3));
  }

  #[test]
  fn test_zero_limit_never_attempts() {
    let result = RetryPolicy::Limited(0).attempt(|_| -> Option<()> {
      panic!("must not be called")
    });
    assert_eq!(result, Err(0));
  }
}
