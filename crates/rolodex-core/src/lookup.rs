//! [`Lookup`] — the outcome of an operation that may address a missing record.

/// Either the requested value, or a signal that nothing matched.
///
/// Failures travel separately through [`crate::Result`], so a service call
/// yields one of `Ok(Found(_))`, `Ok(NotFound)` or `Err(_)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
  Found(T),
  NotFound,
}

impl<T> Lookup<T> {
  pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
    match self {
      Self::Found(v) => Lookup::Found(f(v)),
      Self::NotFound => Lookup::NotFound,
    }
  }

  pub fn into_option(self) -> Option<T> {
    match self {
      Self::Found(v) => Some(v),
      Self::NotFound => None,
    }
  }
}

impl<T> From<Option<T>> for Lookup<T> {
  fn from(value: Option<T>) -> Self {
    match value {
      Some(v) => Self::Found(v),
      None => Self::NotFound,
    }
  }
}
