//! Error types for `rolodex-core`.

use thiserror::Error;

use crate::contact::ContactId;

#[derive(Debug, Error)]
pub enum Error {
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("blob store error: {0}")]
  Blob(#[source] Box<dyn std::error::Error + Send + Sync>),

  /// The row vanished or changed between read and write, but still exists.
  #[error("contact {0} was modified concurrently")]
  Conflict(ContactId),
}

impl Error {
  pub(crate) fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }

  pub(crate) fn blob<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Blob(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
