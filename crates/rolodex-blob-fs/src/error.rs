//! Error type for `rolodex-blob-fs`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("failed to create image directory {path:?}: {source}")]
  CreateRoot {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to write image {path:?}: {source}")]
  Write {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to read image {path:?}: {source}")]
  Read {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
