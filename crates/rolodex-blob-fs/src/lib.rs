//! Filesystem-backed photo storage for Rolodex.
//!
//! Every upload lands in a single directory as `<uuid>_<original name>`, with
//! the original name reduced to a safe single path component first.

pub mod error;
mod name;

use std::path::{Path, PathBuf};

use bytes::Bytes;
use rolodex_core::blob::{BlobStore, Upload};
use tracing::debug;
use uuid::Uuid;

pub use error::{Error, Result};
pub use name::{is_blob_name, sanitize_file_name};

/// A [`BlobStore`] rooted at one directory.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
  root: PathBuf,
}

impl FsBlobStore {
  /// Use `root` as the image directory, creating it if needed.
  pub async fn open(root: impl AsRef<Path>) -> Result<Self> {
    let root = root.as_ref().to_path_buf();
    tokio::fs::create_dir_all(&root)
      .await
      .map_err(|source| Error::CreateRoot { path: root.clone(), source })?;
    Ok(Self { root })
  }

  /// A fresh unique name for `original`.
  fn unique_name(original: &str) -> String {
    format!("{}_{}", Uuid::new_v4(), sanitize_file_name(original))
  }
}

impl BlobStore for FsBlobStore {
  type Error = Error;

  async fn store(&self, upload: &Upload, base_url: &str) -> Result<String> {
    let name = Self::unique_name(&upload.file_name);
    let path = self.root.join(&name);

    tokio::fs::write(&path, &upload.bytes)
      .await
      .map_err(|source| Error::Write { path: path.clone(), source })?;
    debug!(?path, len = upload.bytes.len(), "wrote image");

    Ok(format!("{}/loadimage/{name}", base_url.trim_end_matches('/')))
  }

  async fn load(&self, name: &str) -> Result<Option<Bytes>> {
    if !is_blob_name(name) {
      debug!(name, "rejected image name");
      return Ok(None);
    }

    let path = self.root.join(name);
    match tokio::fs::read(&path).await {
      Ok(data) => Ok(Some(Bytes::from(data))),
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
      Err(source) => Err(Error::Read { path, source }),
    }
  }
}
