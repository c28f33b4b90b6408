//! The `BlobStore` trait — where uploaded photo bytes live.

use std::future::Future;

use bytes::Bytes;

/// An uploaded file as received from the caller.
#[derive(Debug, Clone)]
pub struct Upload {
  /// Filename as sent by the client. Not trusted; backends sanitise it.
  pub file_name: String,
  pub bytes:     Bytes,
}

/// Storage for photo blobs, addressed by generated unique names.
pub trait BlobStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist `upload` under a fresh unique name and return its reference,
  /// `<base_url>/loadimage/<name>`.
  fn store<'a>(
    &'a self,
    upload: &'a Upload,
    base_url: &'a str,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + 'a;

  /// Read a blob back by its unique name. Returns `None` if no such blob
  /// exists or the name does not address a blob at all.
  fn load<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<Bytes>, Self::Error>> + Send + 'a;
}
