//! Process wiring for the Rolodex server: configuration, store construction
//! and the top-level router.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use axum::Router;
use rolodex_api::{ApiConfig, api_router};
use rolodex_blob_fs::FsBlobStore;
use rolodex_core::service::ContactService;
use rolodex_store_sqlite::SqliteStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration: built-in defaults, then `config.toml`, then
/// `ROLODEX_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:             String,
  pub port:             u16,
  /// SQLite database file; created on first start.
  pub store_path:       PathBuf,
  /// Directory holding uploaded photos; created on first start.
  pub image_dir:        PathBuf,
  /// Externally visible origin used in photo references.
  pub public_url:       Option<String>,
  pub max_upload_bytes: usize,
}

impl ServerConfig {
  /// Load configuration, treating a missing file as empty.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    Self::load_with_env(path, config::Environment::with_prefix("ROLODEX"))
  }

  fn load_with_env(
    path: &Path,
    env: config::Environment,
  ) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", "127.0.0.1")?
      .set_default("port", 5000)?
      .set_default("store_path", "contacts.db")?
      .set_default("image_dir", "Resources/Images")?
      .set_default("max_upload_bytes", 10_i64 * 1024 * 1024)?
      .add_source(config::File::from(path.to_path_buf()).required(false))
      .add_source(env)
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Application ──────────────────────────────────────────────────────────────

/// Open both stores and build the traced router.
pub async fn build_app(cfg: &ServerConfig) -> anyhow::Result<Router> {
  let store_path = expand_tilde(&cfg.store_path);
  if let Some(parent) = store_path.parent().filter(|p| !p.as_os_str().is_empty()) {
    tokio::fs::create_dir_all(parent)
      .await
      .with_context(|| format!("failed to create {parent:?}"))?;
  }

  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let image_dir = expand_tilde(&cfg.image_dir);
  let blobs = FsBlobStore::open(&image_dir)
    .await
    .with_context(|| format!("failed to open image directory {image_dir:?}"))?;

  tracing::info!(?store_path, ?image_dir, "stores ready");

  let api_cfg = ApiConfig {
    public_url:       cfg.public_url.clone(),
    max_upload_bytes: cfg.max_upload_bytes,
  };
  let service = ContactService::new(store, blobs);

  Ok(api_router(Arc::new(service), &api_cfg).layer(TraceLayer::new_for_http()))
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
