//! HTTP façade for Rolodex.
//!
//! Exposes an axum [`Router`] backed by a [`ContactService`] over any
//! [`ContactStore`] and [`BlobStore`]. TLS and transport concerns are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = rolodex_api::api_router(Arc::new(service), &ApiConfig::default());
//! ```

pub mod contacts;
pub mod error;
pub mod form;

use std::sync::Arc;

use axum::{Router, extract::DefaultBodyLimit, routing::get};
use rolodex_core::{blob::BlobStore, service::ContactService, store::ContactStore};

pub use error::ApiError;
pub use form::ContactForm;

/// Where the contact routes are mounted; also the prefix of photo references.
pub const CONTACTS_PATH: &str = "/api/contacts";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Knobs the router needs from the server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  /// Externally visible origin, e.g. `https://contacts.example.com`. When
  /// unset, photo references are built from the request's `Host` header.
  pub public_url:       Option<String>,
  /// Largest accepted request body, photo included.
  pub max_upload_bytes: usize,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self { public_url: None, max_upload_bytes: 10 * 1024 * 1024 }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct ApiState<S, B> {
  pub service:    Arc<ContactService<S, B>>,
  pub public_url: Option<Arc<str>>,
}

impl<S, B> Clone for ApiState<S, B> {
  fn clone(&self) -> Self {
    Self {
      service:    Arc::clone(&self.service),
      public_url: self.public_url.clone(),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the contacts router for `service`.
///
/// The returned `Router<()>` can be merged into any parent router regardless
/// of its own state type.
pub fn api_router<S, B>(
  service: Arc<ContactService<S, B>>,
  config: &ApiConfig,
) -> Router<()>
where
  S: ContactStore + 'static,
  B: BlobStore + 'static,
{
  let state = ApiState {
    service,
    public_url: config.public_url.as_deref().map(Arc::from),
  };

  Router::new()
    .route(
      "/api/contacts",
      get(contacts::list::<S, B>).post(contacts::create::<S, B>),
    )
    .route(
      "/api/contacts/{id}",
      get(contacts::get_one::<S, B>)
        .put(contacts::update::<S, B>)
        .delete(contacts::delete::<S, B>),
    )
    .route("/api/contacts/findByName/{name}", get(contacts::find_by_name::<S, B>))
    .route("/api/contacts/findByAge/{from}/{to}", get(contacts::find_by_age::<S, B>))
    // Stored references use the lowercase spelling.
    .route("/api/contacts/loadImage/{name}", get(contacts::load_image::<S, B>))
    .route("/api/contacts/loadimage/{name}", get(contacts::load_image::<S, B>))
    .layer(DefaultBodyLimit::max(config.max_upload_bytes))
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, Request, StatusCode, header},
  };
  use chrono::Local;
  use rolodex_blob_fs::FsBlobStore;
  use rolodex_core::service::shift_years;
  use rolodex_store_sqlite::SqliteStore;
  use serde_json::Value;
  use tempfile::TempDir;
  use tower::ServiceExt as _;

  const HOST: &str = "contacts.test";
  const BOUNDARY: &str = "rolodex-test-boundary";

  /// Router over an in-memory store; photos live until the guard drops.
  async fn app_with(config: &ApiConfig) -> (TempDir, Router) {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    let blobs = FsBlobStore::open(dir.path()).await.unwrap();
    let router = api_router(Arc::new(ContactService::new(store, blobs)), config);
    (dir, router)
  }

  async fn app() -> (TempDir, Router) { app_with(&ApiConfig::default()).await }

  /// A `multipart/form-data` body with text fields and an optional file.
  fn multipart(fields: &[(&str, &str)], file: Option<(&str, &[u8])>) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    for (name, value) in fields {
      body.extend_from_slice(
        format!(
          "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        )
        .as_bytes(),
      );
    }
    if let Some((file_name, data)) = file {
      body.extend_from_slice(
        format!(
          "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; \
           filename=\"{file_name}\"\r\nContent-Type: image/png\r\n\r\n"
        )
        .as_bytes(),
      );
      body.extend_from_slice(data);
      body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
  }

  async fn send(
    app:     &Router,
    method:  &str,
    uri:     &str,
    content: Option<(String, Vec<u8>)>,
  ) -> (StatusCode, HeaderMap, Bytes) {
    let mut builder = Request::builder()
      .method(method)
      .uri(uri)
      .header(header::HOST, HOST);
    let body = match content {
      Some((content_type, body)) => {
        builder = builder.header(header::CONTENT_TYPE, content_type);
        Body::from(body)
      }
      None => Body::empty(),
    };

    let resp = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, headers, bytes)
  }

  fn json(bytes: &Bytes) -> Value { serde_json::from_slice(bytes).unwrap() }

  async fn create(app: &Router, first: &str, dob: &str, file: Option<(&str, &[u8])>) -> Value {
    let form = multipart(
      &[
        ("firstName", first),
        ("secondName", "Doe"),
        ("dateOfBirth", dob),
        ("addresses", "Main Street 1"),
        ("phoneNumbers", "555-0100"),
      ],
      file,
    );
    let (status, _, body) = send(app, "POST", "/api/contacts", Some(form)).await;
    assert_eq!(status, StatusCode::OK, "create failed: {body:?}");
    json(&body)
  }

  // ── Create / read ───────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_then_get_round_trip() {
    let (_dir, app) = app().await;
    let summary = create(&app, "Jane", "1990-04-05", None).await;
    assert_eq!(summary["firstName"], "Jane");
    assert_eq!(summary["dateOfBirth"], "1990-04-05");
    assert!(summary.get("personalPhoto").is_none());

    let id = summary["id"].as_i64().unwrap();
    let (status, _, body) = send(&app, "GET", &format!("/api/contacts/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let detail = json(&body);
    assert_eq!(detail["secondName"], "Doe");
    assert_eq!(detail["addresses"], "Main Street 1");
    assert_eq!(detail["phoneNumbers"], "555-0100");
    assert_eq!(detail["personalPhoto"], "");
  }

  #[tokio::test]
  async fn create_accepts_urlencoded_form() {
    let (_dir, app) = app().await;
    let form = (
      "application/x-www-form-urlencoded".to_string(),
      b"FirstName=Max&DateOfBirth=1980-01-01T00%3A00%3A00".to_vec(),
    );
    let (status, _, body) = send(&app, "POST", "/api/contacts", Some(form)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body)["dateOfBirth"], "1980-01-01");
  }

  #[tokio::test]
  async fn create_without_date_of_birth_is_400_with_message() {
    let (_dir, app) = app().await;
    let form = multipart(&[("firstName", "NoDate")], None);
    let (status, _, body) = send(&app, "POST", "/api/contacts", Some(form)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(std::str::from_utf8(&body).unwrap().contains("dateOfBirth"));
  }

  #[tokio::test]
  async fn list_empty_store_is_200_with_empty_array() {
    let (_dir, app) = app().await;
    let (status, _, body) = send(&app, "GET", "/api/contacts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body), Value::Array(vec![]));

    create(&app, "One", "2000-01-01", None).await;
    create(&app, "Two", "2000-01-01", None).await;
    let (_, _, body) = send(&app, "GET", "/api/contacts", None).await;
    let list = json(&body);
    assert_eq!(list.as_array().unwrap().len(), 2);
    assert_eq!(list[0]["firstName"], "One");
    assert!(list[0].get("personalPhoto").is_none());
  }

  #[tokio::test]
  async fn get_missing_is_404() {
    let (_dir, app) = app().await;
    let (status, _, body) = send(&app, "GET", "/api/contacts/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
  }

  // ── Photos ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn photo_reference_is_served_back() {
    let (_dir, app) = app().await;
    let summary = create(&app, "Pic", "1990-01-01", Some(("me.png", &b"\x89PNG data"[..]))).await;
    let id = summary["id"].as_i64().unwrap();

    let (_, _, body) = send(&app, "GET", &format!("/api/contacts/{id}"), None).await;
    let reference = json(&body)["personalPhoto"].as_str().unwrap().to_owned();
    let prefix = format!("http://{HOST}/api/contacts/loadimage/");
    assert!(reference.starts_with(&prefix), "reference: {reference}");
    assert!(reference.ends_with("_me.png"));

    let path = reference.trim_start_matches(&format!("http://{HOST}"));
    let (status, headers, bytes) = send(&app, "GET", path, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "image/*");
    assert_eq!(&bytes[..], b"\x89PNG data");

    let name = &reference[prefix.len()..];
    let (status, _, _) =
      send(&app, "GET", &format!("/api/contacts/loadImage/{name}"), None).await;
    assert_eq!(status, StatusCode::OK);
  }

  #[tokio::test]
  async fn same_filename_twice_gets_distinct_references() {
    let (_dir, app) = app().await;
    let mut refs = Vec::new();
    for _ in 0..2 {
      let id = create(&app, "Dup", "1990-01-01", Some(("same.png", &b"x"[..]))).await["id"]
        .as_i64()
        .unwrap();
      let (_, _, body) = send(&app, "GET", &format!("/api/contacts/{id}"), None).await;
      refs.push(json(&body)["personalPhoto"].as_str().unwrap().to_owned());
    }
    assert_ne!(refs[0], refs[1]);
  }

  #[tokio::test]
  async fn load_missing_image_is_400_without_body() {
    let (_dir, app) = app().await;
    for uri in [
      "/api/contacts/loadImage/nothing-here.png",
      "/api/contacts/loadImage/..%2F..%2FCargo.toml",
    ] {
      let (status, _, body) = send(&app, "GET", uri, None).await;
      assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
      assert!(body.is_empty());
    }
  }

  #[tokio::test]
  async fn dotted_file_name_is_served_back() {
    let (_dir, app) = app().await;
    let id = create(&app, "Dots", "1990-01-01", Some(("me..v2.png", &b"v2"[..]))).await["id"]
      .as_i64()
      .unwrap();

    let (_, _, body) = send(&app, "GET", &format!("/api/contacts/{id}"), None).await;
    let reference = json(&body)["personalPhoto"].as_str().unwrap().to_owned();
    assert!(reference.ends_with("_me..v2.png"), "reference: {reference}");

    let path = reference.trim_start_matches(&format!("http://{HOST}"));
    let (status, _, bytes) = send(&app, "GET", path, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&bytes[..], b"v2");
  }

  #[tokio::test]
  async fn oversized_body_is_400_with_message() {
    let config = ApiConfig { max_upload_bytes: 16, ..ApiConfig::default() };
    let (_dir, app) = app_with(&config).await;

    let urlencoded = (
      "application/x-www-form-urlencoded".to_string(),
      b"firstName=Someone&dateOfBirth=1990-01-01".to_vec(),
    );
    let with_photo = multipart(
      &[("dateOfBirth", "1990-01-01")],
      Some(("big.png", &[0_u8; 64][..])),
    );

    for form in [urlencoded, with_photo] {
      let (status, _, body) = send(&app, "POST", "/api/contacts", Some(form)).await;
      assert_eq!(status, StatusCode::BAD_REQUEST);
      assert!(!body.is_empty());
    }

    let (_, _, body) = send(&app, "GET", "/api/contacts", None).await;
    assert_eq!(json(&body), Value::Array(vec![]));
  }

  // ── Update ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn update_with_mismatched_id_is_400_and_changes_nothing() {
    let (_dir, app) = app().await;
    let id = create(&app, "Orig", "1990-01-01", None).await["id"].as_i64().unwrap();

    let other = (id + 1).to_string();
    let form = multipart(
      &[("id", other.as_str()), ("firstName", "Changed"), ("dateOfBirth", "1990-01-01")],
      None,
    );
    let (status, _, body) = send(&app, "PUT", &format!("/api/contacts/{id}"), Some(form)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.is_empty());

    let (_, _, body) = send(&app, "GET", &format!("/api/contacts/{id}"), None).await;
    assert_eq!(json(&body)["firstName"], "Orig");
  }

  #[tokio::test]
  async fn update_without_file_clears_photo() {
    let (_dir, app) = app().await;
    let id = create(&app, "Pic", "1990-01-01", Some(("me.png", &b"img"[..]))).await["id"]
      .as_i64()
      .unwrap();
    let id_str = id.to_string();

    let form = multipart(
      &[
        ("id", id_str.as_str()),
        ("firstName", "Renamed"),
        ("secondName", "Doe"),
        ("dateOfBirth", "1991-02-03"),
      ],
      None,
    );
    let (status, _, body) = send(&app, "PUT", &format!("/api/contacts/{id}"), Some(form)).await;
    assert_eq!(status, StatusCode::OK);
    let summary = json(&body);
    assert_eq!(summary["id"], id);
    assert_eq!(summary["firstName"], "Renamed");

    let (_, _, body) = send(&app, "GET", &format!("/api/contacts/{id}"), None).await;
    let detail = json(&body);
    assert_eq!(detail["dateOfBirth"], "1991-02-03");
    assert_eq!(detail["addresses"], "");
    assert_eq!(detail["personalPhoto"], "");
  }

  #[tokio::test]
  async fn update_missing_is_404() {
    let (_dir, app) = app().await;
    let form = multipart(&[("id", "41"), ("dateOfBirth", "1990-01-01")], None);
    let (status, _, _) = send(&app, "PUT", "/api/contacts/41", Some(form)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  // ── Delete ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn delete_then_repeat_is_404() {
    let (_dir, app) = app().await;
    let id = create(&app, "Gone", "1990-01-01", None).await["id"].as_i64().unwrap();
    let uri = format!("/api/contacts/{id}");

    let (status, _, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    for _ in 0..2 {
      let (status, _, _) = send(&app, "DELETE", &uri, None).await;
      assert_eq!(status, StatusCode::NOT_FOUND);
    }
    let (status, _, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  // ── Filters ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn find_by_name_is_case_insensitive() {
    let (_dir, app) = app().await;
    create(&app, "Alice", "1990-01-01", None).await;

    let (status, _, body) = send(&app, "GET", "/api/contacts/findByName/MAIN", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body).as_array().unwrap().len(), 1);

    let (status, _, body) = send(&app, "GET", "/api/contacts/findByName/zzz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body), Value::Array(vec![]));
  }

  #[tokio::test]
  async fn find_by_age_window_and_reversed_bounds() {
    let (_dir, app) = app().await;
    let today = Local::now().date_naive();
    for (name, age) in [("ten", 10), ("twenty", 20), ("thirty", 30)] {
      let dob = shift_years(today, -age).unwrap().to_string();
      create(&app, name, &dob, None).await;
    }

    let (status, _, body) = send(&app, "GET", "/api/contacts/findByAge/25/15", None).await;
    assert_eq!(status, StatusCode::OK);
    let hits = json(&body);
    assert_eq!(hits.as_array().unwrap().len(), 1);
    assert_eq!(hits[0]["firstName"], "twenty");

    let (status, _, body) = send(&app, "GET", "/api/contacts/findByAge/15/25", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body), Value::Array(vec![]));
  }
}
