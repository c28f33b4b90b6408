//! Handlers for `/api/contacts` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/api/contacts` | All contacts as summaries |
//! | `GET`    | `/api/contacts/{id}` | Detail view; 404 if absent |
//! | `POST`   | `/api/contacts` | Form body + optional file; returns summary |
//! | `PUT`    | `/api/contacts/{id}` | Form body + optional file; 400 if body id differs |
//! | `DELETE` | `/api/contacts/{id}` | 204, or 404 if absent |
//! | `GET`    | `/api/contacts/findByName/{name}` | Substring match, any case |
//! | `GET`    | `/api/contacts/findByAge/{from}/{to}` | Age strictly between `to` and `from` |
//! | `GET`    | `/api/contacts/loadImage/{name}` | Raw photo bytes |

use axum::{
  Json,
  extract::{Path, State},
  http::{HeaderMap, StatusCode, header},
  response::{IntoResponse, Response},
};
use rolodex_core::{
  Lookup,
  blob::BlobStore,
  contact::{ContactDetail, ContactId, ContactSummary},
  store::ContactStore,
};
use tracing::{debug, warn};

use crate::{ApiState, CONTACTS_PATH, error::ApiError, form::ContactForm};

/// Base URL handed to the blob store for building photo references.
fn contacts_url<S, B>(state: &ApiState<S, B>, headers: &HeaderMap) -> String {
  match state.public_url.as_deref() {
    Some(url) => format!("{}{CONTACTS_PATH}", url.trim_end_matches('/')),
    None => {
      let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
      format!("http://{host}{CONTACTS_PATH}")
    }
  }
}

// ─── Collection ──────────────────────────────────────────────────────────────

/// `GET /api/contacts`
pub async fn list<S, B>(
  State(state): State<ApiState<S, B>>,
) -> Result<Json<Vec<ContactSummary>>, ApiError>
where
  S: ContactStore,
  B: BlobStore,
{
  let contacts = state.service.get_all().await?;
  Ok(Json(contacts))
}

/// `POST /api/contacts`
pub async fn create<S, B>(
  State(state): State<ApiState<S, B>>,
  headers: HeaderMap,
  form: ContactForm,
) -> Result<Json<ContactSummary>, ApiError>
where
  S: ContactStore,
  B: BlobStore,
{
  let base_url = contacts_url(&state, &headers);
  let summary = state.service.create(form.input, form.file, &base_url).await?;
  Ok(Json(summary))
}

// ─── Single contact ──────────────────────────────────────────────────────────

/// `GET /api/contacts/{id}`
pub async fn get_one<S, B>(
  State(state): State<ApiState<S, B>>,
  Path(id): Path<ContactId>,
) -> Result<Json<ContactDetail>, ApiError>
where
  S: ContactStore,
  B: BlobStore,
{
  match state.service.get_by_id(id).await? {
    Lookup::Found(detail) => Ok(Json(detail)),
    Lookup::NotFound => Err(ApiError::NotFound),
  }
}

/// `PUT /api/contacts/{id}` — the body's `id` must equal the path id.
pub async fn update<S, B>(
  State(state): State<ApiState<S, B>>,
  Path(id): Path<ContactId>,
  headers: HeaderMap,
  form: ContactForm,
) -> Result<Json<ContactSummary>, ApiError>
where
  S: ContactStore,
  B: BlobStore,
{
  if form.input.id != id {
    debug!(path_id = id, body_id = form.input.id, "id mismatch on update");
    return Err(ApiError::Validation);
  }

  let base_url = contacts_url(&state, &headers);
  match state.service.update(form.input, id, form.file, &base_url).await? {
    Lookup::Found(summary) => Ok(Json(summary)),
    Lookup::NotFound => Err(ApiError::NotFound),
  }
}

/// `DELETE /api/contacts/{id}`
pub async fn delete<S, B>(
  State(state): State<ApiState<S, B>>,
  Path(id): Path<ContactId>,
) -> Result<StatusCode, ApiError>
where
  S: ContactStore,
  B: BlobStore,
{
  match state.service.delete(id).await? {
    Lookup::Found(()) => Ok(StatusCode::NO_CONTENT),
    Lookup::NotFound => Err(ApiError::NotFound),
  }
}

// ─── Filters ─────────────────────────────────────────────────────────────────

/// `GET /api/contacts/findByName/{name}` — 200 with `[]` when nothing matches.
pub async fn find_by_name<S, B>(
  State(state): State<ApiState<S, B>>,
  Path(name): Path<String>,
) -> Result<Json<Vec<ContactSummary>>, ApiError>
where
  S: ContactStore,
  B: BlobStore,
{
  let contacts = state.service.filter_by_name(&name).await?;
  Ok(Json(contacts))
}

/// `GET /api/contacts/findByAge/{from}/{to}` — 200 with `[]` when nothing
/// matches, including when `from <= to`.
pub async fn find_by_age<S, B>(
  State(state): State<ApiState<S, B>>,
  Path((from, to)): Path<(i32, i32)>,
) -> Result<Json<Vec<ContactSummary>>, ApiError>
where
  S: ContactStore,
  B: BlobStore,
{
  let contacts = state.service.filter_by_age(from, to).await?;
  Ok(Json(contacts))
}

// ─── Photos ──────────────────────────────────────────────────────────────────

/// `GET /api/contacts/loadImage/{name}` — a missing image and a failed read
/// both answer 400 with no body.
pub async fn load_image<S, B>(
  State(state): State<ApiState<S, B>>,
  Path(name): Path<String>,
) -> Result<Response, ApiError>
where
  S: ContactStore,
  B: BlobStore,
{
  match state.service.load_image(&name).await {
    Ok(Lookup::Found(bytes)) => {
      Ok(([(header::CONTENT_TYPE, "image/*")], bytes).into_response())
    }
    Ok(Lookup::NotFound) => {
      debug!(%name, "image not found");
      Err(ApiError::Validation)
    }
    Err(e) => {
      warn!(error = %e, %name, "image read failed");
      Err(ApiError::Validation)
    }
  }
}
