//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every failure surfaces as 400 with the message as plain text; there is no
//! structured error body.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::warn;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// 404 with an empty body.
  #[error("not found")]
  NotFound,

  /// 400 with an empty body.
  #[error("request failed validation")]
  Validation,

  /// 400 carrying the message.
  #[error("{0}")]
  BadRequest(String),

  /// 400 carrying the service failure's message.
  #[error(transparent)]
  Service(#[from] rolodex_core::Error),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
      ApiError::Validation => StatusCode::BAD_REQUEST.into_response(),
      ApiError::BadRequest(msg) => {
        warn!(%msg, "bad request");
        (StatusCode::BAD_REQUEST, msg).into_response()
      }
      ApiError::Service(e) => {
        warn!(error = %e, "request failed");
        (StatusCode::BAD_REQUEST, e.to_string()).into_response()
      }
    }
  }
}
