//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("unauthorized: {0}")]
  Unauthorized(String),

  #[error("store error: {0}")]
  Store(String),
}

impl ApiError {
  /// Classify a store failure through the core taxonomy: conflicts map to
  /// 409, absent references to 404, validation to 400, and backend failures
  /// to a retryable 500.
  pub fn from_store<E: Into<guild_core::Error>>(err: E) -> Self {
    use guild_core::Error;
    match err.into() {
      e @ (Error::ProfessionNotFound(_)
      | Error::OfferingNotFound { .. }
      | Error::UserNotFound(_)
      | Error::CityNotFound(_)) => Self::NotFound(e.to_string()),

      e @ (Error::DuplicateProfession(_)
      | Error::AlreadyOffered { .. }
      | Error::EmailTaken(_)) => Self::Conflict(e.to_string()),

      e @ Error::InvalidScore(_) => Self::BadRequest(e.to_string()),

      Error::Storage(message) => Self::Store(message),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, m.clone()),
      ApiError::Store(m) => (StatusCode::INTERNAL_SERVER_ERROR, m.clone()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
