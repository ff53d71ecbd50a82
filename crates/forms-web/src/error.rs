//! Error types and axum `IntoResponse` implementation.
//!
//! Only "not found" and field-level validation messages reach the browser.
//! Every other failure collapses to a short fixed message; the detail was
//! already logged when the upstream failure was normalized.

use axum::{
  Json,
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use forms_client::{RequestFailure, normalize};
use forms_core::{FieldErrors, NormalizedError};
use serde_json::json;
use thiserror::Error;

pub const NOT_FOUND_MESSAGE: &str = "Resource not found.";
pub const UNAVAILABLE_MESSAGE: &str = "Form service temporarily unavailable.";
pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred. Please try again.";
pub const GENERIC_MESSAGE: &str = "An error occurred. Please try again.";

#[derive(Debug, Error)]
pub enum Error {
  #[error("unauthorized")]
  Unauthorized,
  /// Submitted input failed local validation.
  #[error("invalid input: {0}")]
  Invalid(FieldErrors),
  #[error(transparent)]
  Upstream(#[from] NormalizedError),
}

/// Normalizes (and, where the outcome calls for it, logs) the failure.
impl From<RequestFailure> for Error {
  fn from(failure: RequestFailure) -> Self {
    Error::Upstream(normalize(&failure))
  }
}

fn message(status: StatusCode, message: &str) -> Response {
  (status, Json(json!({ "error": message }))).into_response()
}

fn field_errors(errors: FieldErrors) -> Response {
  (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "errors": errors }))).into_response()
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    match self {
      Error::Unauthorized => {
        let mut res =
          (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
        res.headers_mut().insert(
          header::WWW_AUTHENTICATE,
          HeaderValue::from_static("Basic realm=\"forms\""),
        );
        res
      }
      Error::Invalid(errors) => field_errors(errors),
      Error::Upstream(outcome) => match outcome {
        NormalizedError::NotFound => message(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE),
        NormalizedError::ValidationFailed(errors) => field_errors(errors),
        NormalizedError::ServiceUnavailable => {
          message(StatusCode::SERVICE_UNAVAILABLE, UNAVAILABLE_MESSAGE)
        }
        NormalizedError::Unauthorized | NormalizedError::ServerError => {
          message(StatusCode::INTERNAL_SERVER_ERROR, UNEXPECTED_MESSAGE)
        }
        NormalizedError::Generic => message(StatusCode::BAD_GATEWAY, GENERIC_MESSAGE),
      },
    }
  }
}
