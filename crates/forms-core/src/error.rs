//! Error types for `forms-core`.

use thiserror::Error;

use crate::fields::FieldErrors;

#[derive(Debug, Error)]
pub enum Error {
  #[error("caller id must not be empty")]
  EmptyCallerId,

  #[error("caller id contains characters not allowed in a header: {0:?}")]
  InvalidCallerId(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The local outcome of a failed call to the forms API.
///
/// Only [`NotFound`](Self::NotFound) and
/// [`ValidationFailed`](Self::ValidationFailed) are meaningful to an end user.
/// The remaining kinds differ only in what was logged when they were produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizedError {
  #[error("resource not found")]
  NotFound,

  #[error("validation failed: {0}")]
  ValidationFailed(FieldErrors),

  #[error("forms service unavailable")]
  ServiceUnavailable,

  #[error("forms service rejected the request signature")]
  Unauthorized,

  #[error("forms service returned an unusable response")]
  ServerError,

  #[error("forms service request failed")]
  Generic,
}

impl NormalizedError {
  /// Field errors carried by a validation failure, if any.
  pub fn field_errors(&self) -> Option<&FieldErrors> {
    match self {
      NormalizedError::ValidationFailed(fields) => Some(fields),
      _ => None,
    }
  }
}
