//! Error types for `forms-client`.

use reqwest::{Method, StatusCode};
use thiserror::Error;

/// Failure to construct a [`FormsClient`](crate::FormsClient).
#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid forms API base URL {url:?}: {reason}")]
  InvalidBaseUrl { url: String, reason: String },

  #[error("failed to build HTTP client: {0}")]
  Http(#[from] reqwest::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A call to the forms API that did not produce a usable 2xx response.
#[derive(Debug, Error)]
#[error("{method} {path}: {kind}")]
pub struct RequestFailure {
  pub method: Method,
  pub path:   String,
  #[source]
  pub kind:   FailureKind,
}

#[derive(Debug, Error)]
pub enum FailureKind {
  /// The request never produced a response (refused, timed out, reset).
  #[error("no response from forms API")]
  Transport(#[source] reqwest::Error),

  /// The forms API answered with a non-2xx status.
  #[error("forms API returned {status}")]
  Status { status: StatusCode, body: String },

  /// A 2xx response whose body was not the expected JSON.
  #[error("undecodable response body: {0}")]
  Decode(String),
}

impl RequestFailure {
  pub fn status(&self) -> Option<StatusCode> {
    match &self.kind {
      FailureKind::Status { status, .. } => Some(*status),
      _ => None,
    }
  }

  pub fn is_not_found(&self) -> bool {
    self.status() == Some(StatusCode::NOT_FOUND)
  }
}
