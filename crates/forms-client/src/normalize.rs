//! Mapping of failed forms API calls onto [`NormalizedError`].
//!
//! | Failure | Outcome | Logged |
//! |---------|---------|--------|
//! | no response | `ServiceUnavailable` | error chain |
//! | 404 | `NotFound` | — |
//! | 401 | `Unauthorized` | path and body |
//! | 400, 422 | `ValidationFailed` | — |
//! | 5xx | `ServiceUnavailable` | status and body |
//! | other status | `Generic` | — |
//! | undecodable 2xx body | `ServerError` | path and reason |
//!
//! Log entries carry the upstream detail; the returned error carries none of
//! it beyond validation messages.

use std::error::Error as StdError;

use forms_core::NormalizedError;
use reqwest::StatusCode;
use tracing::error;

use crate::{
  error::{FailureKind, RequestFailure},
  validation::parse_validation_errors,
};

/// Classify `failure`, logging the kinds that indicate a fault.
pub fn normalize(failure: &RequestFailure) -> NormalizedError {
  match &failure.kind {
    FailureKind::Transport(err) => {
      error!(
        method = %failure.method,
        path = %failure.path,
        error = %error_chain(err),
        "forms API unreachable (connection refused, timeout)"
      );
      NormalizedError::ServiceUnavailable
    }
    FailureKind::Decode(reason) => {
      error!(
        method = %failure.method,
        path = %failure.path,
        %reason,
        "forms API returned an undecodable body"
      );
      NormalizedError::ServerError
    }
    FailureKind::Status { status, body } => from_status(*status, body, failure),
  }
}

fn from_status(status: StatusCode, body: &str, failure: &RequestFailure) -> NormalizedError {
  match status.as_u16() {
    404 => NormalizedError::NotFound,
    401 => {
      error!(
        path = %failure.path,
        body,
        "forms API returned 401 (signing misconfiguration)"
      );
      NormalizedError::Unauthorized
    }
    400 | 422 => NormalizedError::ValidationFailed(parse_validation_errors(body)),
    code if code >= 500 => {
      error!(status = code, path = %failure.path, body, "forms API server error");
      NormalizedError::ServiceUnavailable
    }
    _ => NormalizedError::Generic,
  }
}

/// Render an error and all of its sources as `outer: inner: …`.
fn error_chain(err: &(dyn StdError + 'static)) -> String {
  let mut rendered = err.to_string();
  let mut source = err.source();
  while let Some(cause) = source {
    rendered.push_str(": ");
    rendered.push_str(&cause.to_string());
    source = cause.source();
  }
  rendered
}

#[cfg(test)]
mod tests {
  use reqwest::Method;

  use super::*;
  use crate::testing::capture_logs;

  fn status_failure(code: u16, body: &str) -> RequestFailure {
    RequestFailure {
      method: Method::GET,
      path:   "/api/forms/abc".to_string(),
      kind:   FailureKind::Status {
        status: StatusCode::from_u16(code).unwrap(),
        body:   body.to_string(),
      },
    }
  }

  #[test]
  fn status_table_is_exhaustive() {
    let cases = [
      (401, NormalizedError::Unauthorized),
      (404, NormalizedError::NotFound),
      (500, NormalizedError::ServiceUnavailable),
      (502, NormalizedError::ServiceUnavailable),
      (503, NormalizedError::ServiceUnavailable),
      (418, NormalizedError::Generic),
      (403, NormalizedError::Generic),
      (409, NormalizedError::Generic),
    ];
    for (code, expected) in cases {
      assert_eq!(normalize(&status_failure(code, "{}")), expected, "status {code}");
    }
  }

  #[test]
  fn bad_request_and_unprocessable_are_validation_failures() {
    for code in [400, 422] {
      let outcome = normalize(&status_failure(code, r#"{"errors":{"title":["required"]}}"#));
      let fields = outcome.field_errors().expect("validation failure");
      assert_eq!(fields.get("title"), Some(&["required".to_string()][..]));
    }
  }

  #[test]
  fn quiet_outcomes_do_not_log() {
    let (logs, _guard) = capture_logs();
    normalize(&status_failure(404, ""));
    normalize(&status_failure(422, "{}"));
    normalize(&status_failure(418, "teapot"));
    assert!(logs.error_lines().is_empty(), "logs: {}", logs.contents());
  }

  #[test]
  fn unauthorized_logs_path_and_body() {
    let (logs, _guard) = capture_logs();
    normalize(&status_failure(401, "bad signature"));
    let lines = logs.error_lines();
    assert_eq!(lines.len(), 1, "logs: {}", logs.contents());
    assert!(lines[0].contains("/api/forms/abc"));
    assert!(lines[0].contains("bad signature"));
  }

  #[test]
  fn server_error_logs_status_and_body() {
    let (logs, _guard) = capture_logs();
    normalize(&status_failure(503, "maintenance"));
    let lines = logs.error_lines();
    assert_eq!(lines.len(), 1, "logs: {}", logs.contents());
    assert!(lines[0].contains("503"));
    assert!(lines[0].contains("maintenance"));
  }

  #[test]
  fn undecodable_body_is_a_server_error() {
    let (logs, _guard) = capture_logs();
    let failure = RequestFailure {
      method: Method::GET,
      path:   "/api/forms".to_string(),
      kind:   FailureKind::Decode("expected a list, got a string".to_string()),
    };
    assert_eq!(normalize(&failure), NormalizedError::ServerError);
    assert_eq!(logs.error_lines().len(), 1);
  }
}
