pub mod dashboard;
pub mod forms;
pub mod public;
pub mod submissions;

use axum::{extract::FromRequestParts, http::request::Parts};
use forms_client::BoundClient;
use serde_json::Value;

use crate::{AppState, auth::Caller, error::Error};

/// A forms API client bound to the authenticated caller of this request.
pub struct Api(pub BoundClient);

impl FromRequestParts<AppState> for Api {
  type Rejection = Error;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState,
  ) -> Result<Self, Self::Rejection> {
    let Caller(caller) = Caller::from_request_parts(parts, state).await?;
    Ok(Api(state.client.with_caller(caller)))
  }
}

/// The id of a form payload. The forms API has used both `id` and `ID`.
pub(super) fn form_id(form: &Value) -> Option<String> {
  match form.get("id").or_else(|| form.get("ID"))? {
    Value::String(s) if !s.is_empty() => Some(s.clone()),
    Value::Number(n) => Some(n.to_string()),
    _ => None,
  }
}
