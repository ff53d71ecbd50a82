//! Pages that need no sign-in. The fill page loads the form schema in the
//! browser, so none of these call the forms API.

use axum::extract::{Path, State};
use serde_json::json;

use crate::{AppState, page::Page};

/// `GET /`. Accounts come from configuration, so there is no sign-up link.
pub async fn home() -> Page {
  Page::new("Home", json!({ "canRegister": false }))
}

/// `GET /forms/:id`
pub async fn fill(Path(id): Path<String>) -> Page {
  Page::new("Forms/Fill", json!({ "formId": id }))
}

/// `GET /demo`
pub async fn demo(State(state): State<AppState>) -> Page {
  match state.config.demo_form_id.as_deref().filter(|id| !id.is_empty()) {
    Some(id) => Page::new("Demo", json!({ "formId": id })),
    None => Page::new("DemoUnconfigured", json!({})),
  }
}
