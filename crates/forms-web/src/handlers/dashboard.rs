//! Landing page after sign-in.

use serde_json::json;

use crate::{auth::Caller, page::Page};

/// `GET /dashboard`
pub async fn show(_caller: Caller) -> Page {
  Page::new("Dashboard", json!({}))
}
