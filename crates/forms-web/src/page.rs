//! Page objects and post-action redirects.
//!
//! A page is rendered as `{"component": "Forms/Index", "props": {...}}`; the
//! front-end bundle resolves `component` to a view and hands it `props`.

use axum::{
  Json,
  http::HeaderName,
  response::{IntoResponse, Redirect, Response},
};
use serde::Serialize;
use serde_json::Value;
use url::Url;

pub const FLASH_SUCCESS_HEADER: HeaderName = HeaderName::from_static("x-flash-success");

#[derive(Debug, Serialize)]
pub struct Page {
  pub component: &'static str,
  pub props:     Value,
}

impl Page {
  pub fn new(component: &'static str, props: Value) -> Self {
    Self { component, props }
  }
}

impl IntoResponse for Page {
  fn into_response(self) -> Response {
    Json(self).into_response()
  }
}

/// `/forms/...` with each segment percent-encoded.
pub fn forms_path(segments: &[&str]) -> String {
  let Ok(mut url) = Url::parse("http://localhost/forms") else {
    return "/forms".to_string();
  };
  if let Ok(mut path) = url.path_segments_mut() {
    path.extend(segments);
  }
  url.path().to_string()
}

/// `303 See Other` to `location`, carrying a success message for the next page.
pub fn redirect_with_success(location: &str, message: &'static str) -> Response {
  ([(FLASH_SUCCESS_HEADER, message)], Redirect::to(location)).into_response()
}
