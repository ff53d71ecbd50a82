//! Async HTTP client wrapping the forms JSON API.

use std::{sync::Arc, time::Duration};

use forms_core::{CallerId, FormInput};
use reqwest::{Client, Method, Url, header::ACCEPT};
use serde_json::Value;

use crate::{
  error::{Error, FailureKind, RequestFailure, Result},
  sign::{Clock, SystemClock, sign},
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8090";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for the forms API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
  pub base_url: String,
  /// Shared signing secret. `None` signs with an empty key.
  pub secret:   Option<String>,
  pub timeout:  Duration,
}

impl ClientConfig {
  pub fn new(base_url: impl Into<String>) -> Self {
    Self {
      base_url: base_url.into(),
      secret:   None,
      timeout:  DEFAULT_TIMEOUT,
    }
  }

  pub fn secret(mut self, secret: impl Into<String>) -> Self {
    self.secret = Some(secret.into());
    self
  }

  pub fn timeout(mut self, timeout: Duration) -> Self {
    self.timeout = timeout;
    self
  }
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self::new(DEFAULT_BASE_URL)
  }
}

/// Unbound client for the forms API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based. Holds no
/// caller identity and cannot issue requests; bind one with
/// [`with_caller`](Self::with_caller).
#[derive(Clone)]
pub struct FormsClient {
  http:     Client,
  /// Base URL with the `api` segment appended.
  api_root: Url,
  secret:   Arc<str>,
  clock:    Arc<dyn Clock>,
}

impl FormsClient {
  pub fn new(config: ClientConfig) -> Result<Self> {
    let invalid = |reason: String| Error::InvalidBaseUrl {
      url: config.base_url.clone(),
      reason,
    };

    let mut api_root = Url::parse(&config.base_url).map_err(|e| invalid(e.to_string()))?;
    api_root
      .path_segments_mut()
      .map_err(|_| invalid("URL cannot be a base".to_string()))?
      .pop_if_empty()
      .push("api");

    let http = Client::builder().timeout(config.timeout).build()?;

    Ok(Self {
      http,
      api_root,
      secret: Arc::from(config.secret.unwrap_or_default()),
      clock: Arc::new(SystemClock),
    })
  }

  /// Replace the signing clock.
  pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
    self.clock = clock;
    self
  }

  /// A client that issues requests on behalf of `caller`.
  ///
  /// Returns a new value; `self` is left unbound and can be shared between
  /// concurrent requests.
  pub fn with_caller(&self, caller: CallerId) -> BoundClient {
    BoundClient {
      client: self.clone(),
      caller,
    }
  }
}

/// A [`FormsClient`] bound to one caller for the lifetime of one inbound
/// request.
#[derive(Clone)]
pub struct BoundClient {
  client: FormsClient,
  caller: CallerId,
}

/// A 2xx response body, not yet decoded.
struct Reply {
  method: Method,
  path:   String,
  body:   String,
}

impl Reply {
  fn decode_failure(&self, reason: impl Into<String>) -> RequestFailure {
    RequestFailure {
      method: self.method.clone(),
      path:   self.path.clone(),
      kind:   FailureKind::Decode(reason.into()),
    }
  }

  /// Decode the body and strip the `data` envelope, if present.
  fn payload(self) -> Result<Value, RequestFailure> {
    if self.body.trim().is_empty() {
      return Ok(Value::Null);
    }
    let body: Value =
      serde_json::from_str(&self.body).map_err(|e| self.decode_failure(e.to_string()))?;
    Ok(unwrap_envelope(body))
  }

  /// Payload of a lookup; an empty or `null` body means nothing was found.
  fn found(self) -> Result<Option<Value>, RequestFailure> {
    self.payload().map(|value| (!value.is_null()).then_some(value))
  }

  fn list(self) -> Result<Vec<Value>, RequestFailure> {
    let method = self.method.clone();
    let path = self.path.clone();
    match self.payload()? {
      Value::Array(items) => Ok(items),
      Value::Null => Ok(Vec::new()),
      other => Err(RequestFailure {
        method,
        path,
        kind: FailureKind::Decode(format!("expected a list, got {}", kind_of(&other))),
      }),
    }
  }
}

/// Return the value under a top-level `data` key, or the whole body.
pub fn unwrap_envelope(body: Value) -> Value {
  match body {
    Value::Object(mut map) => match map.remove("data") {
      Some(data) => data,
      None => Value::Object(map),
    },
    other => other,
  }
}

fn kind_of(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "a boolean",
    Value::Number(_) => "a number",
    Value::String(_) => "a string",
    Value::Array(_) => "a list",
    Value::Object(_) => "an object",
  }
}

impl BoundClient {
  // ── Forms ─────────────────────────────────────────────────────────────────

  /// `GET /api/forms`
  pub async fn list_forms(&self) -> Result<Vec<Value>, RequestFailure> {
    self.send(Method::GET, &["forms"], None).await?.list()
  }

  /// `GET /api/forms/{id}` — `None` on 404 or an empty payload.
  pub async fn get_form(&self, id: &str) -> Result<Option<Value>, RequestFailure> {
    match self.send(Method::GET, &["forms", id], None).await {
      Ok(reply) => reply.found(),
      Err(failure) if failure.is_not_found() => Ok(None),
      Err(failure) => Err(failure),
    }
  }

  /// `POST /api/forms`
  pub async fn create_form(&self, input: &FormInput) -> Result<Value, RequestFailure> {
    self.send(Method::POST, &["forms"], Some(input)).await?.payload()
  }

  /// `PUT /api/forms/{id}`
  pub async fn update_form(
    &self,
    id: &str,
    input: &FormInput,
  ) -> Result<Value, RequestFailure> {
    self.send(Method::PUT, &["forms", id], Some(input)).await?.payload()
  }

  /// `DELETE /api/forms/{id}` — the body of a 2xx answer is ignored.
  pub async fn delete_form(&self, id: &str) -> Result<bool, RequestFailure> {
    self.send(Method::DELETE, &["forms", id], None).await?;
    Ok(true)
  }

  // ── Submissions ───────────────────────────────────────────────────────────

  /// `GET /api/forms/{form_id}/submissions`
  pub async fn list_submissions(&self, form_id: &str) -> Result<Vec<Value>, RequestFailure> {
    self
      .send(Method::GET, &["forms", form_id, "submissions"], None)
      .await?
      .list()
  }

  /// `GET /api/forms/{form_id}/submissions/{id}` — `None` on 404 or an empty payload.
  pub async fn get_submission(
    &self,
    form_id: &str,
    id: &str,
  ) -> Result<Option<Value>, RequestFailure> {
    match self
      .send(Method::GET, &["forms", form_id, "submissions", id], None)
      .await
    {
      Ok(reply) => reply.found(),
      Err(failure) if failure.is_not_found() => Ok(None),
      Err(failure) => Err(failure),
    }
  }

  // ── Transport ─────────────────────────────────────────────────────────────

  fn url(&self, segments: &[&str]) -> Url {
    let mut url = self.client.api_root.clone();
    url
      .path_segments_mut()
      .expect("api_root is checked to be a base URL in FormsClient::new")
      .extend(segments);
    url
  }

  /// Sign and send one request. Any non-2xx status is a failure.
  async fn send(
    &self,
    method: Method,
    segments: &[&str],
    body: Option<&FormInput>,
  ) -> Result<Reply, RequestFailure> {
    let url = self.url(segments);
    let path = url.path().to_string();
    let failure = |kind| RequestFailure {
      method: method.clone(),
      path: path.clone(),
      kind,
    };

    let headers = sign(self.caller.as_str(), &self.client.secret, self.client.clock.now());

    let mut req = self
      .client
      .http
      .request(method.clone(), url)
      .header(ACCEPT, "application/json");
    for (name, value) in headers.pairs() {
      req = req.header(name, value);
    }
    if let Some(input) = body {
      req = req.json(input);
    }

    tracing::debug!(%method, %path, caller = %self.caller, "calling forms API");

    let resp = req
      .send()
      .await
      .map_err(|e| failure(FailureKind::Transport(e)))?;
    let status = resp.status();
    let text = resp
      .text()
      .await
      .map_err(|e| failure(FailureKind::Transport(e)))?;

    if !status.is_success() {
      return Err(failure(FailureKind::Status { status, body: text }));
    }

    Ok(Reply {
      method,
      path,
      body: text,
    })
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn envelope_is_unwrapped() {
    assert_eq!(unwrap_envelope(json!({ "data": [1, 2] })), json!([1, 2]));
    assert_eq!(unwrap_envelope(json!({ "data": null })), Value::Null);
  }

  #[test]
  fn body_without_envelope_is_returned_whole() {
    let body = json!({ "id": "1", "title": "Form One" });
    assert_eq!(unwrap_envelope(body.clone()), body);
    assert_eq!(unwrap_envelope(json!([1])), json!([1]));
  }

  #[test]
  fn urls_are_rooted_under_api() {
    for base in ["http://forms.test", "http://forms.test/"] {
      let client = FormsClient::new(ClientConfig::new(base)).unwrap();
      let bound = client.with_caller(CallerId::from(1));
      assert_eq!(bound.url(&["forms"]).as_str(), "http://forms.test/api/forms");
    }
  }

  #[test]
  fn base_path_prefix_is_kept() {
    let client = FormsClient::new(ClientConfig::new("http://forms.test/v2/")).unwrap();
    let bound = client.with_caller(CallerId::from(1));
    assert_eq!(
      bound.url(&["forms", "abc", "submissions"]).as_str(),
      "http://forms.test/v2/api/forms/abc/submissions"
    );
  }

  #[test]
  fn path_segments_are_escaped() {
    let client = FormsClient::new(ClientConfig::default()).unwrap();
    let bound = client.with_caller(CallerId::from(1));
    assert_eq!(
      bound.url(&["forms", "a/b c"]).as_str(),
      "http://localhost:8090/api/forms/a%2Fb%20c"
    );
  }

  #[test]
  fn rejects_unusable_base_urls() {
    assert!(matches!(
      FormsClient::new(ClientConfig::new("not a url")),
      Err(Error::InvalidBaseUrl { .. })
    ));
    assert!(matches!(
      FormsClient::new(ClientConfig::new("mailto:forms@example.com")),
      Err(Error::InvalidBaseUrl { .. })
    ));
  }
}
