//! Web front end for the forms product.
//!
//! Exposes an axum [`Router`] whose page handlers bind a [`FormsClient`] to
//! the authenticated caller for each request, call the forms API, and render
//! the result as a page object.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod page;

pub use error::Error;

use std::{sync::Arc, time::Duration};

use axum::{Router, routing::get};
use forms_client::{ClientConfig, FormsClient, client::DEFAULT_BASE_URL};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use auth::AuthConfig;
use handlers::{dashboard, forms, public, submissions};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `FORMS_*` environment variables.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:         String,
  #[serde(default = "default_port")]
  pub port:         u16,
  /// Form shown on the public demo page.
  #[serde(default)]
  pub demo_form_id: Option<String>,
  #[serde(default)]
  pub forms_api:    FormsApiConfig,
  #[serde(default)]
  pub users:        Vec<UserConfig>,
}

/// Location and shared secret of the forms API.
#[derive(Deserialize, Clone)]
pub struct FormsApiConfig {
  #[serde(default = "default_api_url")]
  pub url:          String,
  #[serde(default)]
  pub secret:       Option<String>,
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

/// A user allowed to sign in.
#[derive(Deserialize, Clone)]
pub struct UserConfig {
  /// Caller id sent to the forms API.
  pub id:            String,
  pub username:      String,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
}

fn default_host() -> String {
  "127.0.0.1".to_string()
}

fn default_port() -> u16 {
  8000
}

fn default_api_url() -> String {
  DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
  10
}

impl Default for FormsApiConfig {
  fn default() -> Self {
    Self {
      url:          default_api_url(),
      secret:       None,
      timeout_secs: default_timeout_secs(),
    }
  }
}

impl FormsApiConfig {
  pub fn client_config(&self) -> ClientConfig {
    let config = ClientConfig::new(self.url.clone()).timeout(Duration::from_secs(self.timeout_secs));
    match &self.secret {
      Some(secret) => config.secret(secret.clone()),
      None => config,
    }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
///
/// The client held here is unbound; handlers bind it per request.
#[derive(Clone)]
pub struct AppState {
  pub client: FormsClient,
  pub config: Arc<ServerConfig>,
  pub auth:   Arc<AuthConfig>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the web front end.
pub fn router(state: AppState) -> Router {
  Router::new()
    // Public
    .route("/",                           get(public::home))
    .route("/demo",                       get(public::demo))
    // Signed in
    .route("/dashboard",                  get(dashboard::show))
    // Forms
    .route("/forms",                      get(forms::index).post(forms::store))
    .route("/forms/{id}",                 get(public::fill).put(forms::update).delete(forms::destroy))
    .route("/forms/{id}/edit",            get(forms::edit))
    .route("/forms/{id}/preview",         get(forms::preview))
    .route("/forms/{id}/embed",           get(forms::embed))
    // Submissions
    .route("/forms/{id}/submissions",     get(submissions::index))
    .route("/forms/{id}/submissions/{sid}", get(submissions::show))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
