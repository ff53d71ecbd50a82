//! HTTP Basic-auth extractor resolving the caller identity.

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, request::Parts};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use forms_core::CallerId;

use crate::{AppState, UserConfig, error::Error};

/// One user that may sign in, with the id it is known by upstream.
#[derive(Clone)]
pub struct Credential {
  pub caller_id:     CallerId,
  pub username:      String,
  pub password_hash: String,
}

/// Credentials accepted as valid for this server instance.
#[derive(Clone, Default)]
pub struct AuthConfig {
  pub users: Vec<Credential>,
}

impl AuthConfig {
  /// Build from configuration, rejecting ids that cannot be sent upstream.
  pub fn from_users(users: &[UserConfig]) -> forms_core::Result<Self> {
    let users = users
      .iter()
      .map(|u| -> forms_core::Result<Credential> {
        Ok(Credential {
          caller_id:     CallerId::new(u.id.clone())?,
          username:      u.username.clone(),
          password_hash: u.password_hash.clone(),
        })
      })
      .collect::<forms_core::Result<Vec<_>>>()?;
    Ok(Self { users })
  }
}

/// The authenticated caller of the current request.
pub struct Caller(pub CallerId);

/// Verify credentials directly from headers and return the caller's id.
pub fn verify_auth(headers: &HeaderMap, config: &AuthConfig) -> Result<CallerId, Error> {
  let header_val = headers
    .get(axum::http::header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .ok_or(Error::Unauthorized)?;

  let encoded = header_val
    .strip_prefix("Basic ")
    .ok_or(Error::Unauthorized)?;

  let decoded = B64.decode(encoded).map_err(|_| Error::Unauthorized)?;
  let creds   = std::str::from_utf8(&decoded).map_err(|_| Error::Unauthorized)?;

  let (username, password) = creds.split_once(':').ok_or(Error::Unauthorized)?;

  let user = config
    .users
    .iter()
    .find(|u| u.username == username)
    .ok_or(Error::Unauthorized)?;

  let parsed_hash = PasswordHash::new(&user.password_hash)
    .map_err(|_| Error::Unauthorized)?;

  Argon2::default()
    .verify_password(password.as_bytes(), &parsed_hash)
    .map_err(|_| Error::Unauthorized)?;

  Ok(user.caller_id.clone())
}

impl FromRequestParts<AppState> for Caller {
  type Rejection = Error;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState,
  ) -> Result<Self, Self::Rejection> {
    verify_auth(&parts.headers, &state.auth).map(Caller)
  }
}
