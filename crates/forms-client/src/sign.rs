//! Service-to-service request signing.
//!
//! Every call to the forms API carries the caller id, a UTC timestamp and an
//! HMAC-SHA256 signature over `"{caller_id}:{timestamp}"` keyed by the shared
//! secret. The forms API recomputes the signature and enforces its own
//! freshness window, so the string-to-sign and its hex encoding must match
//! byte for byte.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

pub const USER_ID_HEADER: &str = "X-User-Id";
pub const TIMESTAMP_HEADER: &str = "X-Timestamp";
pub const SIGNATURE_HEADER: &str = "X-Signature";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Source of the signing time.
pub trait Clock: Send + Sync {
  fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> {
    Utc::now()
  }
}

/// The three header values attached to a signed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
  pub user_id:   String,
  pub timestamp: String,
  pub signature: String,
}

impl SignedHeaders {
  /// `(name, value)` pairs in the order they are sent.
  pub fn pairs(&self) -> [(&'static str, &str); 3] {
    [
      (USER_ID_HEADER, self.user_id.as_str()),
      (TIMESTAMP_HEADER, self.timestamp.as_str()),
      (SIGNATURE_HEADER, self.signature.as_str()),
    ]
  }
}

/// Sign a request made by `caller_id` at `now`.
///
/// An empty `secret` is signed as-is.
pub fn sign(caller_id: &str, secret: &str, now: DateTime<Utc>) -> SignedHeaders {
  let timestamp = now.format(TIMESTAMP_FORMAT).to_string();
  let payload = format!("{caller_id}:{timestamp}");

  let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
    .expect("HMAC-SHA256 accepts keys of any length");
  mac.update(payload.as_bytes());
  let signature = hex::encode(mac.finalize().into_bytes());

  SignedHeaders {
    user_id: caller_id.to_string(),
    timestamp,
    signature,
  }
}
