//! Caller identity — the authenticated user a request is made on behalf of.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// An opaque, non-empty user identifier.
///
/// The id travels verbatim in a request header, so only visible ASCII is
/// accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CallerId(String);

impl CallerId {
  pub fn new(id: impl Into<String>) -> Result<Self> {
    let id = id.into();
    if id.is_empty() {
      return Err(Error::EmptyCallerId);
    }
    if !id.bytes().all(|b| b.is_ascii_graphic()) {
      return Err(Error::InvalidCallerId(id));
    }
    Ok(Self(id))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl From<u64> for CallerId {
  fn from(id: u64) -> Self {
    Self(id.to_string())
  }
}

impl TryFrom<String> for CallerId {
  type Error = Error;

  fn try_from(id: String) -> Result<Self> {
    Self::new(id)
  }
}

impl From<CallerId> for String {
  fn from(id: CallerId) -> Self {
    id.0
  }
}

impl fmt::Display for CallerId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}
