//! Field-level validation messages.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

/// Pseudo-field used for messages that do not belong to a named input.
pub const FORM_FIELD: &str = "form";

/// Message used when a validation failure carries no usable detail.
pub const DEFAULT_MESSAGE: &str = "Validation failed.";

/// A mapping from field name to its messages.
///
/// Keys are unique; messages keep the order in which they were pushed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
  pub fn new() -> Self {
    Self::default()
  }

  /// A mapping holding exactly one message for one field.
  pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
    let mut errors = Self::new();
    errors.push(field, message);
    errors
  }

  /// Append `message` to the messages already recorded for `field`.
  pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
    self.0.entry(field.into()).or_default().push(message.into());
  }

  /// Set the messages recorded for `field`, replacing any already present.
  pub fn insert(&mut self, field: impl Into<String>, messages: Vec<String>) {
    self.0.insert(field.into(), messages);
  }

  pub fn get(&self, field: &str) -> Option<&[String]> {
    self.0.get(field).map(Vec::as_slice)
  }

  /// Number of fields with at least one recorded entry.
  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn fields(&self) -> impl Iterator<Item = &str> {
    self.0.keys().map(String::as_str)
  }
}

impl fmt::Display for FieldErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut first = true;
    for (field, messages) in &self.0 {
      if !first {
        f.write_str("; ")?;
      }
      first = false;
      write!(f, "{field}: {}", messages.join(", "))?;
    }
    Ok(())
  }
}
