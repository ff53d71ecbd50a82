//! Inbound form input and its validation.
//!
//! Form payloads returned by the forms API are opaque to this crate; only the
//! fields a user submits to create or update a form are typed here.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::fields::FieldErrors;

/// Publication state of a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormStatus {
  Draft,
  Published,
  Archived,
}

impl FormStatus {
  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "draft" => Some(Self::Draft),
      "published" => Some(Self::Published),
      "archived" => Some(Self::Archived),
      _ => None,
    }
  }
}

/// Validated fields for creating or updating a form.
///
/// Serialized as the JSON body sent to the forms API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormInput {
  pub title:        String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description:  Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub status:       Option<FormStatus>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub cors_origins: Option<String>,
  /// Builder output, usually `{"display": ..., "components": [...]}`.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub schema:       Option<Value>,
}

impl FormInput {
  pub fn new(title: impl Into<String>) -> Self {
    Self {
      title:        title.into(),
      description:  None,
      status:       None,
      cors_origins: None,
      schema:       None,
    }
  }

  /// Validate a submitted JSON object.
  ///
  /// Every rule is checked so the caller gets all field messages at once.
  /// Keys other than the known fields are dropped.
  pub fn from_json(body: &Value) -> Result<Self, FieldErrors> {
    let empty = Map::new();
    let obj = body.as_object().unwrap_or(&empty);
    let mut errors = FieldErrors::new();

    let title = match obj.get("title") {
      Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
      Some(Value::String(_)) | Some(Value::Null) | None => {
        errors.push("title", "The title field is required.");
        None
      }
      Some(_) => {
        errors.push("title", "The title field must be a string.");
        None
      }
    };

    let description = optional_string(obj, "description", &mut errors);
    let cors_origins = optional_string(obj, "cors_origins", &mut errors);

    let status = match optional_string(obj, "status", &mut errors) {
      None => None,
      Some(s) => match FormStatus::parse(&s) {
        Some(status) => Some(status),
        None => {
          errors.push("status", "The selected status is invalid.");
          None
        }
      },
    };

    let schema = match obj.get("schema") {
      None | Some(Value::Null) => None,
      Some(schema @ (Value::Object(_) | Value::Array(_))) => Some(schema.clone()),
      Some(_) => {
        errors.push("schema", "The schema field must be an array.");
        None
      }
    };

    match title {
      Some(title) if errors.is_empty() => Ok(Self {
        title,
        description,
        status,
        cors_origins,
        schema,
      }),
      _ => Err(errors),
    }
  }
}

fn optional_string(
  obj: &Map<String, Value>,
  field: &str,
  errors: &mut FieldErrors,
) -> Option<String> {
  match obj.get(field) {
    None | Some(Value::Null) => None,
    Some(Value::String(s)) => Some(s.clone()),
    Some(_) => {
      errors.push(field, format!("The {} field must be a string.", field.replace('_', " ")));
      None
    }
  }
}
