//! Parsing of 400/422 response bodies into [`FieldErrors`].
//!
//! The forms API has changed its validation envelope over time and every
//! deployed shape must keep working. Shapes are tried in order and the first
//! one yielding at least one field wins:
//!
//! 1. `{"errors": {"title": ["…"]}}`
//! 2. `{"data": {"errors": [{"field": "title", "message": "…"}]}}`
//! 3. `{"data": {"field": "title", "message": "…"}}` or `{"message": "…"}`
//!
//! When nothing matches the result is `{"form": ["Validation failed."]}`.

use forms_core::fields::{DEFAULT_MESSAGE, FORM_FIELD, FieldErrors};
use serde_json::Value;

/// Parse a validation-failure body. Text that is not JSON counts as `{}`.
pub fn parse_validation_errors(body: &str) -> FieldErrors {
  let value = serde_json::from_str(body).unwrap_or(Value::Null);
  field_errors_from_value(&value)
}

/// Parse an already-decoded validation-failure body.
pub fn field_errors_from_value(body: &Value) -> FieldErrors {
  if let Some(errors) = errors_object(body)
    && !errors.is_empty()
  {
    return errors;
  }

  if let Some(errors) = data_errors_list(body)
    && !errors.is_empty()
  {
    return errors;
  }

  single_field(body)
}

/// Shape 1: `errors` maps each field to one message or a list of them.
fn errors_object(body: &Value) -> Option<FieldErrors> {
  let mut out = FieldErrors::new();
  match body.get("errors")? {
    Value::Object(map) => {
      for (field, messages) in map {
        out.insert(field.clone(), message_list(messages));
      }
    }
    Value::Array(items) => {
      for (index, messages) in items.iter().enumerate() {
        out.insert(index.to_string(), message_list(messages));
      }
    }
    _ => return None,
  }
  Some(out)
}

/// Shape 2: `data.errors` is a list of `{field, message}` entries.
fn data_errors_list(body: &Value) -> Option<FieldErrors> {
  let items: Vec<&Value> = match body.get("data")?.get("errors")? {
    Value::Array(items) => items.iter().collect(),
    Value::Object(map) => map.values().collect(),
    _ => return None,
  };

  let mut out = FieldErrors::new();
  for item in items {
    match item {
      Value::String(message) => out.push(FORM_FIELD, message.clone()),
      _ => {
        let field = item
          .get("field")
          .filter(|v| !v.is_null())
          .map(coerce)
          .unwrap_or_else(|| FORM_FIELD.to_string());
        let message = item
          .get("message")
          .filter(|v| !v.is_null())
          .map(coerce)
          .unwrap_or_else(|| DEFAULT_MESSAGE.to_string());
        out.push(field, message);
      }
    }
  }
  Some(out)
}

/// Shape 3 and the final fallback.
fn single_field(body: &Value) -> FieldErrors {
  let data = body.get("data");
  let field = data.and_then(|d| d.get("field"));
  let message = data
    .and_then(|d| d.get("message"))
    .filter(|v| !v.is_null())
    .or_else(|| body.get("message").filter(|v| !v.is_null()));

  match (field, message) {
    (Some(Value::String(field)), Some(Value::String(message))) => {
      FieldErrors::single(field.clone(), message.clone())
    }
    (_, Some(Value::String(message))) => FieldErrors::single(FORM_FIELD, message.clone()),
    _ => FieldErrors::single(FORM_FIELD, DEFAULT_MESSAGE),
  }
}

fn message_list(value: &Value) -> Vec<String> {
  match value {
    Value::Array(items) => items.iter().map(coerce).collect(),
    other => vec![coerce(other)],
  }
}

fn coerce(value: &Value) -> String {
  match value {
    Value::String(s) => s.clone(),
    Value::Null => String::new(),
    other => other.to_string(),
  }
}
