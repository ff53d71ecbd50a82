//! Authenticated form pages.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/forms` | `Forms/Index` |
//! | `POST`   | `/forms` | Creates, then 303 to the edit page |
//! | `GET`    | `/forms/:id/edit` | `Forms/Edit`; 404 if missing |
//! | `GET`    | `/forms/:id/preview` | `Forms/Preview`; 404 if missing |
//! | `GET`    | `/forms/:id/embed` | `Forms/Embed`; 404 if missing |
//! | `PUT`    | `/forms/:id` | Updates, then 303 to the edit page |
//! | `DELETE` | `/forms/:id` | Deletes, then 303 to `/forms` |

use axum::{Json, extract::Path, response::Response};
use forms_core::{FormInput, NormalizedError};
use serde_json::{Value, json};

use super::{Api, form_id};
use crate::{
  error::Error,
  page::{Page, forms_path, redirect_with_success},
};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /forms`
pub async fn index(Api(api): Api) -> Result<Page, Error> {
  let forms = api.list_forms().await?;
  Ok(Page::new("Forms/Index", json!({ "forms": forms })))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /forms` — body: `{"title": "...", ...}`
pub async fn store(Api(api): Api, Json(body): Json<Value>) -> Result<Response, Error> {
  let input = FormInput::from_json(&body).map_err(Error::Invalid)?;
  let form = api.create_form(&input).await?;

  let location = match form_id(&form) {
    Some(id) => forms_path(&[id.as_str(), "edit"]),
    None => forms_path(&[]),
  };
  Ok(redirect_with_success(&location, "Form created successfully."))
}

// ─── Show ─────────────────────────────────────────────────────────────────────

async fn show(api: &Api, id: &str, component: &'static str) -> Result<Page, Error> {
  let form = api
    .0
    .get_form(id)
    .await?
    .ok_or(NormalizedError::NotFound)?;
  Ok(Page::new(component, json!({ "form": form })))
}

/// `GET /forms/:id/edit`
pub async fn edit(api: Api, Path(id): Path<String>) -> Result<Page, Error> {
  show(&api, &id, "Forms/Edit").await
}

/// `GET /forms/:id/preview`
pub async fn preview(api: Api, Path(id): Path<String>) -> Result<Page, Error> {
  show(&api, &id, "Forms/Preview").await
}

/// `GET /forms/:id/embed`
pub async fn embed(api: Api, Path(id): Path<String>) -> Result<Page, Error> {
  show(&api, &id, "Forms/Embed").await
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /forms/:id`
pub async fn update(
  Api(api): Api,
  Path(id): Path<String>,
  Json(body): Json<Value>,
) -> Result<Response, Error> {
  let input = FormInput::from_json(&body).map_err(Error::Invalid)?;
  api.update_form(&id, &input).await?;
  Ok(redirect_with_success(&forms_path(&[id.as_str(), "edit"]), "Form updated successfully."))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /forms/:id`
pub async fn destroy(Api(api): Api, Path(id): Path<String>) -> Result<Response, Error> {
  api.delete_form(&id).await?;
  Ok(redirect_with_success("/forms", "Form deleted successfully."))
}
