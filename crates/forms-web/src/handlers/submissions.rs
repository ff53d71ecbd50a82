//! Submission pages, scoped to one form.

use axum::extract::Path;
use forms_core::NormalizedError;
use serde_json::json;

use super::Api;
use crate::{error::Error, page::Page};

/// `GET /forms/:id/submissions`
pub async fn index(Api(api): Api, Path(id): Path<String>) -> Result<Page, Error> {
  let form = api.get_form(&id).await?.ok_or(NormalizedError::NotFound)?;
  let submissions = api.list_submissions(&id).await?;
  Ok(Page::new(
    "Forms/Submissions",
    json!({ "form": form, "submissions": submissions }),
  ))
}

/// `GET /forms/:id/submissions/:sid`
pub async fn show(
  Api(api): Api,
  Path((id, sid)): Path<(String, String)>,
) -> Result<Page, Error> {
  let form = api.get_form(&id).await?.ok_or(NormalizedError::NotFound)?;
  let submission = api
    .get_submission(&id, &sid)
    .await?
    .ok_or(NormalizedError::NotFound)?;
  Ok(Page::new(
    "Forms/SubmissionShow",
    json!({ "form": form, "submission": submission }),
  ))
}
