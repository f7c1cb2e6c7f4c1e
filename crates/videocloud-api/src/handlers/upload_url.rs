use crate::error::{HttpAppError, ValidatedQuery};
use crate::handlers::FilenameQuery;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;
use videocloud_core::DataResponse;

/// Issue a short-lived presigned PUT URL for uploading a video.
#[tracing::instrument(skip(state), fields(operation = "upload_url"))]
pub async fn upload_url(
    State(state): State<Arc<AppState>>,
    ValidatedQuery(query): ValidatedQuery<FilenameQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let filename = query.require()?;
    let url = state.media_access.issue_upload_url(&filename).await?;
    Ok(Json(DataResponse::new(url)))
}
