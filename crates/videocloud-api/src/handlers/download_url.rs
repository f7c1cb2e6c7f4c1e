use crate::error::{HttpAppError, ValidatedQuery};
use crate::handlers::FilenameQuery;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;
use videocloud_core::DataResponse;

/// Issue a presigned GET URL for a processed video, or 404 when it does not exist yet.
#[tracing::instrument(skip(state), fields(operation = "download_url"))]
pub async fn download_url(
    State(state): State<Arc<AppState>>,
    ValidatedQuery(query): ValidatedQuery<FilenameQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let filename = query.require()?;
    let url = state.media_access.issue_download_url(&filename).await?;
    Ok(Json(DataResponse::new(url)))
}
