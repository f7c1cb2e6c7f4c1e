use crate::error::{HttpAppError, ValidatedJson, ValidatedQuery};
use crate::handlers::FilenameQuery;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde::Deserialize;
use std::sync::Arc;
use videocloud_core::DataResponse;

#[derive(Debug, Deserialize)]
pub struct RenderBody {
    /// Raw task names; validated against the known task set by the service.
    pub tasks: Vec<String>,
}

/// Run the processing function on an uploaded video and return its result.
///
/// The result is passed through as reported by the function, including
/// function-level errors.
#[tracing::instrument(skip(state, body), fields(operation = "render", tasks = ?body.tasks))]
pub async fn render(
    State(state): State<Arc<AppState>>,
    ValidatedQuery(query): ValidatedQuery<FilenameQuery>,
    ValidatedJson(body): ValidatedJson<RenderBody>,
) -> Result<impl IntoResponse, HttpAppError> {
    let filename = query.require()?;
    let result = state
        .media_access
        .request_processing(&filename, &body.tasks)
        .await?;
    Ok(Json(DataResponse::new(result)))
}
