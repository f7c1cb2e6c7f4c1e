//! HTTP error response conversion
//!
//! Handlers return `Result<impl IntoResponse, HttpAppError>`. Domain errors from
//! the core, storage and function crates convert into `HttpAppError` so every
//! failure renders with the same status mapping, body shape and logging.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Serialize};
use videocloud_core::{AppError, ErrorMetadata, LogLevel};
use videocloud_functions::InvocationError;
use videocloud_storage::StorageError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable description, safe to show to end users
    pub detail: String,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Whether this error is recoverable (can be retried)
    pub recoverable: bool,
    /// Suggested action for the client (e.g., "Retry after a short delay")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Error chain, only outside production and only for non-sensitive errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
}

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from videocloud-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::from(err))
    }
}

/// Body deserialization failures (missing `tasks`, wrong types, no JSON content type) are client errors.
impl From<JsonRejection> for HttpAppError {
    fn from(rejection: JsonRejection) -> Self {
        HttpAppError(AppError::Validation(format!(
            "Invalid request body: {}",
            rejection.body_text()
        )))
    }
}

impl From<QueryRejection> for HttpAppError {
    fn from(rejection: QueryRejection) -> Self {
        HttpAppError(AppError::Validation(format!(
            "Invalid query string: {}",
            rejection.body_text()
        )))
    }
}

/// JSON body extractor that renders rejections as 422 in our ErrorResponse format.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(inner) = Json::<T>::from_request(req, state)
            .await
            .map_err(HttpAppError::from)?;
        Ok(ValidatedJson(inner))
    }
}

/// Query string extractor that renders rejections as 422 in our ErrorResponse format.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(inner) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(HttpAppError::from)?;
        Ok(ValidatedQuery(inner))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Request rejected");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Request failed");
        }
        LogLevel::Error => {
            tracing::error!(error = %error.detailed_message(), error_type = error_type, "Request failed");
        }
    }
}

fn is_production_env() -> bool {
    std::env::var("ENVIRONMENT")
        .or_else(|_| std::env::var("APP_ENV"))
        .map(|env| env.to_lowercase() == "production" || env.to_lowercase() == "prod")
        .unwrap_or(false)
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let show_details = !is_production_env() && !app_error.is_sensitive();

        let body = ErrorResponse {
            detail: app_error.client_message(),
            code: app_error.error_code().to_string(),
            recoverable: app_error.is_recoverable(),
            suggested_action: app_error.suggested_action().map(String::from),
            error_type: show_details.then(|| app_error.error_type().to_string()),
            cause: show_details.then(|| app_error.detailed_message()),
        };

        (status, Json(body)).into_response()
    }
}

// Convert collaborator errors to HttpAppError (avoids orphan rule: we impl for local HttpAppError)

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        let app = match err {
            StorageError::InvalidKey(msg) => AppError::Validation(msg),
            StorageError::SigningFailed { .. } => AppError::Storage(err.to_string()),
            StorageError::BackendError(msg) => AppError::Storage(msg),
            StorageError::ConfigError(msg) => AppError::Internal(msg),
        };
        HttpAppError(app)
    }
}

impl From<InvocationError> for HttpAppError {
    fn from(err: InvocationError) -> Self {
        let app = match err {
            InvocationError::Failed { .. } | InvocationError::TimedOut { .. } => {
                AppError::Invocation(err.to_string())
            }
            InvocationError::ConfigError(msg) => AppError::Internal(msg),
        };
        HttpAppError(app)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use videocloud_core::PresignOperation;

    #[test]
    fn test_from_storage_error_invalid_key() {
        let HttpAppError(app_err) = StorageError::InvalidKey("empty segment".to_string()).into();
        match app_err {
            AppError::Validation(msg) => assert_eq!(msg, "empty segment"),
            other => panic!("Expected Validation variant, got {other:?}"),
        }
    }

    #[test]
    fn test_from_storage_error_signing_failed() {
        let storage_err = StorageError::SigningFailed {
            operation: PresignOperation::Put,
            key: "uploads/clip.mp4".to_string(),
            message: "no credentials".to_string(),
        };
        let HttpAppError(app_err) = storage_err.into();
        match app_err {
            AppError::Storage(msg) => {
                assert!(msg.contains("PUT"));
                assert!(msg.contains("uploads/clip.mp4"));
            }
            other => panic!("Expected Storage variant, got {other:?}"),
        }
    }

    #[test]
    fn test_from_invocation_timeout() {
        let err = InvocationError::TimedOut {
            function: "videocloud-processing".to_string(),
        };
        let HttpAppError(app_err) = err.into();
        assert_eq!(app_err.http_status_code(), 502);
        assert!(app_err.to_string().contains("completion unconfirmed"));
    }

    #[tokio::test]
    async fn test_sensitive_error_body_hides_backend_text() {
        let response =
            HttpAppError(AppError::Storage("SignatureDoesNotMatch".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["detail"], "Failed to access storage");
        assert_eq!(body["code"], "STORAGE_ERROR");
        assert!(body.get("cause").is_none());
        assert!(!String::from_utf8_lossy(&bytes).contains("SignatureDoesNotMatch"));
    }

    #[test]
    fn test_error_response_shape() {
        let response = ErrorResponse {
            detail: "File not found".to_string(),
            code: "NOT_FOUND".to_string(),
            recoverable: false,
            suggested_action: None,
            error_type: None,
            cause: None,
        };
        let json = serde_json::to_value(&response).expect("serialize");
        assert_eq!(json["detail"], "File not found");
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["recoverable"], false);
        assert!(json.get("suggested_action").is_none());
        assert!(json.get("cause").is_none());
    }
}
