//! AWS Lambda invoker

use crate::traits::{FunctionInvoker, InvocationError, InvocationOutcome};
use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_config::timeout::TimeoutConfig;
use aws_config::BehaviorVersion;
use aws_sdk_lambda::config::Credentials;
use aws_sdk_lambda::error::{DisplayErrorContext, SdkError};
use aws_sdk_lambda::primitives::Blob;
use aws_sdk_lambda::types::{InvocationType, LogType};
use aws_sdk_lambda::Client as LambdaClient;
use base64::Engine;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;
use videocloud_core::config::AwsCredentials;
use videocloud_core::InvocationResult;

/// Lambda-backed [`FunctionInvoker`].
#[derive(Clone)]
pub struct LambdaInvoker {
    client: LambdaClient,
}

impl Debug for LambdaInvoker {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("LambdaInvoker").finish()
    }
}

impl LambdaInvoker {
    /// Create a Lambda client for the given region.
    ///
    /// Transient failures are retried by the SDK in standard mode up to
    /// `max_attempts`; `timeout` bounds the whole operation including retries.
    pub async fn new(
        region: &str,
        credentials: Option<&AwsCredentials>,
        max_attempts: u32,
        timeout: Duration,
    ) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_config::Region::new(region.to_string()))
            .retry_config(RetryConfig::standard().with_max_attempts(max_attempts))
            .timeout_config(TimeoutConfig::builder().operation_timeout(timeout).build());

        if let Some(creds) = credentials {
            loader = loader.credentials_provider(Credentials::new(
                creds.access_key_id.clone(),
                creds.secret_access_key.clone(),
                None,
                None,
                "videocloud-config",
            ));
        }

        let config = loader.load().await;

        Self {
            client: LambdaClient::new(&config),
        }
    }
}

#[async_trait]
impl FunctionInvoker for LambdaInvoker {
    async fn invoke_sync(
        &self,
        function_name: &str,
        payload: Vec<u8>,
    ) -> InvocationOutcome<InvocationResult> {
        let start = std::time::Instant::now();
        let payload_bytes = payload.len();

        let response = self
            .client
            .invoke()
            .function_name(function_name)
            .invocation_type(InvocationType::RequestResponse)
            .log_type(LogType::Tail)
            .payload(Blob::new(payload))
            .send()
            .await;

        let output = match response {
            Ok(output) => output,
            Err(SdkError::TimeoutError(_)) => {
                tracing::error!(
                    function = %function_name,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Lambda invocation timed out; remote execution may still complete"
                );
                return Err(InvocationError::TimedOut {
                    function: function_name.to_string(),
                });
            }
            Err(e) => {
                let message = DisplayErrorContext(&e).to_string();
                tracing::error!(
                    error = %message,
                    function = %function_name,
                    payload_bytes,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Lambda invocation failed"
                );
                return Err(InvocationError::Failed {
                    function: function_name.to_string(),
                    message,
                });
            }
        };

        let result = build_result(
            output.status_code(),
            output.function_error(),
            output.executed_version(),
            output.log_result(),
            output.payload().map(|b| b.as_ref()).unwrap_or_default(),
        );

        if let Some(ref function_error) = result.function_error {
            tracing::warn!(
                function = %function_name,
                function_error = %function_error,
                status_code = result.status_code,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Lambda function reported an error"
            );
        } else {
            tracing::info!(
                function = %function_name,
                status_code = result.status_code,
                executed_version = ?result.executed_version,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Lambda invocation completed"
            );
        }

        Ok(result)
    }
}

/// Assemble an [`InvocationResult`] from the raw response fields.
///
/// The log tail arrives base64 encoded; an undecodable tail is passed through as-is.
fn build_result(
    status_code: i32,
    function_error: Option<&str>,
    executed_version: Option<&str>,
    log_result: Option<&str>,
    payload: &[u8],
) -> InvocationResult {
    let log_result = log_result.map(|encoded| {
        base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .unwrap_or_else(|_| encoded.to_string())
    });

    InvocationResult {
        status_code,
        function_error: function_error.map(String::from),
        executed_version: executed_version.map(String::from),
        log_result,
        payload: InvocationResult::decode_payload(payload),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_result_decodes_log_tail() {
        let encoded = base64::engine::general_purpose::STANDARD.encode("START RequestId: 1\nEND");
        let result = build_result(
            200,
            None,
            Some("$LATEST"),
            Some(&encoded),
            br#"{"rendered":"clip.mp4"}"#,
        );
        assert_eq!(result.status_code, 200);
        assert_eq!(result.log_result.as_deref(), Some("START RequestId: 1\nEND"));
        assert_eq!(result.payload, json!({"rendered": "clip.mp4"}));
        assert_eq!(result.executed_version.as_deref(), Some("$LATEST"));
    }

    #[test]
    fn test_build_result_passes_through_function_error() {
        let result = build_result(
            200,
            Some("Unhandled"),
            None,
            None,
            br#"{"errorMessage":"boom","errorType":"RuntimeError"}"#,
        );
        assert!(result.is_function_error());
        assert_eq!(result.function_error.as_deref(), Some("Unhandled"));
        assert_eq!(result.payload["errorMessage"], "boom");
    }

    #[test]
    fn test_build_result_keeps_undecodable_log() {
        let result = build_result(200, None, None, Some("not base64!"), b"");
        assert_eq!(result.log_result.as_deref(), Some("not base64!"));
        assert_eq!(result.payload, serde_json::Value::Null);
    }
}
