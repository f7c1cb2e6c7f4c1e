use async_trait::async_trait;
use thiserror::Error;
use videocloud_core::InvocationResult;

/// Invocation failures. A function that ran and raised is not an error here;
/// it is reported through [`InvocationResult::function_error`].
#[derive(Debug, Error)]
pub enum InvocationError {
    #[error("Failed to invoke {function}: {message}")]
    Failed { function: String, message: String },

    /// The client gave up waiting. The function may still complete remotely.
    #[error("Invocation of {function} timed out; completion unconfirmed")]
    TimedOut { function: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for invocation operations
pub type InvocationOutcome<T> = Result<T, InvocationError>;

/// Invokes a named remote function and waits for its response.
#[async_trait]
pub trait FunctionInvoker: Send + Sync {
    /// Invoke `function_name` with a JSON `payload` in request/response mode,
    /// capturing the tail of the execution log.
    async fn invoke_sync(
        &self,
        function_name: &str,
        payload: Vec<u8>,
    ) -> InvocationOutcome<InvocationResult>;
}
