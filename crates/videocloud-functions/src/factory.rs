#[cfg(feature = "invoker-lambda")]
use crate::LambdaInvoker;
use crate::{FunctionInvoker, InvocationOutcome};
use std::sync::Arc;
use videocloud_core::Config;

/// Create the function invoker described by the configuration.
#[cfg(feature = "invoker-lambda")]
pub async fn create_invoker(config: &Config) -> InvocationOutcome<Arc<dyn FunctionInvoker>> {
    let invoker = LambdaInvoker::new(
        &config.aws_region,
        config.aws_credentials.as_ref(),
        config.aws_max_attempts,
        config.invoke_timeout(),
    )
    .await;

    tracing::info!(
        region = %config.aws_region,
        function = %config.processing_function_name,
        max_attempts = config.aws_max_attempts,
        timeout_secs = config.invoke_timeout_secs,
        "Lambda invoker initialized"
    );

    Ok(Arc::new(invoker))
}

#[cfg(not(feature = "invoker-lambda"))]
pub async fn create_invoker(_config: &Config) -> InvocationOutcome<Arc<dyn FunctionInvoker>> {
    Err(crate::InvocationError::ConfigError(
        "Lambda invoker not available (invoker-lambda feature not enabled)".to_string(),
    ))
}
