//! VideoCloud Functions Library
//!
//! Synchronous invocation of the remote video-processing function. The
//! [`FunctionInvoker`] trait is the seam the API depends on; [`LambdaInvoker`]
//! is the AWS Lambda implementation.

pub mod factory;
#[cfg(feature = "invoker-lambda")]
pub mod lambda;
pub mod traits;

pub use factory::create_invoker;
#[cfg(feature = "invoker-lambda")]
pub use lambda::LambdaInvoker;
pub use traits::{FunctionInvoker, InvocationError, InvocationOutcome};
pub use videocloud_core::InvocationResult;
