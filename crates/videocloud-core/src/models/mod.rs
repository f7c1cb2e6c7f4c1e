//! Domain models for the presigned-access gateway.

pub mod invocation;
pub mod object_key;
pub mod presign;
pub mod processing;
pub mod response;

pub use invocation::InvocationResult;
pub use object_key::ObjectKey;
pub use presign::PresignOperation;
pub use processing::{ProcessingRequest, TaskType};
pub use response::DataResponse;
