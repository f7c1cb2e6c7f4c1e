use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// HTTP operation a presigned URL is valid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PresignOperation {
    /// Direct upload of a new object.
    Put,
    /// Direct download of an existing object.
    Get,
}

impl PresignOperation {
    /// Name of the S3 API action the URL authorizes, used in logs.
    pub fn action(&self) -> &'static str {
        match self {
            PresignOperation::Put => "put_object",
            PresignOperation::Get => "get_object",
        }
    }
}

impl Display for PresignOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            PresignOperation::Put => write!(f, "PUT"),
            PresignOperation::Get => write!(f, "GET"),
        }
    }
}
