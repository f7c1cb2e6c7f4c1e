//! Object keys scoped to a folder prefix.
//!
//! Key format: `{folder}{filename}` where `folder` ends with `/` (for example
//! `uploads/clip.mp4`). The filename is URL-decoded once more before it is
//! appended, so clients that double-encode names get the literal key they
//! intended. Keys never escape their folder and are never normalized by the
//! store: `.`/`..` and empty segments (leading, trailing or doubled `/`),
//! backslashes and control characters are rejected.

use crate::error::AppError;
use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// A storage key made of a folder prefix and a validated filename.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Build a key from a folder prefix and a (possibly percent-encoded) filename.
    pub fn new(folder: &str, raw_filename: &str) -> Result<Self, AppError> {
        let filename = urlencoding::decode(raw_filename).map_err(|_| {
            AppError::Validation("Filename is not valid UTF-8 after decoding".to_string())
        })?;

        validate_filename(&filename)?;

        Ok(ObjectKey(format!("{}{}", folder, filename)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn validate_filename(filename: &str) -> Result<(), AppError> {
    if filename.trim().is_empty() {
        return Err(AppError::Validation(
            "Filename must not be empty".to_string(),
        ));
    }

    if filename.starts_with('/') {
        return Err(AppError::Validation(
            "Filename must not start with '/'".to_string(),
        ));
    }

    if filename.split('/').any(str::is_empty) {
        return Err(AppError::Validation(
            "Filename must not contain empty path segments".to_string(),
        ));
    }

    if filename.contains('\\') || filename.chars().any(char::is_control) {
        return Err(AppError::Validation(
            "Filename contains invalid characters".to_string(),
        ));
    }

    if filename
        .split('/')
        .any(|segment| segment == ".." || segment == ".")
    {
        return Err(AppError::Validation(
            "Filename must not contain '.' or '..' path segments".to_string(),
        ));
    }

    Ok(())
}

impl AsRef<str> for ObjectKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for ObjectKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}
