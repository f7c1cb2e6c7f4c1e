pub mod download_url;
pub mod health;
pub mod render;
pub mod upload_url;

use serde::Deserialize;
use videocloud_core::AppError;

/// `?filename=` query shared by every file-scoped endpoint.
#[derive(Debug, Deserialize)]
pub struct FilenameQuery {
    pub filename: Option<String>,
}

impl FilenameQuery {
    /// The filename, or a 422 when it is absent or empty.
    pub fn require(self) -> Result<String, AppError> {
        match self.filename {
            Some(name) if !name.is_empty() => Ok(name),
            _ => Err(AppError::Validation(
                "Missing parameter: filename".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_filename() {
        let query = FilenameQuery {
            filename: Some("clip.mp4".to_string()),
        };
        assert_eq!(query.require().unwrap(), "clip.mp4");

        for filename in [None, Some(String::new())] {
            let err = FilenameQuery { filename }.require().unwrap_err();
            assert_eq!(err.to_string(), "Validation error: Missing parameter: filename");
        }
    }
}
