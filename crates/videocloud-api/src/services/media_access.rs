//! Gateway operations: presigned upload/download URLs and processing requests.
//!
//! The service owns no network state of its own. Storage and the processing
//! function are reached through the injected [`Storage`] and
//! [`FunctionInvoker`] clients.

use crate::error::HttpAppError;
use std::sync::Arc;
use std::time::Duration;
use videocloud_core::{
    AppError, Config, InvocationResult, ObjectKey, PresignOperation, ProcessingRequest, TaskType,
};
use videocloud_functions::FunctionInvoker;
use videocloud_storage::Storage;

/// Folder prefixes, URL lifetimes and the processing function name.
#[derive(Debug, Clone)]
pub struct AccessSettings {
    pub upload_folder: String,
    pub download_folder: String,
    pub upload_ttl: Duration,
    pub download_ttl: Duration,
    pub function_name: String,
}

impl AccessSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            upload_folder: config.upload_folder.clone(),
            download_folder: config.download_folder.clone(),
            upload_ttl: config.upload_url_ttl(),
            download_ttl: config.download_url_ttl(),
            function_name: config.processing_function_name.clone(),
        }
    }
}

#[derive(Clone)]
pub struct MediaAccessService {
    storage: Arc<dyn Storage>,
    invoker: Arc<dyn FunctionInvoker>,
    settings: AccessSettings,
}

impl MediaAccessService {
    pub fn new(
        storage: Arc<dyn Storage>,
        invoker: Arc<dyn FunctionInvoker>,
        settings: AccessSettings,
    ) -> Self {
        Self {
            storage,
            invoker,
            settings,
        }
    }

    /// Presigned PUT URL for `{upload_folder}{filename}`.
    pub async fn issue_upload_url(&self, filename: &str) -> Result<String, HttpAppError> {
        let key = ObjectKey::new(&self.settings.upload_folder, filename)?;

        let url = self
            .storage
            .presigned_url(PresignOperation::Put, key.as_str(), self.settings.upload_ttl)
            .await?;

        Ok(url)
    }

    /// Presigned GET URL for `{download_folder}{filename}`.
    ///
    /// The object must exist; a missing object is reported as NotFound and no
    /// URL is signed.
    pub async fn issue_download_url(&self, filename: &str) -> Result<String, HttpAppError> {
        let key = ObjectKey::new(&self.settings.download_folder, filename)?;

        if !self.storage.exists(key.as_str()).await? {
            tracing::debug!(
                bucket = %self.storage.bucket(),
                key = %key,
                "Requested object does not exist"
            );
            return Err(AppError::NotFound("File not found".to_string()).into());
        }

        let url = self
            .storage
            .presigned_url(
                PresignOperation::Get,
                key.as_str(),
                self.settings.download_ttl,
            )
            .await?;

        Ok(url)
    }

    /// Validate the task list and invoke the processing function once, waiting
    /// for its result.
    ///
    /// Task validation happens before anything leaves the process: an unknown
    /// task fails the whole request without an invocation.
    pub async fn request_processing(
        &self,
        filename: &str,
        tasks: &[String],
    ) -> Result<InvocationResult, HttpAppError> {
        let tasks = TaskType::parse_all(tasks)?;
        let request = ProcessingRequest::new(filename, tasks)?;
        let payload = request.to_payload()?;

        tracing::debug!(
            function = %self.settings.function_name,
            filename = %request.filename,
            tasks = ?request.tasks,
            "Invoking processing function"
        );

        let result = self
            .invoker
            .invoke_sync(&self.settings.function_name, payload)
            .await?;

        Ok(result)
    }
}
