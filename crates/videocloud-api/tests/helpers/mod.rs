//! Test helpers: build AppState and router for integration tests.
//!
//! The router is the production one from `setup::routes`; only the storage and
//! function clients are replaced with in-memory fakes that record every call.

#![allow(dead_code)] // Each test binary uses a different subset

use async_trait::async_trait;
use axum_test::TestServer;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use videocloud_api::setup::routes;
use videocloud_api::state::AppState;
use videocloud_core::{Config, InvocationResult, PresignOperation};
use videocloud_functions::{FunctionInvoker, InvocationError, InvocationOutcome};
use videocloud_storage::{Storage, StorageError, StorageResult};

pub const TEST_BUCKET: &str = "videocloud-s3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageCall {
    Sign {
        operation: PresignOperation,
        key: String,
        expires_in: Duration,
    },
    Head {
        key: String,
    },
}

/// Storage fake holding a set of existing keys.
#[derive(Default)]
pub struct FakeStorage {
    objects: HashSet<String>,
    failing: bool,
    calls: Mutex<Vec<StorageCall>>,
}

impl FakeStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_object(mut self, key: &str) -> Self {
        self.objects.insert(key.to_string());
        self
    }

    /// Every call fails with a backend error.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn calls(&self) -> Vec<StorageCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn sign_calls(&self) -> Vec<StorageCall> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, StorageCall::Sign { .. }))
            .collect()
    }
}

#[async_trait]
impl Storage for FakeStorage {
    async fn presigned_url(
        &self,
        operation: PresignOperation,
        storage_key: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        self.calls.lock().unwrap().push(StorageCall::Sign {
            operation,
            key: storage_key.to_string(),
            expires_in,
        });
        if self.failing {
            return Err(StorageError::SigningFailed {
                operation,
                key: storage_key.to_string(),
                message: "InvalidAccessKeyId".to_string(),
            });
        }
        let encoded = storage_key
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        Ok(format!(
            "https://{}.s3.amazonaws.com/{}?X-Amz-Expires={}&X-Amz-Signature=fake",
            TEST_BUCKET,
            encoded,
            expires_in.as_secs()
        ))
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        self.calls.lock().unwrap().push(StorageCall::Head {
            key: storage_key.to_string(),
        });
        if self.failing {
            return Err(StorageError::BackendError(
                "connection reset by peer".to_string(),
            ));
        }
        Ok(self.objects.contains(storage_key))
    }

    fn bucket(&self) -> &str {
        TEST_BUCKET
    }
}

pub enum FakeOutcome {
    Result(InvocationResult),
    Failed(String),
    TimedOut,
}

/// Invoker fake returning a canned outcome and recording `(function, payload)` pairs.
pub struct FakeInvoker {
    outcome: FakeOutcome,
    calls: Mutex<Vec<(String, serde_json::Value)>>,
}

impl FakeInvoker {
    pub fn returning(payload: serde_json::Value) -> Self {
        Self::with_outcome(FakeOutcome::Result(InvocationResult {
            status_code: 200,
            function_error: None,
            executed_version: Some("$LATEST".to_string()),
            log_result: None,
            payload,
        }))
    }

    pub fn with_outcome(outcome: FakeOutcome) -> Self {
        Self {
            outcome,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, serde_json::Value)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for FakeInvoker {
    fn default() -> Self {
        Self::returning(serde_json::json!({ "status": "done" }))
    }
}

#[async_trait]
impl FunctionInvoker for FakeInvoker {
    async fn invoke_sync(
        &self,
        function_name: &str,
        payload: Vec<u8>,
    ) -> InvocationOutcome<InvocationResult> {
        let payload: serde_json::Value =
            serde_json::from_slice(&payload).expect("invoker payload must be JSON");
        self.calls
            .lock()
            .unwrap()
            .push((function_name.to_string(), payload));

        match &self.outcome {
            FakeOutcome::Result(result) => Ok(result.clone()),
            FakeOutcome::Failed(message) => Err(InvocationError::Failed {
                function: function_name.to_string(),
                message: message.clone(),
            }),
            FakeOutcome::TimedOut => Err(InvocationError::TimedOut {
                function: function_name.to_string(),
            }),
        }
    }
}

/// Test application: server plus handles on the fakes for call assertions.
pub struct TestApp {
    pub server: TestServer,
    pub storage: Arc<FakeStorage>,
    pub invoker: Arc<FakeInvoker>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

pub fn setup_test_app(storage: FakeStorage, invoker: FakeInvoker) -> TestApp {
    let storage = Arc::new(storage);
    let invoker = Arc::new(invoker);
    let server = build_server(Config::default(), storage.clone(), invoker.clone());
    TestApp {
        server,
        storage,
        invoker,
    }
}

pub fn build_server(
    config: Config,
    storage: Arc<dyn Storage>,
    invoker: Arc<dyn FunctionInvoker>,
) -> TestServer {
    let state = Arc::new(AppState::new(&config, storage, invoker));
    let app = routes::setup_routes(&config, state).expect("Failed to setup routes");
    TestServer::new(app.into_make_service()).expect("Failed to create test server")
}
