//! Application state shared by all handlers.

use crate::services::{AccessSettings, MediaAccessService};
use std::sync::Arc;
use videocloud_core::Config;
use videocloud_functions::FunctionInvoker;
use videocloud_storage::Storage;

#[derive(Clone)]
pub struct AppState {
    pub media_access: MediaAccessService,
}

impl AppState {
    /// Wire the gateway from already-constructed clients.
    ///
    /// Tests pass in-memory fakes here; production passes the clients built by
    /// `create_storage` and `create_invoker`.
    pub fn new(
        config: &Config,
        storage: Arc<dyn Storage>,
        invoker: Arc<dyn FunctionInvoker>,
    ) -> Self {
        let media_access =
            MediaAccessService::new(storage, invoker, AccessSettings::from_config(config));
        Self { media_access }
    }
}
