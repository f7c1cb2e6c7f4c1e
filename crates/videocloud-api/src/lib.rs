//! VideoCloud API Library
//!
//! HTTP gateway that hands out presigned upload/download URLs for video objects
//! and triggers synchronous processing of uploaded videos.

mod handlers;
mod telemetry;

pub mod error;
pub mod services;
pub mod setup;
pub mod state;

pub use error::{ErrorResponse, HttpAppError};
pub use services::MediaAccessService;
pub use state::AppState;
