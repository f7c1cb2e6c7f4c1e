pub mod media_access;

pub use media_access::{AccessSettings, MediaAccessService};
