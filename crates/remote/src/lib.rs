//! HTTP adapter for the backend project API.

pub mod status_sync;

pub use status_sync::{API_URL_ENV, StatusSyncClient, SyncError};
