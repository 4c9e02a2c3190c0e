use std::sync::Arc;

use omoide_storage::ObjectStorage;

use crate::config::ServerConfig;
use crate::jobs::registry::JobRegistry;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already
/// `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: omoide_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Active object-storage driver (local filesystem or S3).
    pub storage: Arc<dyn ObjectStorage>,
    /// In-process slideshow job registry (constructed once per process and
    /// injected here; no module-level globals).
    pub jobs: Arc<JobRegistry>,
}
