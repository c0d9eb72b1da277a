use std::sync::Arc;

use crate::config::ServerConfig;
use crate::media::MediaStore;
use crate::middleware::throttle::LoginThrottle;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: towertrack_db::DbPool,
    /// Server configuration (JWT settings, upload limits).
    pub config: Arc<ServerConfig>,
    /// Tower photo storage rooted at `config.upload_dir`.
    pub media: Arc<MediaStore>,
    /// Per-IP limiter for the credential endpoints.
    pub login_throttle: Arc<LoginThrottle>,
}

impl AppState {
    /// Build the state for a loaded configuration.
    pub fn new(pool: towertrack_db::DbPool, config: ServerConfig) -> Self {
        let media = Arc::new(MediaStore::new(config.upload_dir.clone()));
        let login_throttle = Arc::new(LoginThrottle::new(config.throttle));
        Self {
            pool,
            config: Arc::new(config),
            media,
            login_throttle,
        }
    }
}
