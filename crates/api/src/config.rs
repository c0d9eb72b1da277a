use std::num::NonZeroU32;
use std::path::PathBuf;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development except
/// the JWT secret. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Directory holding stored tower photos (default: `uploads`).
    pub upload_dir: PathBuf,
    /// Largest accepted request body, photos included (default: 10 MiB).
    pub max_upload_bytes: usize,
    /// Built frontend served with an `index.html` fallback, if set.
    pub frontend_dist: Option<PathBuf>,
    /// Login / change-password throttle.
    pub throttle: ThrottleConfig,
    /// Account created at startup when no user with its email exists.
    pub admin: AdminSeed,
}

/// Per-client-IP quota for credential endpoints.
#[derive(Debug, Clone, Copy)]
pub struct ThrottleConfig {
    pub per_second: NonZeroU32,
    pub burst: NonZeroU32,
}

#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `8080`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `UPLOAD_DIR`           | `uploads`                  |
    /// | `MAX_UPLOAD_BYTES`     | `10485760`                 |
    /// | `FRONTEND_DIST`        | unset                      |
    /// | `LOGIN_RATE_PER_SEC`   | `5`                        |
    /// | `LOGIN_RATE_BURST`     | `1`                        |
    /// | `ADMIN_EMAIL`          | `admin@example.com`        |
    /// | `ADMIN_PASSWORD`       | `password`                 |
    ///
    /// See [`JwtConfig::from_env`] for the JWT variables.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let upload_dir = PathBuf::from(
            std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".into()),
        );

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| "10485760".into())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        let frontend_dist = std::env::var("FRONTEND_DIST")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let throttle = ThrottleConfig {
            per_second: std::env::var("LOGIN_RATE_PER_SEC")
                .unwrap_or_else(|_| "5".into())
                .parse()
                .expect("LOGIN_RATE_PER_SEC must be a positive integer"),
            burst: std::env::var("LOGIN_RATE_BURST")
                .unwrap_or_else(|_| "1".into())
                .parse()
                .expect("LOGIN_RATE_BURST must be a positive integer"),
        };

        let admin = AdminSeed {
            name: "Administrator".into(),
            email: std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@example.com".into()),
            password: std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "password".into()),
        };

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt,
            upload_dir,
            max_upload_bytes,
            frontend_dist,
            throttle,
            admin,
        }
    }
}
