//! Per-IP throttle for login and change-password.
//!
//! One [`LoginThrottle`] is built at startup and shared through `AppState`.
//! Keys are client IPs taken from [`ConnectInfo`]; requests without connection
//! info (e.g. in-process tests) share the unspecified address bucket.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use governor::clock::DefaultClock;
use governor::state::keyed::DefaultKeyedStateStore;
use governor::{Quota, RateLimiter};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use towertrack_core::error::CoreError;

use crate::config::ThrottleConfig;
use crate::error::AppError;
use crate::state::AppState;

type IpRateLimiter = RateLimiter<IpAddr, DefaultKeyedStateStore<IpAddr>, DefaultClock>;

/// How often the janitor drops keys whose quota has fully replenished.
pub const JANITOR_INTERVAL: Duration = Duration::from_secs(60);

pub struct LoginThrottle {
    limiter: IpRateLimiter,
}

impl LoginThrottle {
    pub fn new(config: ThrottleConfig) -> Self {
        let quota = Quota::per_second(config.per_second).allow_burst(config.burst);
        Self {
            limiter: RateLimiter::keyed(quota),
        }
    }

    /// Consume one cell for `ip`, failing once its quota is spent.
    pub fn check(&self, ip: IpAddr) -> Result<(), CoreError> {
        self.limiter.check_key(&ip).map_err(|_| {
            CoreError::RateLimited("Too many attempts, please try again shortly".into())
        })
    }

    /// Forget clients that are back to a full quota.
    pub fn prune(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
    }

    pub fn tracked_clients(&self) -> usize {
        self.limiter.len()
    }

    /// Prune on an interval until `cancel` fires.
    pub fn spawn_janitor(
        self: &Arc<Self>,
        interval: Duration,
        cancel: CancellationToken,
    ) -> JoinHandle<()> {
        let throttle = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                tokio::select! {
                    () = cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        throttle.prune();
                        tracing::debug!(clients = throttle.tracked_clients(), "Pruned login throttle");
                    }
                }
            }
            tracing::debug!("Login throttle janitor stopped");
        })
    }
}

/// `from_fn_with_state` middleware guarding credential endpoints.
pub async fn throttle_credentials(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

    if let Err(err) = state.login_throttle.check(ip) {
        tracing::warn!(%ip, path = %request.uri().path(), "Credential request throttled");
        return Err(err.into());
    }

    Ok(next.run(request).await)
}
