use axum::middleware::from_fn_with_state;
use axum::routing::{post, put};
use axum::Router;

use crate::handlers::auth;
use crate::middleware::throttle::throttle_credentials;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST   /register          -> register
/// POST   /login             -> login (throttled)
/// PUT    /change-password   -> change_password (throttled)
/// ```
pub fn router(state: &AppState) -> Router<AppState> {
    let credentials = Router::new()
        .route("/login", post(auth::login))
        .route("/change-password", put(auth::change_password))
        .route_layer(from_fn_with_state(state.clone(), throttle_credentials));

    Router::new()
        .route("/register", post(auth::register))
        .merge(credentials)
}
