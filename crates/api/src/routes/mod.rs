pub mod auth;
pub mod blankspots;
pub mod health;
pub mod providers;
pub mod towers;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   register (public)
/// /auth/login                                      login (public, throttled)
/// /auth/change-password                            change password (auth, throttled)
///
/// /towers                                          list, create
/// /towers/{id}                                     get, update, delete
/// /towers/{id}/ownership                           change ownership (PUT)
/// /towers/{id}/relocate                            relocate (PUT)
/// /towers/{id}/dismantle                           dismantle (PUT)
/// /towers/{id}/history                             event history (GET)
///
/// /providers                                       list, create
/// /providers/{id}                                  get, update, delete
///
/// /blankspots                                      list, create
/// /blankspots/{id}                                 get, update, delete
/// ```
///
/// Reads of towers, providers and blankspots are public. Everything else
/// requires a Bearer token (enforced per handler by `AuthUser`).
pub fn api_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router(state))
        .nest("/towers", towers::router(state.config.max_upload_bytes))
        .nest("/providers", providers::router())
        .nest("/blankspots", blankspots::router())
}
