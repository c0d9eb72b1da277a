use axum::extract::DefaultBodyLimit;
use axum::routing::{get, put};
use axum::Router;

use crate::handlers::tower;
use crate::state::AppState;

/// Routes mounted at `/towers`.
///
/// ```text
/// GET    /                  -> list
/// POST   /                  -> create (multipart)
/// GET    /{id}              -> get_by_id
/// PUT    /{id}              -> update (multipart)
/// DELETE /{id}              -> delete
/// PUT    /{id}/ownership    -> change_ownership
/// PUT    /{id}/relocate     -> relocate
/// PUT    /{id}/dismantle    -> dismantle
/// GET    /{id}/history      -> history
/// ```
///
/// Bodies are capped at `max_body_bytes` so photo uploads stay bounded.
pub fn router(max_body_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/", get(tower::list).post(tower::create))
        .route(
            "/{id}",
            get(tower::get_by_id)
                .put(tower::update)
                .delete(tower::delete),
        )
        .route("/{id}/ownership", put(tower::change_ownership))
        .route("/{id}/relocate", put(tower::relocate))
        .route("/{id}/dismantle", put(tower::dismantle))
        .route("/{id}/history", get(tower::history))
        .layer(DefaultBodyLimit::max(max_body_bytes))
}
