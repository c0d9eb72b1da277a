use axum::routing::get;
use axum::Router;

use crate::handlers::blankspot;
use crate::state::AppState;

/// Routes mounted at `/blankspots`.
///
/// ```text
/// GET    /                  -> list
/// POST   /                  -> create
/// GET    /{id}              -> get_by_id
/// PUT    /{id}              -> update
/// DELETE /{id}              -> delete (permanent)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(blankspot::list).post(blankspot::create))
        .route(
            "/{id}",
            get(blankspot::get_by_id)
                .put(blankspot::update)
                .delete(blankspot::delete),
        )
}
