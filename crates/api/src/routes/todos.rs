//! Route definitions for the `/todos` resource.
//!
//! All endpoints require a bearer token.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{shares, todos};
use crate::state::AppState;

/// Routes mounted at `/todos`.
///
/// ```text
/// GET    /todos              -> list_todos (query flag `shared`)
/// POST   /todos              -> create_todo
/// GET    /todos/{id}         -> get_todo
/// PATCH  /todos/{id}         -> update_todo
/// DELETE /todos/{id}         -> delete_todo
/// POST   /todos/{id}/share   -> share_todo
/// DELETE /todos/{id}/share   -> unshare_todo
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/todos", get(todos::list_todos).post(todos::create_todo))
        .route(
            "/todos/{id}",
            get(todos::get_todo)
                .patch(todos::update_todo)
                .delete(todos::delete_todo),
        )
        .route(
            "/todos/{id}/share",
            post(shares::share_todo).delete(shares::unshare_todo),
        )
}
