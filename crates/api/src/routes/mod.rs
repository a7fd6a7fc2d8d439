pub mod auth;
pub mod health;
pub mod todos;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree (mounted at the server root).
///
/// Route hierarchy:
///
/// ```text
/// /login                  login (public)
///
/// /users                  list (public), register + auto-login (public)
///
/// /todos                  list, create (bearer)
/// /todos/{id}             get, patch, delete (bearer)
/// /todos/{id}/share       share, unshare (bearer, owner only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(users::router())
        .merge(todos::router())
}
