//! Route definitions for the `/users` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET  /users    -> list_users
/// POST /users    -> create_user (register + auto-login)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/users", get(users::list_users).post(users::create_user))
}
