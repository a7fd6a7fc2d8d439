//! Handlers for the `/users` resource (registration, listing).

use axum::extract::State;
use axum::Json;
use todohub_db::models::user::{CreateUser, UserResponse};
use todohub_db::repositories::UserRepo;

use crate::auth::password::hash_password;
use crate::auth::token::issue_token;
use crate::error::{AppError, AppResult};
use crate::handlers::auth::{CredentialsRequest, TokenResponse};
use crate::state::AppState;

/// POST /users
///
/// Register a new user and log them in immediately. A duplicate name is a
/// 409 via the `uq_users_name` constraint classification.
pub async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<CredentialsRequest>,
) -> AppResult<Json<TokenResponse>> {
    let (name, password) = input.into_parts()?;

    // Argon2 hashing is CPU-bound; keep it off the async workers. The
    // plaintext moves into the closure and is dropped with it.
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::InternalError(format!("Hashing task failed: {e}")))?
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            name,
            password_hash,
        },
    )
    .await?;

    let token = issue_token(&state.pool, user.id, &state.config.token).await?;

    Ok(Json(TokenResponse { token }))
}

/// GET /users
///
/// List all users as `{id, name}` pairs. Public, like registration.
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
