//! Handlers for authentication (login).

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use todohub_core::error::CoreError;
use todohub_db::repositories::UserRepo;

use crate::auth::password::verify_password;
use crate::auth::token::issue_token;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /login` and `POST /users`.
///
/// Fields are optional at the serde level so a missing field is a 400 with a
/// clear message rather than a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub name: Option<String>,
    pub password: Option<String>,
}

impl CredentialsRequest {
    /// Require both fields present and non-empty.
    pub fn into_parts(self) -> Result<(String, String), AppError> {
        match (self.name, self.password) {
            (Some(name), Some(password)) if !name.is_empty() && !password.is_empty() => {
                Ok((name, password))
            }
            _ => Err(AppError::Core(CoreError::Validation(
                "Both name and password are required".into(),
            ))),
        }
    }
}

/// Successful authentication response returned by login and registration.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /login
///
/// Authenticate with name + password. Returns a fresh bearer token and
/// silently invalidates any previous one for this user.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<CredentialsRequest>,
) -> AppResult<Json<TokenResponse>> {
    let (name, password) = input.into_parts()?;

    // One generic 401 for both unknown-user and wrong-password so the
    // endpoint is not a username oracle.
    let user = UserRepo::find_by_name(&state.pool, &name)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid name or password".into()))
        })?;

    // Argon2 verification is CPU-bound; keep it off the async workers.
    let hash = user.password_hash.clone();
    let password_valid = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| AppError::InternalError(format!("Verification task failed: {e}")))?
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid name or password".into(),
        )));
    }

    let token = issue_token(&state.pool, user.id, &state.config.token).await?;

    Ok(Json(TokenResponse { token }))
}
