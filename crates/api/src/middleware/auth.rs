//! Bearer-token authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use todohub_core::error::CoreError;
use todohub_core::types::DbId;
use todohub_db::repositories::UserRepo;

use crate::auth::token::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a bearer token in the `Authorization`
/// header.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
///
/// The identity is resolved once at the boundary and is read-only for the
/// rest of the request.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id.
    pub user_id: DbId,
    /// The user's name.
    pub name: String,
}

/// Extract the token from an `Authorization` header value.
///
/// The only accepted shape is the exact two-token form `Bearer <value>`;
/// anything else is a 400, before any token lookup happens.
fn parse_bearer(header: &str) -> Result<&str, AppError> {
    let mut parts = header.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(value), None) if !value.is_empty() => Ok(value),
        _ => Err(AppError::Core(CoreError::Validation(
            "Invalid Authorization format. Expected: Bearer <token>".into(),
        ))),
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Validation(
                    "Missing Authorization header".into(),
                ))
            })?;

        let value = parse_bearer(auth_header)?;

        let user_id = validate_token(&state.pool, value).await?;

        // The token row references the user, but the user may have been
        // deleted since issue; treat that the same as a dead token.
        let user = UserRepo::find_by_id(&state.pool, user_id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
            })?;

        Ok(AuthUser {
            user_id: user.id,
            name: user.name,
        })
    }
}
