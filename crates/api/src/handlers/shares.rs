//! Handlers for sharing a todo with another user.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use todohub_core::access;
use todohub_core::error::CoreError;
use todohub_core::types::DbId;
use todohub_db::models::share::ShareResponse;
use todohub_db::repositories::{ShareRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::todos::find_todo;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /todos/{id}/share` and `DELETE /todos/{id}/share`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareRequest {
    pub user_id: Option<DbId>,
}

impl ShareRequest {
    fn target(self) -> Result<DbId, AppError> {
        self.user_id.ok_or_else(|| {
            AppError::Core(CoreError::Validation("userId is required".into()))
        })
    }
}

/// POST /todos/{id}/share
///
/// Grant another user read access to a todo. Owner only; self-share is a
/// 400 and is never persisted.
pub async fn share_todo(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<ShareRequest>,
) -> AppResult<Json<ShareResponse>> {
    let target = input.target()?;
    let todo = find_todo(&state.pool, id).await?;

    access::authorize_share(user.user_id, todo.owner_id, target)?;

    // Catch an unknown target here rather than as a foreign-key failure.
    if UserRepo::find_by_id(&state.pool, target).await?.is_none() {
        return Err(AppError::Core(CoreError::Validation(
            "Target user does not exist".into(),
        )));
    }

    let share = ShareRepo::create(&state.pool, todo.id, target).await?;

    Ok(Json(share.into()))
}

/// DELETE /todos/{id}/share
///
/// Revoke a user's read access to a todo. Owner only; revoking a grant
/// that does not exist is a 404.
pub async fn unshare_todo(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<ShareRequest>,
) -> AppResult<Json<ShareResponse>> {
    let target = input.target()?;
    let todo = find_todo(&state.pool, id).await?;

    access::authorize_unshare(user.user_id, todo.owner_id)?;

    let share = ShareRepo::delete(&state.pool, todo.id, target)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "share",
            id: target,
        }))?;

    Ok(Json(share.into()))
}
