//! Share-grant model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use todohub_core::types::{DbId, Timestamp};

/// A share-grant row from the `todo_shares` table: read-only visibility of
/// one user's todo for another user.
#[derive(Debug, Clone, FromRow)]
pub struct TodoShare {
    pub id: DbId,
    pub todo_id: DbId,
    pub user_id: DbId,
    pub created_at: Timestamp,
}

/// Share representation for API responses (camelCase wire format).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareResponse {
    pub id: DbId,
    pub todo_id: DbId,
    pub user_id: DbId,
}

impl From<TodoShare> for ShareResponse {
    fn from(share: TodoShare) -> Self {
        Self {
            id: share.id,
            todo_id: share.todo_id,
            user_id: share.user_id,
        }
    }
}
