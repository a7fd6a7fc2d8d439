//! Bearer-token model.

use sqlx::FromRow;
use todohub_core::types::{DbId, Timestamp};

/// An auth token row from the `auth_tokens` table.
///
/// At most one row exists per user (`uq_auth_tokens_user_id`); a new login
/// overwrites it. The token value itself must never be logged.
#[derive(Debug, Clone, FromRow)]
pub struct AuthToken {
    pub id: DbId,
    pub user_id: DbId,
    pub value: String,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
}
