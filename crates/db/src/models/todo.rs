//! Todo entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use todohub_core::types::{DbId, Timestamp};

/// Full todo row from the `todos` table.
#[derive(Debug, Clone, FromRow)]
pub struct Todo {
    pub id: DbId,
    pub title: String,
    pub text: String,
    pub owner_id: DbId,
    pub is_done: bool,
    pub created_at: Timestamp,
}

/// Todo representation for API responses (camelCase wire format).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoResponse {
    pub id: DbId,
    pub title: String,
    pub text: String,
    pub owner_id: DbId,
    pub is_done: bool,
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            text: todo.text,
            owner_id: todo.owner_id,
            is_done: todo.is_done,
        }
    }
}

/// DTO for creating a new todo.
#[derive(Debug)]
pub struct CreateTodo {
    pub title: String,
    pub text: String,
    pub owner_id: DbId,
    pub is_done: bool,
}

/// DTO for partially updating a todo. Only non-`None` fields are applied,
/// so an update with every field absent leaves the row unchanged.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoUpdate {
    pub title: Option<String>,
    pub text: Option<String>,
    pub is_done: Option<bool>,
}
