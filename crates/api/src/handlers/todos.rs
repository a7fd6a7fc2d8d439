//! Handlers for the `/todos` resource.
//!
//! Every operation resolves the todo first (404 if absent), then consults
//! the authorization rules in `todohub_core::access` with the identity from
//! [`AuthUser`], then touches the store. Authorization is evaluated fresh on
//! every request.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use todohub_core::access;
use todohub_core::error::CoreError;
use todohub_core::types::DbId;
use todohub_db::models::todo::{CreateTodo, Todo, TodoResponse, TodoUpdate};
use todohub_db::repositories::{ShareRepo, TodoRepo};
use todohub_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /todos`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    pub title: Option<String>,
    pub text: Option<String>,
    #[serde(default)]
    pub is_done: bool,
}

/// Query parameters for `GET /todos`.
#[derive(Debug, Default, Deserialize)]
pub struct ListTodosQuery {
    /// Presence of the flag is what matters; `?shared` and `?shared=1`
    /// both include shared todos.
    pub shared: Option<String>,
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Resolve a todo by id or fail with 404.
pub(crate) async fn find_todo(pool: &DbPool, id: DbId) -> Result<Todo, AppError> {
    TodoRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "todo", id }))
}

/// Load the share grants needed for a read decision.
///
/// The owner never needs the grant list, so the query is skipped for them.
async fn shared_user_ids(
    pool: &DbPool,
    todo: &Todo,
    user_id: DbId,
) -> Result<Vec<DbId>, AppError> {
    if todo.owner_id == user_id {
        return Ok(Vec::new());
    }
    Ok(ShareRepo::user_ids_for_todo(pool, todo.id).await?)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /todos
///
/// List the todos the user owns; with the `shared` query flag, also the
/// ones shared with them.
pub async fn list_todos(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ListTodosQuery>,
) -> AppResult<Json<Vec<TodoResponse>>> {
    let todos =
        TodoRepo::list_for_user(&state.pool, user.user_id, query.shared.is_some()).await?;
    Ok(Json(todos.into_iter().map(TodoResponse::from).collect()))
}

/// GET /todos/{id}
///
/// Fetch a single todo. Readable by the owner and by users it is shared
/// with; 403 for everyone else.
pub async fn get_todo(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<TodoResponse>> {
    let todo = find_todo(&state.pool, id).await?;
    let shared_with = shared_user_ids(&state.pool, &todo, user.user_id).await?;
    access::authorize_read(user.user_id, todo.owner_id, &shared_with)?;
    Ok(Json(todo.into()))
}

/// POST /todos
///
/// Create a todo owned by the authenticated user.
pub async fn create_todo(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateTodoRequest>,
) -> AppResult<Json<TodoResponse>> {
    let (Some(title), Some(text)) = (input.title, input.text) else {
        return Err(AppError::Core(CoreError::Validation(
            "Both title and text are required".into(),
        )));
    };

    let todo = TodoRepo::create(
        &state.pool,
        &CreateTodo {
            title,
            text,
            owner_id: user.user_id,
            is_done: input.is_done,
        },
    )
    .await?;

    Ok(Json(todo.into()))
}

/// PATCH /todos/{id}
///
/// Apply a partial update. Owner only; shares never grant write. A body
/// with every field absent is a no-op returning the unchanged todo.
pub async fn update_todo(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<TodoUpdate>,
) -> AppResult<Json<TodoResponse>> {
    let todo = find_todo(&state.pool, id).await?;
    access::authorize_write(user.user_id, todo.owner_id)?;

    // The todo can disappear between the check and the write; report the
    // race as the same 404.
    let updated = TodoRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "todo", id }))?;

    Ok(Json(updated.into()))
}

/// DELETE /todos/{id}
///
/// Delete a todo and return the deleted row. Owner only.
pub async fn delete_todo(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<TodoResponse>> {
    let todo = find_todo(&state.pool, id).await?;
    access::authorize_write(user.user_id, todo.owner_id)?;

    let deleted = TodoRepo::delete(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "todo", id }))?;

    Ok(Json(deleted.into()))
}
