//! Todo CRUD and attachment handlers.
//!
//! Thin HTTP adapters: extract the owner identity, parse the body, call
//! the workflow service, wrap the result under its descriptive key
//! (`items`, `item`, `uploadUrl`).

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;

use todosync_core::todo::{CreateTodoRequest, UpdateTodoRequest};

use crate::{auth::CurrentUser, handlers::ApiError, state::AppState};

/// List the caller's todos (GET /todos).
pub async fn list_todos(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let items = state.service.list_todos(&user_id).await?;
    Ok(Json(json!({ "items": items })))
}

/// Create a new todo (POST /todos).
///
/// An unparsable body is rejected with 400 before any store call.
pub async fn create_todo(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    body: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) =
        body.map_err(|e| ApiError::validation(format!("Failed to parse body: {e}")))?;

    let item = state.service.create_todo(&user_id, request).await?;
    Ok((StatusCode::CREATED, Json(json!({ "item": item }))))
}

/// Update an existing todo (PATCH /todos/{todoId}).
pub async fn update_todo(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    Path(todo_id): Path<String>,
    body: Result<Json<UpdateTodoRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(request) =
        body.map_err(|e| ApiError::validation(format!("Failed to parse body: {e}")))?;

    state
        .service
        .update_todo(&user_id, &todo_id, request)
        .await?;
    Ok(StatusCode::OK)
}

/// Delete a todo (DELETE /todos/{todoId}).
pub async fn delete_todo(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    Path(todo_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.service.delete_todo(&user_id, &todo_id).await?;
    Ok(StatusCode::OK)
}

/// Issue an attachment upload URL (POST /todos/{todoId}/attachment).
pub async fn generate_upload_url(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    Path(todo_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let upload_url = state
        .service
        .generate_upload_url(&user_id, &todo_id)
        .await?;
    Ok((StatusCode::CREATED, Json(json!({ "uploadUrl": upload_url }))))
}
