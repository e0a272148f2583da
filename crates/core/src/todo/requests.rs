use serde::Deserialize;

/// Request payload for creating a new todo.
///
/// `name` is required; a body without it is rejected before any store call.
/// The id, creation timestamp and `done` flag are assigned server-side.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    pub name: String,
    #[serde(default)]
    pub due_date: Option<String>,
}

/// Request payload for updating an existing todo.
///
/// Only these three fields are mutable; `user_id`, `todo_id`, `created_at`
/// and `attachment_url` are never touched by an update.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoRequest {
    pub name: String,
    #[serde(default)]
    pub due_date: Option<String>,
    pub done: bool,
}
