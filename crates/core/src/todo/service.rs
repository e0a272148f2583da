//! The todo workflow service.
//!
//! A thin validation/delegation layer over the storage traits. It adds no
//! storage logic of its own: it assigns the server-side fields at creation
//! and is the only place that composes two storage calls into one logical
//! operation (`generate_upload_url`).

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::storage::{AttachmentStore, Result, TodoRepository};

use super::{CreateTodoRequest, TodoItem, UpdateTodoRequest};

/// Per-operation business functions for the todo backend.
///
/// Holds the repository and attachment-store handles injected at startup,
/// one shared instance per process. Every operation is a single stateless
/// request/response step.
pub struct TodoService {
    repo: Arc<dyn TodoRepository>,
    attachments: Arc<dyn AttachmentStore>,
}

impl TodoService {
    pub fn new(repo: Arc<dyn TodoRepository>, attachments: Arc<dyn AttachmentStore>) -> Self {
        Self { repo, attachments }
    }

    /// Lists all todos owned by `user_id`. No pagination; the caller
    /// receives the full result set.
    pub async fn list_todos(&self, user_id: &str) -> Result<Vec<TodoItem>> {
        tracing::debug!(user_id, "listing todos");
        let todos = self.repo.list_todos_by_owner(user_id).await?;
        tracing::debug!(user_id, count = todos.len(), "listed todos");
        Ok(todos)
    }

    /// Creates a todo for `user_id`, assigning a fresh id, the creation
    /// timestamp and `done = false`, and returns the stored record.
    pub async fn create_todo(&self, user_id: &str, request: CreateTodoRequest) -> Result<TodoItem> {
        let todo = TodoItem {
            user_id: user_id.to_string(),
            todo_id: Uuid::new_v4().to_string(),
            name: request.name,
            due_date: request.due_date,
            done: false,
            created_at: Utc::now(),
            attachment_url: None,
        };

        self.repo.put_todo(&todo).await?;
        tracing::info!(user_id, todo_id = %todo.todo_id, "created todo");

        Ok(todo)
    }

    /// Updates the mutable fields of an existing todo. Propagates `NotFound`
    /// unchanged when the record does not exist.
    pub async fn update_todo(
        &self,
        user_id: &str,
        todo_id: &str,
        request: UpdateTodoRequest,
    ) -> Result<()> {
        self.repo.update_todo(user_id, todo_id, &request).await?;
        tracing::info!(user_id, todo_id, "updated todo");
        Ok(())
    }

    /// Deletes a todo. Deleting a non-existent record is a no-op.
    pub async fn delete_todo(&self, user_id: &str, todo_id: &str) -> Result<()> {
        self.repo.delete_todo(user_id, todo_id).await?;
        tracing::info!(user_id, todo_id, "deleted todo");
        Ok(())
    }

    /// Issues an upload URL for the todo's attachment and persists the
    /// eventual public URL on the record.
    ///
    /// The two calls run sequentially: the presigned URL is issued first,
    /// then the record is updated. When the record update fails after the
    /// URL was issued, the URL is still returned to the caller (it is valid
    /// and usable) and the failure is logged; the record's `attachment_url`
    /// stays unset until a later successful call. The public URL is written
    /// before the client has uploaded the object; the client is trusted to
    /// upload promptly.
    pub async fn generate_upload_url(&self, user_id: &str, todo_id: &str) -> Result<String> {
        let upload_url = self.attachments.issue_upload_url(todo_id).await?;
        tracing::info!(user_id, todo_id, "issued attachment upload url");

        let public_url = self.attachments.public_url(todo_id);
        if let Err(error) = self
            .repo
            .set_attachment_url(user_id, todo_id, &public_url)
            .await
        {
            tracing::error!(
                user_id,
                todo_id,
                %error,
                "failed to persist attachment url; upload url returned anyway"
            );
        }

        Ok(upload_url)
    }
}
