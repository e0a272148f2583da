//! In-memory repository and attachment store.
//!
//! Mirrors the semantics of the DynamoDB/S3 pair closely enough to back
//! the full test suite: conditional update (NotFound on a missing key),
//! idempotent delete, and the same public URL composition.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use todosync_core::storage::{AttachmentStore, RepositoryError, Result, TodoRepository};
use todosync_core::todo::{TodoItem, UpdateTodoRequest};

use crate::storage::public_object_url;

/// In-memory todo repository.
///
/// Uses a HashMap keyed by `(user_id, todo_id)` wrapped in `Arc<RwLock<_>>`
/// for thread-safe access. Data is lost when the repository is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoRepository {
    todos: Arc<RwLock<HashMap<(String, String), TodoItem>>>,
}

impl InMemoryTodoRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn get_todo(&self, user_id: &str, todo_id: &str) -> Result<Option<TodoItem>> {
        let todos = self.todos.read().await;
        Ok(todos
            .get(&(user_id.to_string(), todo_id.to_string()))
            .cloned())
    }

    async fn list_todos_by_owner(&self, user_id: &str) -> Result<Vec<TodoItem>> {
        let todos = self.todos.read().await;
        Ok(todos
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn put_todo(&self, todo: &TodoItem) -> Result<()> {
        let mut todos = self.todos.write().await;
        todos.insert((todo.user_id.clone(), todo.todo_id.clone()), todo.clone());
        Ok(())
    }

    async fn update_todo(
        &self,
        user_id: &str,
        todo_id: &str,
        update: &UpdateTodoRequest,
    ) -> Result<()> {
        let mut todos = self.todos.write().await;
        let todo = todos
            .get_mut(&(user_id.to_string(), todo_id.to_string()))
            .ok_or_else(|| RepositoryError::NotFound {
                entity_type: "TodoItem",
                id: todo_id.to_string(),
            })?;

        todo.name = update.name.clone();
        todo.due_date = update.due_date.clone();
        todo.done = update.done;
        Ok(())
    }

    async fn set_attachment_url(&self, user_id: &str, todo_id: &str, url: &str) -> Result<()> {
        let mut todos = self.todos.write().await;
        let todo = todos
            .get_mut(&(user_id.to_string(), todo_id.to_string()))
            .ok_or_else(|| RepositoryError::NotFound {
                entity_type: "TodoItem",
                id: todo_id.to_string(),
            })?;

        todo.attachment_url = Some(url.to_string());
        Ok(())
    }

    async fn delete_todo(&self, user_id: &str, todo_id: &str) -> Result<()> {
        let mut todos = self.todos.write().await;
        todos.remove(&(user_id.to_string(), todo_id.to_string()));
        Ok(())
    }
}

/// In-memory attachment store.
///
/// Composes the same public URLs as the S3 store; the "presigned" upload
/// URL carries a stub query string instead of a real signature.
#[derive(Debug, Clone)]
pub struct InMemoryAttachmentStore {
    bucket: String,
    upload_url_expiry: Duration,
}

impl InMemoryAttachmentStore {
    pub fn new(bucket: impl Into<String>, upload_url_expiry: Duration) -> Self {
        Self {
            bucket: bucket.into(),
            upload_url_expiry,
        }
    }
}

#[async_trait]
impl AttachmentStore for InMemoryAttachmentStore {
    async fn issue_upload_url(&self, todo_id: &str) -> Result<String> {
        Ok(format!(
            "{}?X-Amz-Expires={}",
            public_object_url(&self.bucket, todo_id),
            self.upload_url_expiry.as_secs()
        ))
    }

    fn public_url(&self, todo_id: &str) -> String {
        public_object_url(&self.bucket, todo_id)
    }
}
