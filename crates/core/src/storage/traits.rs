use async_trait::async_trait;

use crate::todo::{TodoItem, UpdateTodoRequest};

use super::Result;

/// Repository for todo record operations.
///
/// Backed by a key-value table keyed by `(user_id, todo_id)` with a
/// secondary index queryable by `user_id` alone. Every operation touches
/// exactly one key (or one owner partition for listing) and relies on the
/// store's per-key atomicity; there is no cross-record transaction.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Gets a todo by its owner and id.
    async fn get_todo(&self, user_id: &str, todo_id: &str) -> Result<Option<TodoItem>>;

    /// Gets all todos for a user via the owner index.
    ///
    /// Ordering is store-defined. An owner with no records yields an empty
    /// vec, never an error.
    async fn list_todos_by_owner(&self, user_id: &str) -> Result<Vec<TodoItem>>;

    /// Writes a fully-populated todo record, overwriting any existing one.
    ///
    /// No existence check is performed; the freshly generated id is assumed
    /// unique.
    async fn put_todo(&self, todo: &TodoItem) -> Result<()>;

    /// Partially updates the `name`, `due_date` and `done` fields of an
    /// existing record.
    ///
    /// Fails with `NotFound` when no record exists for the key; a missing
    /// key must never produce a partial record.
    async fn update_todo(
        &self,
        user_id: &str,
        todo_id: &str,
        update: &UpdateTodoRequest,
    ) -> Result<()>;

    /// Writes the `attachment_url` field of an existing record, leaving all
    /// other fields untouched.
    ///
    /// Fails with `NotFound` when no record exists for the key.
    async fn set_attachment_url(&self, user_id: &str, todo_id: &str, url: &str) -> Result<()>;

    /// Removes the record for the key. Deleting a non-existent key is a
    /// no-op, not an error.
    async fn delete_todo(&self, user_id: &str, todo_id: &str) -> Result<()>;
}

/// Object-storage capability for todo image attachments.
///
/// Objects are stored under the todo id in a configured bucket. Uploads go
/// through a time-limited presigned URL; reads use the bucket's public URL
/// scheme once the object has been uploaded.
#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Issues a time-limited write-capable URL for the object keyed by
    /// `todo_id`. Expiry is enforced by the object-storage service.
    async fn issue_upload_url(&self, todo_id: &str) -> Result<String>;

    /// Composes the deterministic public read URL for the object keyed by
    /// `todo_id`. No presigning and no I/O involved.
    fn public_url(&self, todo_id: &str) -> String;
}
