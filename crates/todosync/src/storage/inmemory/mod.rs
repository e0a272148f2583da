//! In-memory storage backend for tests and local development.

mod repository;

pub use repository::{InMemoryAttachmentStore, InMemoryTodoRepository};
