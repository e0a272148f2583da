//! Application state.
//!
//! The workflow service and its storage handles are constructed once at
//! startup and injected into the handlers through axum state; there are no
//! ambient globals. SDK clients are created once and reused across
//! requests.

use std::sync::Arc;

use todosync_core::todo::TodoService;

use crate::config::Config;
use crate::storage::dynamodb::DynamoDbTodoRepository;
use crate::storage::inmemory::{InMemoryAttachmentStore, InMemoryTodoRepository};
use crate::storage::s3::S3AttachmentStore;

/// Shared application state, cloned per request handler.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TodoService>,
}

impl AppState {
    pub fn new(service: TodoService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Builds state backed by DynamoDB and S3, sharing one SDK
    /// configuration for both clients.
    pub async fn dynamodb(config: &Config) -> Self {
        let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;

        let repo = Arc::new(DynamoDbTodoRepository::new(
            aws_sdk_dynamodb::Client::new(&sdk_config),
            &config.todos_table,
            &config.todos_table_sec_index,
        ));
        let attachments = Arc::new(S3AttachmentStore::new(
            aws_sdk_s3::Client::new(&sdk_config),
            &config.images_bucket,
            config.upload_url_expiry(),
        ));

        Self::new(TodoService::new(repo, attachments))
    }

    /// Builds state backed by the in-memory repository, for tests and
    /// local development.
    pub fn in_memory(config: &Config) -> Self {
        let repo = Arc::new(InMemoryTodoRepository::new());
        let attachments = Arc::new(InMemoryAttachmentStore::new(
            &config.images_bucket,
            config.upload_url_expiry(),
        ));

        Self::new(TodoService::new(repo, attachments))
    }
}
