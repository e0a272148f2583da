use std::{env, time::Duration};

/// Storage backend selection, resolved once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    DynamoDb,
    InMemory,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// DynamoDB table holding todo records (default: "todos")
    pub todos_table: String,
    /// Secondary index keyed by userId for owner-wide listing
    /// (default: "todos-by-user")
    pub todos_table_sec_index: String,
    /// S3 bucket holding attachment images (default: "todosync-images")
    pub images_bucket: String,
    /// Presigned upload URL validity window in seconds (default: 300)
    pub signed_url_expiration_seconds: u64,
    /// Storage backend: "dynamodb" or "inmemory" (default: dynamodb)
    pub storage_backend: StorageBackend,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `TODOS_TABLE` - Todo records table name (default: "todos")
    /// - `TODOS_TABLE_SEC_INDEX` - Owner index name (default: "todos-by-user")
    /// - `IMAGES_S3_BUCKET` - Attachment bucket name (default: "todosync-images")
    /// - `SIGNED_URL_EXPIRATION` - Upload URL expiry in seconds (default: 300)
    /// - `STORAGE_BACKEND` - "dynamodb" or "inmemory" (default: "dynamodb")
    pub fn from_env() -> Self {
        Self {
            todos_table: env::var("TODOS_TABLE").unwrap_or_else(|_| "todos".to_string()),
            todos_table_sec_index: env::var("TODOS_TABLE_SEC_INDEX")
                .unwrap_or_else(|_| "todos-by-user".to_string()),
            images_bucket: env::var("IMAGES_S3_BUCKET")
                .unwrap_or_else(|_| "todosync-images".to_string()),
            signed_url_expiration_seconds: env::var("SIGNED_URL_EXPIRATION")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            storage_backend: match env::var("STORAGE_BACKEND").as_deref() {
                Ok("inmemory") => StorageBackend::InMemory,
                _ => StorageBackend::DynamoDb,
            },
        }
    }

    /// Get the upload URL expiry as a Duration.
    pub fn upload_url_expiry(&self) -> Duration {
        Duration::from_secs(self.signed_url_expiration_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
