//! S3 attachment store implementation.
//!
//! Issues time-limited presigned PUT URLs for attachment uploads; expiry is
//! enforced by S3, not by this process. Public read URLs are composed
//! deterministically from the bucket and object key.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client;

use todosync_core::storage::{AttachmentStore, RepositoryError, Result};

use super::public_object_url;

/// S3-backed attachment store.
///
/// Holds a single shared client handle, created once per process.
pub struct S3AttachmentStore {
    client: Client,
    bucket: String,
    upload_url_expiry: Duration,
}

impl S3AttachmentStore {
    /// Creates a new store for the given bucket with the configured upload
    /// URL validity window.
    pub fn new(client: Client, bucket: impl Into<String>, upload_url_expiry: Duration) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            upload_url_expiry,
        }
    }
}

#[async_trait]
impl AttachmentStore for S3AttachmentStore {
    async fn issue_upload_url(&self, todo_id: &str) -> Result<String> {
        let presigning = PresigningConfig::expires_in(self.upload_url_expiry)
            .map_err(|e| RepositoryError::PresignFailed(e.to_string()))?;

        let request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(todo_id)
            .presigned(presigning)
            .await
            .map_err(|e| RepositoryError::PresignFailed(e.to_string()))?;

        Ok(request.uri().to_string())
    }

    fn public_url(&self, todo_id: &str) -> String {
        public_object_url(&self.bucket, todo_id)
    }
}
