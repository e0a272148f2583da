//! Storage backends for todo records and attachments.
//!
//! The `dynamodb` + `s3` pair is the production configuration; `inmemory`
//! backs tests and local development.

pub mod dynamodb;
pub mod inmemory;
pub mod s3;

/// Composes the public read URL for an object in a bucket.
///
/// Pattern: `https://{bucket}.s3.amazonaws.com/{key}`
///
/// The object is expected to become world-readable after upload, so no
/// presigning is involved.
pub fn public_object_url(bucket: &str, key: &str) -> String {
    format!("https://{bucket}.s3.amazonaws.com/{key}")
}
