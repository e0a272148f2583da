//! DynamoDB storage backend implementation.
//!
//! Maps todo records onto a table keyed by `(userId, todoId)` with a
//! secondary index keyed by `userId` for owner-wide listing, using
//! `aws-sdk-dynamodb`.

mod conversions;
mod error;
mod repository;

pub use repository::DynamoDbTodoRepository;
