//! Core domain and storage contracts for the todosync backend.
//!
//! This crate is backend-agnostic: it defines the todo entity, the request
//! payloads, the repository traits that storage backends implement, and the
//! workflow service that composes them. The binary crate wires in concrete
//! DynamoDB/S3 or in-memory implementations.

pub mod storage;
pub mod todo;
