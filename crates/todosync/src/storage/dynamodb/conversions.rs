//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and
//! the todo record. Testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, Utc};
use todosync_core::storage::RepositoryError;
use todosync_core::todo::TodoItem;

/// Convert a TodoItem to a DynamoDB item.
///
/// `dueDate` and `attachmentUrl` are omitted entirely when unset rather
/// than stored as NULL attributes.
pub fn todo_to_item(todo: &TodoItem) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();

    // Keys
    item.insert(
        "userId".to_string(),
        AttributeValue::S(todo.user_id.clone()),
    );
    item.insert(
        "todoId".to_string(),
        AttributeValue::S(todo.todo_id.clone()),
    );

    // Data
    item.insert("name".to_string(), AttributeValue::S(todo.name.clone()));
    if let Some(due_date) = &todo.due_date {
        item.insert("dueDate".to_string(), AttributeValue::S(due_date.clone()));
    }
    item.insert("done".to_string(), AttributeValue::Bool(todo.done));
    item.insert(
        "createdAt".to_string(),
        AttributeValue::S(todo.created_at.to_rfc3339()),
    );
    if let Some(url) = &todo.attachment_url {
        item.insert("attachmentUrl".to_string(), AttributeValue::S(url.clone()));
    }

    item
}

/// Convert a DynamoDB item to a TodoItem.
pub fn item_to_todo(item: &HashMap<String, AttributeValue>) -> Result<TodoItem, RepositoryError> {
    Ok(TodoItem {
        user_id: get_string(item, "userId")?,
        todo_id: get_string(item, "todoId")?,
        name: get_string(item, "name")?,
        due_date: get_optional_string(item, "dueDate"),
        done: get_bool(item, "done")?,
        created_at: get_datetime(item, "createdAt")?,
        attachment_url: get_optional_string(item, "attachmentUrl"),
    })
}

// ============================================================================
// Helper functions
// ============================================================================

/// Get a required string attribute.
fn get_string(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<String, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {}", key)))
}

/// Get an optional string attribute.
fn get_optional_string(item: &HashMap<String, AttributeValue>, key: &str) -> Option<String> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
}

/// Get a required boolean attribute.
fn get_bool(item: &HashMap<String, AttributeValue>, key: &str) -> Result<bool, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_bool().ok())
        .copied()
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {}", key)))
}

/// Get a required datetime attribute (RFC 3339 format).
fn get_datetime(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<DateTime<Utc>, RepositoryError> {
    let s = get_string(item, key)?;
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid datetime {}: {}", key, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_todo() -> TodoItem {
        TodoItem {
            user_id: "u1".to_string(),
            todo_id: "550e8400-e29b-41d4-a716-446655440001".to_string(),
            name: "Buy milk".to_string(),
            due_date: Some("2024-01-01".to_string()),
            done: false,
            created_at: DateTime::parse_from_rfc3339("2024-01-15T10:30:00Z")
                .unwrap()
                .with_timezone(&Utc),
            attachment_url: None,
        }
    }

    #[test]
    fn test_todo_to_item_sets_key_attributes() {
        let item = todo_to_item(&sample_todo());

        assert_eq!(item["userId"], AttributeValue::S("u1".to_string()));
        assert_eq!(
            item["todoId"],
            AttributeValue::S("550e8400-e29b-41d4-a716-446655440001".to_string())
        );
    }

    #[test]
    fn test_todo_to_item_omits_unset_optionals() {
        let mut todo = sample_todo();
        todo.due_date = None;

        let item = todo_to_item(&todo);

        assert!(!item.contains_key("dueDate"));
        assert!(!item.contains_key("attachmentUrl"));
    }

    #[test]
    fn test_todo_round_trips_through_item() {
        let mut todo = sample_todo();
        todo.attachment_url = Some("https://images.s3.amazonaws.com/abc".to_string());

        let item = todo_to_item(&todo);
        let parsed = item_to_todo(&item).unwrap();

        assert_eq!(parsed, todo);
    }

    #[test]
    fn test_item_missing_name_is_invalid() {
        let mut item = todo_to_item(&sample_todo());
        item.remove("name");

        let result = item_to_todo(&item);
        assert!(matches!(result, Err(RepositoryError::InvalidData(_))));
    }

    #[test]
    fn test_item_with_bad_timestamp_is_invalid() {
        let mut item = todo_to_item(&sample_todo());
        item.insert(
            "createdAt".to_string(),
            AttributeValue::S("not-a-timestamp".to_string()),
        );

        let result = item_to_todo(&item);
        assert!(matches!(result, Err(RepositoryError::InvalidData(_))));
    }
}
