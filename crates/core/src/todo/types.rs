use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single todo record owned by a user.
///
/// `(user_id, todo_id)` uniquely identifies the record: `user_id` is the
/// partition key, `todo_id` the sort key. `todo_id` and `created_at` are
/// assigned once at creation and never mutated afterwards.
///
/// The wire representation uses camelCase names (`userId`, `todoId`,
/// `dueDate`, `createdAt`, `attachmentUrl`), matching the table's attribute
/// names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    /// Owner identity, trusted from the authentication boundary.
    pub user_id: String,
    /// UUID string, unique per user.
    pub todo_id: String,
    pub name: String,
    /// Date string supplied by the client, stored verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    pub done: bool,
    pub created_at: DateTime<Utc>,
    /// Public read URL of the uploaded image. Absent until an upload has
    /// been provisioned; derived from the bucket and `todo_id`, never
    /// arbitrary client input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment_url: Option<String>,
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
    fn test_serializes_with_camel_case_names() {
        let json = serde_json::to_value(sample_todo()).unwrap();

        assert_eq!(json["userId"], "u1");
        assert_eq!(json["todoId"], "550e8400-e29b-41d4-a716-446655440001");
        assert_eq!(json["name"], "Buy milk");
        assert_eq!(json["dueDate"], "2024-01-01");
        assert_eq!(json["done"], false);
        assert_eq!(json["createdAt"], "2024-01-15T10:30:00Z");
    }

    #[test]
    fn test_absent_attachment_url_is_omitted() {
        let json = serde_json::to_value(sample_todo()).unwrap();
        assert!(json.get("attachmentUrl").is_none());
    }

    #[test]
    fn test_present_attachment_url_is_serialized() {
        let mut todo = sample_todo();
        todo.attachment_url = Some("https://images.s3.amazonaws.com/abc".to_string());

        let json = serde_json::to_value(todo).unwrap();
        assert_eq!(json["attachmentUrl"], "https://images.s3.amazonaws.com/abc");
    }

    #[test]
    fn test_round_trips_through_json() {
        let todo = sample_todo();
        let json = serde_json::to_string(&todo).unwrap();
        let parsed: TodoItem = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, todo);
    }
}
