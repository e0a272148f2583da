//! DynamoDB repository implementation.
//!
//! Implements `TodoRepository` from `todosync_core::storage` against a
//! table keyed by `(userId, todoId)` with a secondary index keyed by
//! `userId`.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;

use todosync_core::storage::{Result, TodoRepository};
use todosync_core::todo::{TodoItem, UpdateTodoRequest};

use super::conversions::{item_to_todo, todo_to_item};
use super::error::{
    map_delete_item_error, map_get_item_error, map_put_item_error, map_query_error,
    map_update_item_error,
};

/// DynamoDB-based todo repository.
///
/// Holds a single shared client handle, created once per process and
/// reused across requests.
pub struct DynamoDbTodoRepository {
    client: Client,
    table_name: String,
    index_name: String,
}

impl DynamoDbTodoRepository {
    /// Creates a new repository with the given client, table name and
    /// owner-index name.
    pub fn new(
        client: Client,
        table_name: impl Into<String>,
        index_name: impl Into<String>,
    ) -> Self {
        Self {
            client,
            table_name: table_name.into(),
            index_name: index_name.into(),
        }
    }
}

#[async_trait]
impl TodoRepository for DynamoDbTodoRepository {
    async fn get_todo(&self, user_id: &str, todo_id: &str) -> Result<Option<TodoItem>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("userId", AttributeValue::S(user_id.to_string()))
            .key("todoId", AttributeValue::S(todo_id.to_string()))
            .send()
            .await
            .map_err(map_get_item_error)?;

        match result.item {
            Some(item) => Ok(Some(item_to_todo(&item)?)),
            None => Ok(None),
        }
    }

    async fn list_todos_by_owner(&self, user_id: &str) -> Result<Vec<TodoItem>> {
        let result = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name(&self.index_name)
            .key_condition_expression("userId = :userId")
            .expression_attribute_values(":userId", AttributeValue::S(user_id.to_string()))
            .send()
            .await
            .map_err(map_query_error)?;

        let items = result.items.unwrap_or_default();
        items.iter().map(item_to_todo).collect()
    }

    async fn put_todo(&self, todo: &TodoItem) -> Result<()> {
        let item = todo_to_item(todo);

        // Unconditional write: the freshly generated id is assumed unique.
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(map_put_item_error)?;

        Ok(())
    }

    async fn update_todo(
        &self,
        user_id: &str,
        todo_id: &str,
        update: &UpdateTodoRequest,
    ) -> Result<()> {
        let due_date = match &update.due_date {
            Some(due_date) => AttributeValue::S(due_date.clone()),
            None => AttributeValue::Null(true),
        };

        // The condition turns a missing key into a failed conditional check
        // instead of a silently created partial record.
        self.client
            .update_item()
            .table_name(&self.table_name)
            .key("userId", AttributeValue::S(user_id.to_string()))
            .key("todoId", AttributeValue::S(todo_id.to_string()))
            .update_expression("SET #name = :name, dueDate = :dueDate, done = :done")
            .condition_expression("attribute_exists(todoId)")
            .expression_attribute_names("#name", "name")
            .expression_attribute_values(":name", AttributeValue::S(update.name.clone()))
            .expression_attribute_values(":dueDate", due_date)
            .expression_attribute_values(":done", AttributeValue::Bool(update.done))
            .send()
            .await
            .map_err(|e| map_update_item_error(e, "TodoItem", todo_id))?;

        Ok(())
    }

    async fn set_attachment_url(&self, user_id: &str, todo_id: &str, url: &str) -> Result<()> {
        self.client
            .update_item()
            .table_name(&self.table_name)
            .key("userId", AttributeValue::S(user_id.to_string()))
            .key("todoId", AttributeValue::S(todo_id.to_string()))
            .update_expression("SET attachmentUrl = :attachmentUrl")
            .condition_expression("attribute_exists(todoId)")
            .expression_attribute_values(":attachmentUrl", AttributeValue::S(url.to_string()))
            .send()
            .await
            .map_err(|e| map_update_item_error(e, "TodoItem", todo_id))?;

        Ok(())
    }

    async fn delete_todo(&self, user_id: &str, todo_id: &str) -> Result<()> {
        // No condition expression: deleting an absent key is a no-op.
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key("userId", AttributeValue::S(user_id.to_string()))
            .key("todoId", AttributeValue::S(todo_id.to_string()))
            .send()
            .await
            .map_err(map_delete_item_error)?;

        Ok(())
    }
}
