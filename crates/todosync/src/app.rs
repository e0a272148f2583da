use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::{get, patch, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        health::health,
        todos::{create_todo, delete_todo, generate_upload_url, list_todos, update_todo},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
///
/// Every response carries an open cross-origin allow header.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/health", get(health))
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{todo_id}", patch(update_todo).delete(delete_todo))
        .route("/todos/{todo_id}/attachment", post(generate_upload_url))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header::AUTHORIZATION, Request},
    };
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::{Config, StorageBackend};

    fn test_config() -> Config {
        Config {
            todos_table: "todos-test".to_string(),
            todos_table_sec_index: "todos-by-user-test".to_string(),
            images_bucket: "images-test".to_string(),
            signed_url_expiration_seconds: 300,
            storage_backend: StorageBackend::InMemory,
        }
    }

    fn test_app() -> Router {
        create_app(AppState::in_memory(&test_config()))
    }

    /// Unsigned JWT whose sub claim is the given user id.
    fn bearer(sub: &str) -> String {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"{sub}"}}"#));
        format!("Bearer {header}.{payload}.signature")
    }

    fn get_request(uri: &str, sub: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header(AUTHORIZATION, bearer(sub))
            .body(Body::empty())
            .unwrap()
    }

    fn json_request(method: &str, uri: &str, sub: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(AUTHORIZATION, bearer(sub))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: &str, uri: &str, sub: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(AUTHORIZATION, bearer(sub))
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn create_sample(app: &Router, sub: &str) -> Value {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/todos",
                sub,
                json!({"name": "Buy milk", "dueDate": "2024-01-01"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await["item"].clone()
    }

    #[tokio::test]
    async fn test_health() {
        let response = test_app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_list_requires_bearer_token() {
        let response = test_app()
            .oneshot(Request::builder().uri("/todos").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_list_empty() {
        let response = test_app()
            .oneshot(get_request("/todos", "u1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["items"], json!([]));
    }

    #[tokio::test]
    async fn test_create_returns_enriched_item() {
        let app = test_app();
        let item = create_sample(&app, "u1").await;

        assert_eq!(item["userId"], "u1");
        assert_eq!(item["name"], "Buy milk");
        assert_eq!(item["dueDate"], "2024-01-01");
        assert_eq!(item["done"], false);
        assert!(item["todoId"].as_str().is_some());
        assert!(item["createdAt"].as_str().is_some());
        assert!(item.get("attachmentUrl").is_none());
    }

    #[tokio::test]
    async fn test_create_then_list_includes_item_exactly_once() {
        let app = test_app();
        let item = create_sample(&app, "u1").await;

        let response = app.oneshot(get_request("/todos", "u1")).await.unwrap();
        let body = body_json(response).await;

        assert_eq!(body["items"], json!([item]));
    }

    #[tokio::test]
    async fn test_lists_are_scoped_per_user() {
        let app = test_app();
        create_sample(&app, "u1").await;

        let response = app.oneshot(get_request("/todos", "u2")).await.unwrap();
        let body = body_json(response).await;

        assert_eq!(body["items"], json!([]));
    }

    #[tokio::test]
    async fn test_create_without_name_is_rejected() {
        let response = test_app()
            .oneshot(json_request(
                "POST",
                "/todos",
                "u1",
                json!({"dueDate": "2024-01-01"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_changes_only_mutable_fields() {
        let app = test_app();
        let item = create_sample(&app, "u1").await;
        let todo_id = item["todoId"].as_str().unwrap();

        let response = app
            .clone()
            .oneshot(json_request(
                "PATCH",
                &format!("/todos/{todo_id}"),
                "u1",
                json!({"name": "Buy oat milk", "dueDate": "2024-02-01", "done": true}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.oneshot(get_request("/todos", "u1")).await.unwrap();
        let updated = body_json(response).await["items"][0].clone();

        assert_eq!(updated["name"], "Buy oat milk");
        assert_eq!(updated["dueDate"], "2024-02-01");
        assert_eq!(updated["done"], true);
        assert_eq!(updated["todoId"], item["todoId"]);
        assert_eq!(updated["createdAt"], item["createdAt"]);
    }

    #[tokio::test]
    async fn test_update_missing_todo_is_404() {
        let response = test_app()
            .oneshot(json_request(
                "PATCH",
                "/todos/missing-id",
                "u1",
                json!({"name": "x", "dueDate": "y", "done": true}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let app = test_app();
        let item = create_sample(&app, "u1").await;
        let todo_id = item["todoId"].as_str().unwrap();
        let uri = format!("/todos/{todo_id}");

        let first = app
            .clone()
            .oneshot(empty_request("DELETE", &uri, "u1"))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        let second = app
            .clone()
            .oneshot(empty_request("DELETE", &uri, "u1"))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::OK);

        let response = app.oneshot(get_request("/todos", "u1")).await.unwrap();
        assert_eq!(body_json(response).await["items"], json!([]));
    }

    #[tokio::test]
    async fn test_generate_upload_url_returns_url_and_marks_record() {
        let app = test_app();
        let item = create_sample(&app, "u1").await;
        let todo_id = item["todoId"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(empty_request(
                "POST",
                &format!("/todos/{todo_id}/attachment"),
                "u1",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let upload_url = body_json(response).await["uploadUrl"]
            .as_str()
            .unwrap()
            .to_string();
        assert!(upload_url.contains(&todo_id));

        let response = app.oneshot(get_request("/todos", "u1")).await.unwrap();
        let stored = body_json(response).await["items"][0].clone();
        assert_eq!(
            stored["attachmentUrl"],
            format!("https://images-test.s3.amazonaws.com/{todo_id}")
        );
    }

    #[tokio::test]
    async fn test_responses_carry_open_cors_header() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/todos")
                    .header(AUTHORIZATION, bearer("u1"))
                    .header(header::ORIGIN, "https://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
    }
}
