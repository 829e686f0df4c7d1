//! HTTP tests for the todo API
//!
//! Each test binds the router to an ephemeral port backed by the mock
//! repository and drives it with a real HTTP client.

use futures_util::future::join_all;
use mocks::{create_test_todos, steps, MockTodoRepository};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use todo_api::{HealthResponse, MessageResponse, Todo, TodoServer};
use todo_core::{TodoError, STATUS_ACTIVE, STATUS_DELETED};
use tokio::sync::oneshot;

struct TestServer {
    base_url: String,
    repository: Arc<MockTodoRepository>,
    client: Client,
    _shutdown: oneshot::Sender<()>,
}

impl TestServer {
    async fn start(repository: MockTodoRepository) -> Self {
        Self::start_at(repository, Instant::now()).await
    }

    /// Start a server whose uptime counts from `started_at`
    async fn start_at(repository: MockTodoRepository, started_at: Instant) -> Self {
        let repository = Arc::new(repository);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let server = TodoServer::new(repository.clone()).with_start_time(started_at);
        tokio::spawn(async move {
            server
                .serve(listener, async {
                    let _ = shutdown_rx.await;
                })
                .await
                .unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            repository,
            client: Client::new(),
            _shutdown: shutdown_tx,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn list(&self, query: &str) -> (StatusCode, Value) {
        let response = self
            .client
            .get(self.url(&format!("/todos{query}")))
            .send()
            .await
            .unwrap();
        let status = response.status();
        (status, response.json().await.unwrap())
    }

    async fn create(&self, body: Value) -> (StatusCode, Value) {
        let response = self
            .client
            .post(self.url("/todos"))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = response.status();
        (status, response.json().await.unwrap())
    }

    async fn update(&self, id: &str, body: Value) -> (StatusCode, Value) {
        let response = self
            .client
            .put(self.url(&format!("/todos/{id}")))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = response.status();
        (status, response.json().await.unwrap())
    }

    async fn delete(&self, id: &str) -> (StatusCode, Value) {
        let response = self
            .client
            .delete(self.url(&format!("/todos/{id}")))
            .send()
            .await
            .unwrap();
        let status = response.status();
        (status, response.json().await.unwrap())
    }
}

fn todos_from(value: Value) -> Vec<Todo> {
    serde_json::from_value(value).unwrap()
}

#[tokio::test]
async fn test_health_reports_uptime() {
    let server = TestServer::start(MockTodoRepository::new()).await;

    let response = server.client.get(server.url("/")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let health: HealthResponse = response.json().await.unwrap();
    assert_eq!(health.status, "ok");
    assert!(health.uptime >= 0.0);

    // Liveness never touches the store
    server.repository.assert_no_calls();
}

#[tokio::test]
async fn test_uptime_counts_from_process_start() {
    let started_at = Instant::now()
        .checked_sub(Duration::from_secs(5))
        .unwrap();
    let server = TestServer::start_at(MockTodoRepository::new(), started_at).await;

    let health: HealthResponse = server
        .client
        .get(server.url("/"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(health.uptime >= 5.0, "uptime was {}", health.uptime);
}

#[tokio::test]
async fn test_create_list_update_delete_round_trip() {
    let server = TestServer::start(MockTodoRepository::new()).await;

    let (status, body) = server
        .create(json!({"task": "buy milk", "user_id": "u1"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Todo added!"}));

    let (status, body) = server.list("?user_id=u1").await;
    assert_eq!(status, StatusCode::OK);
    let todos = todos_from(body);
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].task, "buy milk");
    assert_eq!(todos[0].status, STATUS_ACTIVE);
    assert_eq!(todos[0].user_id, "u1");
    let id = todos[0].id.to_string();

    let (status, body) = server.update(&id, json!({"status": "done"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Todo updated!"}));

    let (_, body) = server.list("?user_id=u1&status=done").await;
    assert_eq!(todos_from(body).len(), 1);

    let (status, body) = server.delete(&id).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Todo deleted!"}));

    let (_, body) = server.list("?user_id=u1").await;
    assert!(todos_from(body).is_empty());

    // The row is still stored, just marked
    let stored = server.repository.all_todos();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].status, STATUS_DELETED);
}

#[tokio::test]
async fn test_list_requires_user_id() {
    let server = TestServer::start(MockTodoRepository::new()).await;

    let (status, body) = server.list("").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "user_id is required"}));

    let (status, _) = server.list("?user_id=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    server.repository.assert_no_calls();
}

#[tokio::test]
async fn test_list_never_returns_deleted_rows() {
    let server = TestServer::start(MockTodoRepository::with_todos(create_test_todos(12))).await;

    let (status, body) = server.list("?user_id=user-1").await;
    assert_eq!(status, StatusCode::OK);
    let todos = todos_from(body);
    assert!(!todos.is_empty());
    assert!(todos.iter().all(|todo| todo.user_id == "user-1"));
    assert!(todos.iter().all(|todo| todo.status != STATUS_DELETED));

    let (status, body) = server.list("?user_id=user-1&status=deleted").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_list_unknown_owner_is_empty() {
    let server = TestServer::start(MockTodoRepository::with_todos(create_test_todos(4))).await;

    let (status, body) = server.list("?user_id=nobody").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_create_validation_order() {
    let server = TestServer::start(MockTodoRepository::new()).await;

    let (status, body) = server.create(json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "user_id is required"}));

    let (status, body) = server.create(json!({"user_id": "u1", "task": "   "})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "task is required"}));

    let (status, body) = server.create(json!({"task": "buy milk", "user_id": null})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "user_id is required"}));

    server.repository.assert_no_calls();
}

#[tokio::test]
async fn test_create_ignores_client_status() {
    let server = TestServer::start(MockTodoRepository::new()).await;

    let (status, _) = server
        .create(json!({"task": "buy milk", "user_id": "u1", "status": "deleted"}))
        .await;
    assert_eq!(status, StatusCode::OK);

    let stored = server.repository.all_todos();
    assert_eq!(stored[0].status, STATUS_ACTIVE);
}

#[tokio::test]
async fn test_create_accepts_numeric_user_id() {
    let server = TestServer::start(MockTodoRepository::new()).await;

    let (status, _) = server.create(json!({"task": "walk dog", "user_id": 42})).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = server.list("?user_id=42").await;
    let todos = todos_from(body);
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].user_id, "42");
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let server = TestServer::start(MockTodoRepository::new()).await;

    let response = server
        .client
        .post(server.url("/todos"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"error": "Invalid JSON body"}));

    server.repository.assert_no_calls();
}

#[tokio::test]
async fn test_body_without_json_content_type_counts_as_empty() {
    let server = TestServer::start(MockTodoRepository::new()).await;

    let response = server
        .client
        .post(server.url("/todos"))
        .body("task=buy+milk")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"error": "user_id is required"}));
}

#[tokio::test]
async fn test_empty_json_body_update_is_a_no_op() {
    let server = TestServer::start(MockTodoRepository::with_todos(create_test_todos(1))).await;

    let response = server
        .client
        .put(server.url("/todos/1"))
        .header("content-type", "application/json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"message": "Todo updated!"}));

    server.repository.assert_no_calls();
}

#[tokio::test]
async fn test_empty_json_body_create_reports_missing_owner() {
    let server = TestServer::start(MockTodoRepository::new()).await;

    let response = server
        .client
        .post(server.url("/todos"))
        .header("content-type", "application/json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"error": "user_id is required"}));

    server.repository.assert_no_calls();
}

#[tokio::test]
async fn test_update_without_fields_is_a_no_op() {
    let server = TestServer::start(MockTodoRepository::with_todos(create_test_todos(1))).await;

    let (status, body) = server.update("1", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Todo updated!"}));

    let (status, _) = server.update("1", json!({"status": "", "task": "  "})).await;
    assert_eq!(status, StatusCode::OK);

    server.repository.assert_no_calls();
    assert_eq!(server.repository.all_todos()[0].task, "Test todo 1");
}

#[tokio::test]
async fn test_update_missing_row_still_succeeds() {
    let server = TestServer::start(MockTodoRepository::new()).await;

    let (status, body) = server.update("999", json!({"task": "ghost"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Todo updated!"}));

    let (status, _) = server.delete("999").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_can_revive_deleted_row() {
    let server = TestServer::start(MockTodoRepository::with_todos(create_test_todos(4))).await;

    let (_, body) = server.list("?user_id=user-2").await;
    assert!(todos_from(body).iter().all(|todo| todo.id != 4));

    let (status, _) = server.update("4", json!({"status": "active"})).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = server.list("?user_id=user-2").await;
    assert!(todos_from(body).iter().any(|todo| todo.id == 4));
}

#[tokio::test]
async fn test_non_integer_id_is_rejected() {
    let server = TestServer::start(MockTodoRepository::new()).await;

    let (status, body) = server.update("abc", json!({"status": "done"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "id must be an integer"}));

    let (status, _) = server.delete("1.5").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    server.repository.assert_no_calls();
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let server = TestServer::start(MockTodoRepository::with_todos(create_test_todos(1))).await;

    for _ in 0..2 {
        let (status, body) = server.delete("1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Todo deleted!"}));
    }

    assert_eq!(server.repository.all_todos()[0].status, STATUS_DELETED);
}

#[tokio::test]
async fn test_store_failures_use_generic_messages() {
    let server = TestServer::start(MockTodoRepository::with_todos(create_test_todos(1))).await;
    let secret = "Access denied for user 'root'@'10.0.0.3'";

    server
        .repository
        .inject_error(TodoError::Database(secret.to_string()));
    let (status, body) = server.list("?user_id=user-2").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Failed to fetch todos"}));

    server
        .repository
        .inject_error(TodoError::Database(secret.to_string()));
    let (status, body) = server
        .create(json!({"task": "buy milk", "user_id": "u1"}))
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Insert failed"}));

    server
        .repository
        .inject_error(TodoError::Database(secret.to_string()));
    let (status, body) = server.update("1", json!({"status": "done"})).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Update failed"}));

    server
        .repository
        .inject_error(TodoError::Database(secret.to_string()));
    let (status, body) = server.delete("1").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Delete failed"}));
}

#[tokio::test]
async fn test_failed_task_write_keeps_status_change() {
    let server = TestServer::start(MockTodoRepository::with_todos(create_test_todos(1))).await;
    server.repository.inject_error_on(
        steps::UPDATE_TASK,
        TodoError::Database("lock wait timeout".to_string()),
    );

    let (status, body) = server
        .update("1", json!({"status": "done", "task": "renamed"}))
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Update failed"}));

    server.repository.assert_called(steps::UPDATE_STATUS);
    let stored = &server.repository.all_todos()[0];
    assert_eq!(stored.status, "done");
    assert_eq!(stored.task, "Test todo 1");
}

#[tokio::test]
async fn test_concurrent_updates_to_one_row() {
    let server = TestServer::start(MockTodoRepository::with_todos(create_test_todos(1))).await;

    let requests = (0..10).map(|i| {
        let body = if i % 2 == 0 {
            json!({"status": format!("status-{i}")})
        } else {
            json!({"task": format!("task-{i}")})
        };
        server.update("1", body)
    });

    for (status, _) in join_all(requests).await {
        assert_eq!(status, StatusCode::OK);
    }

    let stored = &server.repository.all_todos()[0];
    assert!(stored.status.starts_with("status-"));
    assert!(stored.task.starts_with("task-"));
}

#[tokio::test]
async fn test_message_response_shape() {
    let server = TestServer::start(MockTodoRepository::new()).await;

    let response = server
        .client
        .post(server.url("/todos"))
        .json(&json!({"task": "buy milk", "user_id": "u1"}))
        .send()
        .await
        .unwrap();
    let message: MessageResponse = response.json().await.unwrap();
    assert_eq!(message.message, "Todo added!");
}
