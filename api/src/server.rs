//! HTTP server for the todo API
//!
//! Four routes map one-to-one onto repository operations, plus a liveness
//! route that never touches the store.

use axum::{
    extract::{
        rejection::QueryRejection,
        Path, Query, State,
    },
    middleware,
    routing::{get, put},
    Json, Router,
};
use std::{future::Future, sync::Arc, time::Instant};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::{
    error::ApiError,
    serialization::{
        CreateTodoBody, HealthResponse, JsonBody, ListTodosParams, MessageResponse,
        UpdateTodoBody,
    },
};
use todo_core::{Todo, TodoRepository, TodoValidator};

const LIST_OPERATION: &str = "GET /todos";
const CREATE_OPERATION: &str = "POST /todos";
const UPDATE_OPERATION: &str = "PUT /todos/:id";
const DELETE_OPERATION: &str = "DELETE /todos/:id";

/// Shared server state for handlers
pub struct AppState<R> {
    pub repository: Arc<R>,
    pub started_at: Instant,
}

/// Todo HTTP server, generic over the repository it serves from
pub struct TodoServer<R> {
    repository: Arc<R>,
    started_at: Instant,
}

impl<R: TodoRepository + 'static> TodoServer<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            started_at: Instant::now(),
        }
    }

    /// Report uptime relative to `started_at` instead of server construction
    pub fn with_start_time(mut self, started_at: Instant) -> Self {
        self.started_at = started_at;
        self
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if let Ok(addr) = listener.local_addr() {
            info!("Server listening on {}", addr);
        }

        axum::serve(listener, self.create_router())
            .with_graceful_shutdown(shutdown)
            .await
    }

    /// Create the router with all endpoints
    pub fn create_router(self) -> Router {
        let state = Arc::new(AppState {
            repository: self.repository,
            started_at: self.started_at,
        });

        Router::new()
            .route("/", get(health_handler::<R>))
            .route("/todos", get(list_todos::<R>).post(create_todo::<R>))
            .route("/todos/:id", put(update_todo::<R>).delete(delete_todo::<R>))
            .layer(middleware::from_fn(
                crate::request_logger::request_logging_middleware,
            ))
            .layer(CorsLayer::permissive())
            .with_state(state)
    }
}

async fn health_handler<R>(State(state): State<Arc<AppState<R>>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        uptime: state.started_at.elapsed().as_secs_f64(),
    })
}

async fn list_todos<R: TodoRepository>(
    State(state): State<Arc<AppState<R>>>,
    query: Result<Query<ListTodosParams>, QueryRejection>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    let Query(params) = query.map_err(|_| ApiError::bad_request("Invalid query string"))?;
    let filter = TodoValidator::validate_filter(params.user_id, params.status)?;

    let todos = state
        .repository
        .list(filter)
        .await
        .map_err(ApiError::operation(LIST_OPERATION, "Failed to fetch todos"))?;

    Ok(Json(todos))
}

async fn create_todo<R: TodoRepository>(
    State(state): State<Arc<AppState<R>>>,
    JsonBody(body): JsonBody<CreateTodoBody>,
) -> Result<Json<MessageResponse>, ApiError> {
    let new_todo = TodoValidator::validate_new_todo(body.task, body.user_id)?;

    let id = state
        .repository
        .create(new_todo)
        .await
        .map_err(ApiError::operation(CREATE_OPERATION, "Insert failed"))?;

    tracing::debug!(id, "Todo added");
    Ok(MessageResponse::new("Todo added!"))
}

async fn update_todo<R: TodoRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<UpdateTodoBody>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = TodoValidator::parse_id(&id)?;
    let updates = TodoValidator::validate_update(body.status, body.task);

    state
        .repository
        .update(id, updates)
        .await
        .map_err(ApiError::operation(UPDATE_OPERATION, "Update failed"))?;

    Ok(MessageResponse::new("Todo updated!"))
}

async fn delete_todo<R: TodoRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = TodoValidator::parse_id(&id)?;

    state
        .repository
        .soft_delete(id)
        .await
        .map_err(ApiError::operation(DELETE_OPERATION, "Delete failed"))?;

    Ok(MessageResponse::new("Todo deleted!"))
}
