//! HTTP API for the todo service
//!
//! Bridges the core repository contract to a small JSON-over-HTTP surface:
//!
//! - `GET /` liveness report with uptime
//! - `GET /todos?user_id=..&status=..` lists an owner's live todos
//! - `POST /todos` creates a todo in the `active` state
//! - `PUT /todos/:id` changes status and/or task text
//! - `DELETE /todos/:id` soft-deletes a todo
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use todo_api::TodoServer;
//! use todo_core::TodoRepository;
//!
//! async fn start_server<R: TodoRepository + 'static>(
//!     repository: Arc<R>,
//! ) -> std::io::Result<()> {
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//!     TodoServer::new(repository)
//!         .serve(listener, async {
//!             let _ = tokio::signal::ctrl_c().await;
//!         })
//!         .await
//! }
//! ```

pub mod error;
pub mod request_logger;
pub mod serialization;
pub mod server;

pub use error::ApiError;
pub use serialization::*;
pub use server::{AppState, TodoServer};

// Re-export core types for external consumers
pub use todo_core::{NewTodo, Todo, TodoFilter, TodoRepository, UpdateTodo};
