//! Database crate for the todo service
//!
//! This crate provides the MySQL implementation of the TodoRepository trait
//! and the resolution of connection settings into a connect target.
//!
//! # Features
//!
//! - One resolution strategy for connection strings and discrete parts,
//!   with detection of unsubstituted template placeholders
//! - Connection pooling with a single liveness check at startup
//! - Parameter binding for every caller-supplied value
//! - Driver error mapping onto [`TodoError`]
//!
//! The `todos` table is expected to exist already; `schema/mysql.sql`
//! documents the shape this crate reads and writes.
//!
//! # Usage
//!
//! ```rust,no_run
//! use database::{ConnectionSettings, ConnectionSource, MySqlTodoRepository, PoolSettings};
//! use todo_core::repository::TodoRepository;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = ConnectionSettings {
//!         host: Some("localhost".to_string()),
//!         user: Some("root".to_string()),
//!         database: Some("todos".to_string()),
//!         ..Default::default()
//!     };
//!
//!     let source = ConnectionSource::resolve(&settings)?;
//!     let repo = MySqlTodoRepository::connect(&source, PoolSettings::default()).await?;
//!
//!     repo.health_check().await?;
//!     println!("Database is healthy!");
//!
//!     Ok(())
//! }
//! ```

mod common;
pub mod connection;
mod mysql;

pub use connection::{
    is_unresolved_placeholder, redact_url, ConnectionParts, ConnectionSettings, ConnectionSource,
    DEFAULT_MYSQL_PORT,
};
pub use mysql::{MySqlTodoRepository, PoolSettings};

// Re-export commonly used types from todo-core for convenience
pub use todo_core::{
    error::{Result, TodoError},
    models::{NewTodo, Todo, TodoFilter, UpdateTodo},
    repository::TodoRepository,
};
