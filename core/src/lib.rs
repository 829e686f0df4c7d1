//! Todo Core Library
//!
//! Domain models, error types and the repository trait for the todo service.
//! The storage and HTTP crates depend on the types defined here.
//!
//! # Architecture
//!
//! - [`models`] - `Todo` and its request DTOs
//! - [`error`] - Error type and result alias
//! - [`repository`] - Repository trait for data persistence
//! - [`validation`] - Required/optional field checks for incoming requests
//!
//! # Example
//!
//! ```rust
//! use todo_core::validation::TodoValidator;
//!
//! let new_todo = TodoValidator::validate_new_todo(
//!     Some("buy milk".to_string()),
//!     Some("u1".to_string()),
//! )
//! .unwrap();
//!
//! assert_eq!(new_todo.user_id, "u1");
//! ```

pub mod error;
pub mod models;
pub mod repository;
pub mod validation;

pub use error::{Result, TodoError};
pub use models::{NewTodo, Todo, TodoFilter, UpdateTodo, STATUS_ACTIVE, STATUS_DELETED};
pub use repository::TodoRepository;
pub use validation::TodoValidator;

/// Current version of the core crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Current crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
