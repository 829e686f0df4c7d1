//! Mock implementations and test utilities for the todo service
//!
//! This crate provides the testing infrastructure shared by the other crates:
//! - An in-memory `TodoRepository` with error injection and call tracking
//! - Standard fixtures and random data generators
//! - A contract suite every repository implementation must pass

pub mod contracts;
pub mod fixtures;
pub mod generators;
pub mod repository;

pub use contracts::*;
pub use fixtures::*;
pub use generators::*;
pub use repository::{steps, MockTodoRepository};
