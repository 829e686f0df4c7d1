use async_trait::async_trait;
use crate::{
    error::Result,
    models::{NewTodo, Todo, TodoFilter, UpdateTodo},
};

/// Repository trait for todo persistence.
///
/// Every method is a fresh round trip to the store; implementations hold no
/// todo state between calls and must be safe for concurrent use.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// List the non-deleted todos of one owner
    ///
    /// # Arguments
    /// * `filter` - Owner plus an optional exact status match
    ///
    /// # Returns
    /// * `Ok(Vec<Todo>)` - Matching rows in store order (may be empty)
    /// * `Err(TodoError::Database)` - If the query fails
    async fn list(&self, filter: TodoFilter) -> Result<Vec<Todo>>;

    /// Insert a new todo with status `active`
    ///
    /// # Returns
    /// * `Ok(i64)` - The store-generated ID
    /// * `Err(TodoError::Database)` - If the insert fails
    async fn create(&self, todo: NewTodo) -> Result<i64>;

    /// Apply the supplied fields to a todo
    ///
    /// The status and the task are written by two independent statements,
    /// status first. A failure on the second leaves the first applied.
    /// Updating a missing ID is not an error.
    ///
    /// # Returns
    /// * `Ok(())` - Every supplied field was written (or none was supplied)
    /// * `Err(TodoError::Database)` - If a statement fails
    async fn update(&self, id: i64, updates: UpdateTodo) -> Result<()>;

    /// Mark a todo as deleted, leaving the row in place
    ///
    /// Idempotent: deleting an already deleted or missing ID succeeds.
    async fn soft_delete(&self, id: i64) -> Result<()>;

    /// Look a todo up by ID regardless of its status
    ///
    /// # Returns
    /// * `Ok(Some(Todo))` - The row if it exists
    /// * `Ok(None)` - If no row has that ID
    /// * `Err(TodoError::Database)` - If the query fails
    async fn get_by_id(&self, id: i64) -> Result<Option<Todo>>;

    /// Verify the store is reachable
    ///
    /// # Returns
    /// * `Ok(())` - A connection was acquired, used and released
    /// * `Err(TodoError::Database)` - The store is unreachable
    async fn health_check(&self) -> Result<()>;
}
