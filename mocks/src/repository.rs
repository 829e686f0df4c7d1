//! Mock implementation of TodoRepository trait
//!
//! Provides a thread-safe in-memory repository with:
//! - Error injection, either for the next call or for one named step
//! - Call tracking for verification
//! - The same list/create/update/delete semantics as the SQL store

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::sync::{
    atomic::{AtomicI64, Ordering},
    Arc,
};
use todo_core::{
    NewTodo, Result, Todo, TodoError, TodoFilter, TodoRepository, UpdateTodo, STATUS_ACTIVE,
    STATUS_DELETED,
};

/// Step names recorded in the call history and accepted by
/// [`MockTodoRepository::inject_error_on`]
pub mod steps {
    pub const LIST: &str = "list";
    pub const CREATE: &str = "create";
    pub const UPDATE_STATUS: &str = "update_status";
    pub const UPDATE_TASK: &str = "update_task";
    pub const SOFT_DELETE: &str = "soft_delete";
    pub const GET_BY_ID: &str = "get_by_id";
    pub const HEALTH_CHECK: &str = "health_check";
}

/// Mock implementation of TodoRepository for testing
///
/// Rows live in a `BTreeMap`, so lists come back in ID order the way a
/// primary-key scan would. Clones share the same rows.
#[derive(Clone)]
pub struct MockTodoRepository {
    todos: Arc<Mutex<BTreeMap<i64, Todo>>>,
    next_id: Arc<AtomicI64>,
    error_injection: Arc<Mutex<Option<TodoError>>>,
    step_errors: Arc<Mutex<HashMap<String, TodoError>>>,
    call_history: Arc<Mutex<Vec<String>>>,
}

impl Default for MockTodoRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTodoRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::with_todos(Vec::new())
    }

    /// Create mock repository with pre-populated rows
    pub fn with_todos(todos: Vec<Todo>) -> Self {
        let max_id = todos.iter().map(|todo| todo.id).max().unwrap_or(0);
        let todos = todos.into_iter().map(|todo| (todo.id, todo)).collect();

        Self {
            todos: Arc::new(Mutex::new(todos)),
            next_id: Arc::new(AtomicI64::new(max_id + 1)),
            error_injection: Arc::new(Mutex::new(None)),
            step_errors: Arc::new(Mutex::new(HashMap::new())),
            call_history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Inject error for next operation
    pub fn inject_error(&self, error: TodoError) {
        *self.error_injection.lock() = Some(error);
    }

    /// Inject an error for the next time a specific step runs (see [`steps`])
    pub fn inject_error_on(&self, step: &str, error: TodoError) {
        self.step_errors.lock().insert(step.to_string(), error);
    }

    /// Clear all injected errors
    pub fn clear_error(&self) {
        *self.error_injection.lock() = None;
        self.step_errors.lock().clear();
    }

    /// Get history of called steps
    pub fn call_history(&self) -> Vec<String> {
        self.call_history.lock().clone()
    }

    /// Clear call history
    pub fn clear_history(&self) {
        self.call_history.lock().clear();
    }

    /// Assert step was called
    pub fn assert_called(&self, step: &str) {
        let history = self.call_history.lock();
        assert!(
            history.iter().any(|call| call.starts_with(step)),
            "Step '{}' was not called. Call history: {:?}",
            step,
            *history
        );
    }

    /// Assert the store was never touched
    pub fn assert_no_calls(&self) {
        let history = self.call_history.lock();
        assert!(
            history.is_empty(),
            "Expected no repository calls, got: {:?}",
            *history
        );
    }

    /// Snapshot of every stored row, deleted ones included
    pub fn all_todos(&self) -> Vec<Todo> {
        self.todos.lock().values().cloned().collect()
    }

    /// Record the step and fail if an error was injected for it
    fn enter(&self, step: &str, params: &str) -> Result<()> {
        self.call_history.lock().push(format!("{step}({params})"));

        if let Some(error) = self.error_injection.lock().take() {
            return Err(error);
        }
        if let Some(error) = self.step_errors.lock().remove(step) {
            return Err(error);
        }
        Ok(())
    }

    fn set_column(&self, id: i64, apply: impl FnOnce(&mut Todo)) {
        if let Some(todo) = self.todos.lock().get_mut(&id) {
            apply(todo);
        }
    }
}

#[async_trait]
impl TodoRepository for MockTodoRepository {
    async fn list(&self, filter: TodoFilter) -> Result<Vec<Todo>> {
        self.enter(steps::LIST, &format!("user_id={}", filter.user_id))?;

        let todos = self.todos.lock();
        Ok(todos
            .values()
            .filter(|todo| filter.matches(todo))
            .cloned()
            .collect())
    }

    async fn create(&self, todo: NewTodo) -> Result<i64> {
        self.enter(steps::CREATE, &format!("user_id={}", todo.user_id))?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.todos.lock().insert(
            id,
            Todo {
                id,
                task: todo.task,
                status: STATUS_ACTIVE.to_string(),
                user_id: todo.user_id,
            },
        );
        Ok(id)
    }

    async fn update(&self, id: i64, updates: UpdateTodo) -> Result<()> {
        if let Some(status) = updates.status {
            self.enter(steps::UPDATE_STATUS, &format!("id={id}"))?;
            self.set_column(id, |todo| todo.status = status);
        }

        if let Some(task) = updates.task {
            self.enter(steps::UPDATE_TASK, &format!("id={id}"))?;
            self.set_column(id, |todo| todo.task = task);
        }

        Ok(())
    }

    async fn soft_delete(&self, id: i64) -> Result<()> {
        self.enter(steps::SOFT_DELETE, &format!("id={id}"))?;
        self.set_column(id, |todo| todo.status = STATUS_DELETED.to_string());
        Ok(())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Todo>> {
        self.enter(steps::GET_BY_ID, &format!("id={id}"))?;
        Ok(self.todos.lock().get(&id).cloned())
    }

    async fn health_check(&self) -> Result<()> {
        self.enter(steps::HEALTH_CHECK, "")
    }
}
