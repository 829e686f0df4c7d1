use serde::{Deserialize, Serialize};

/// Status assigned to every newly created todo.
pub const STATUS_ACTIVE: &str = "active";

/// Status marking a todo as soft-deleted.
pub const STATUS_DELETED: &str = "deleted";

/// A single todo row as stored in the `todos` table.
///
/// `status` is deliberately a free-form string: apart from the two values the
/// service assigns itself ([`STATUS_ACTIVE`] on creation, [`STATUS_DELETED`]
/// on soft delete) callers may store any value through an update.
///
/// # Examples
///
/// ```rust
/// use todo_core::models::{Todo, STATUS_ACTIVE};
///
/// let todo = Todo {
///     id: 7,
///     task: "buy milk".to_string(),
///     status: STATUS_ACTIVE.to_string(),
///     user_id: "u1".to_string(),
/// };
///
/// assert!(todo.is_active());
/// assert!(!todo.is_deleted());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    /// Store-generated primary key
    pub id: i64,
    /// What needs doing
    pub task: String,
    /// Current status (`active`, `deleted`, or any caller-supplied value)
    pub status: String,
    /// Owner of the row, fixed at creation
    pub user_id: String,
}

impl Todo {
    /// Whether the row is still in its initial `active` status
    pub fn is_active(&self) -> bool {
        self.status == STATUS_ACTIVE
    }

    /// Whether the row has been soft-deleted
    pub fn is_deleted(&self) -> bool {
        self.status == STATUS_DELETED
    }

    /// Whether the row shows up in list results
    pub fn is_listable(&self) -> bool {
        !self.is_deleted()
    }
}

/// Data transfer object for creating a todo.
///
/// There is no status field: every new row starts out as [`STATUS_ACTIVE`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTodo {
    pub task: String,
    pub user_id: String,
}

impl NewTodo {
    pub fn new(task: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            user_id: user_id.into(),
        }
    }
}

/// Data transfer object for updating a todo.
///
/// Each field is applied on its own, and only when present.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct UpdateTodo {
    pub status: Option<String>,
    pub task: Option<String>,
}

impl UpdateTodo {
    /// An update that touches no column
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.task.is_none()
    }
}

/// Criteria for listing todos.
///
/// Deleted rows are always excluded; `status` narrows the result further.
/// Asking for `status = "deleted"` therefore yields nothing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoFilter {
    pub user_id: String,
    pub status: Option<String>,
}

impl TodoFilter {
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Apply the list predicate to an in-memory row
    pub fn matches(&self, todo: &Todo) -> bool {
        todo.user_id == self.user_id
            && todo.is_listable()
            && self
                .status
                .as_deref()
                .map_or(true, |status| todo.status == status)
    }
}
