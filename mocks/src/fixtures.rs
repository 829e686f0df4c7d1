//! Standard test fixtures for consistent testing

use todo_core::{NewTodo, Todo, UpdateTodo, STATUS_ACTIVE, STATUS_DELETED};

/// Create a basic active todo owned by `u1`
pub fn create_test_todo() -> Todo {
    Todo {
        id: 1,
        task: "buy milk".to_string(),
        status: STATUS_ACTIVE.to_string(),
        user_id: "u1".to_string(),
    }
}

/// Create `count` todos spread over three owners, every fourth one deleted
pub fn create_test_todos(count: usize) -> Vec<Todo> {
    (1..=count)
        .map(|i| {
            let status = match i % 4 {
                0 => STATUS_DELETED,
                1 => STATUS_ACTIVE,
                2 => "done",
                _ => "in-progress",
            };
            Todo {
                id: i as i64,
                task: format!("Test todo {i}"),
                status: status.to_string(),
                user_id: format!("user-{}", i % 3 + 1),
            }
        })
        .collect()
}

/// Create a valid creation request
pub fn create_new_todo() -> NewTodo {
    NewTodo::new("buy milk", "u1")
}

/// Create an update that only changes the status
pub fn create_status_update(status: &str) -> UpdateTodo {
    UpdateTodo {
        status: Some(status.to_string()),
        task: None,
    }
}

/// Create an update that only changes the task text
pub fn create_task_update(task: &str) -> UpdateTodo {
    UpdateTodo {
        status: None,
        task: Some(task.to_string()),
    }
}
