//! Random test data generators using the fake crate

use fake::faker::lorem::en::Sentence;
use fake::Fake;
use rand::Rng;
use todo_core::NewTodo;

/// Generate an owner ID unlikely to collide with rows left by earlier runs
pub fn generate_user_id() -> String {
    let suffix: u64 = rand::thread_rng().gen();
    format!("test-user-{suffix:016x}")
}

/// Generate a short task description
pub fn generate_task() -> String {
    Sentence(2..6).fake()
}

/// Generate a creation request for the given owner
pub fn generate_new_todo(user_id: &str) -> NewTodo {
    NewTodo::new(generate_task(), user_id)
}
