use crate::{
    error::{Result, TodoError},
    models::{NewTodo, TodoFilter, UpdateTodo},
};

/// Validation utilities for incoming todo requests.
///
/// A field counts as missing when it is absent or blank after trimming.
/// Values that pass are kept exactly as supplied.
pub struct TodoValidator;

impl TodoValidator {
    /// Require a field to be present and non-blank
    ///
    /// # Arguments
    /// * `field` - Field name used in the error message
    /// * `value` - The raw value, if any
    ///
    /// # Returns
    /// * `Ok(String)` - The supplied value
    /// * `Err(TodoError::Validation)` - `"<field> is required"`
    pub fn require(field: &str, value: Option<String>) -> Result<String> {
        match value {
            Some(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(TodoError::missing_field(field)),
        }
    }

    /// Treat a blank optional field as absent
    pub fn optional(value: Option<String>) -> Option<String> {
        value.filter(|value| !value.trim().is_empty())
    }

    /// Parse a todo ID taken from a request path
    ///
    /// # Returns
    /// * `Ok(i64)` - The parsed identifier
    /// * `Err(TodoError::Validation)` - If the ID is blank or not an integer
    pub fn parse_id(raw: &str) -> Result<i64> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(TodoError::missing_field("id"));
        }

        raw.parse::<i64>()
            .map_err(|_| TodoError::Validation("id must be an integer".to_string()))
    }

    /// Validate the inputs of a list request
    pub fn validate_filter(user_id: Option<String>, status: Option<String>) -> Result<TodoFilter> {
        let user_id = Self::require("user_id", user_id)?;
        Ok(TodoFilter {
            user_id,
            status: Self::optional(status),
        })
    }

    /// Validate the inputs of a create request
    ///
    /// `user_id` is checked before `task`, so a request missing both reports
    /// the owner first.
    pub fn validate_new_todo(task: Option<String>, user_id: Option<String>) -> Result<NewTodo> {
        let user_id = Self::require("user_id", user_id)?;
        let task = Self::require("task", task)?;
        Ok(NewTodo { task, user_id })
    }

    /// Validate the inputs of an update request.
    ///
    /// Never fails: blank fields are simply dropped, and an update with no
    /// fields left is a valid no-op.
    pub fn validate_update(status: Option<String>, task: Option<String>) -> UpdateTodo {
        UpdateTodo {
            status: Self::optional(status),
            task: Self::optional(task),
        }
    }
}
