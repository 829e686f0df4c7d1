use thiserror::Error;

/// Result type alias for todo operations
pub type Result<T> = std::result::Result<T, TodoError>;

/// Error types for the todo service.
///
/// Each variant maps to the HTTP status code an API layer should answer with.
///
/// # Examples
///
/// ```rust
/// use todo_core::error::TodoError;
///
/// let missing = TodoError::missing_field("user_id");
/// assert!(missing.is_validation());
/// assert_eq!(missing.status_code(), 400);
///
/// let db = TodoError::Database("connection reset".to_string());
/// assert_eq!(db.status_code(), 500);
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TodoError {
    /// A required request field is absent or malformed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Database operation error
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl TodoError {
    /// Create a validation error for a required field that was not supplied
    pub fn missing_field(field: &str) -> Self {
        Self::Validation(format!("{field} is required"))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, TodoError::Validation(_))
    }

    pub fn is_database(&self) -> bool {
        matches!(self, TodoError::Database(_))
    }

    /// Convert to appropriate HTTP status code equivalent
    pub fn status_code(&self) -> u16 {
        match self {
            TodoError::Validation(_) => 400,
            TodoError::Database(_) | TodoError::Configuration(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = TodoError::missing_field("task");
        assert_eq!(error, TodoError::Validation("task is required".to_string()));
        assert_eq!(error.status_code(), 400);
    }

    #[test]
    fn test_error_display() {
        let error = TodoError::Database("timed out".to_string());
        assert_eq!(format!("{error}"), "Database error: timed out");

        let error = TodoError::Validation("id is required".to_string());
        assert_eq!(format!("{error}"), "Validation error: id is required");
    }

    #[test]
    fn test_error_predicates() {
        assert!(TodoError::Database("x".to_string()).is_database());
        assert!(!TodoError::Configuration("x".to_string()).is_database());
        assert!(TodoError::Validation("x".to_string()).is_validation());
        assert!(!TodoError::Database("x".to_string()).is_validation());
        assert_eq!(TodoError::Configuration("x".to_string()).status_code(), 500);
    }
}
