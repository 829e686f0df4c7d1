use sqlx::{mysql::MySqlRow, MySql, QueryBuilder, Row};
use todo_core::{
    error::{Result, TodoError},
    models::{Todo, TodoFilter, STATUS_DELETED},
};

/// Columns selected for every todo read
pub const TODO_COLUMNS: &str = "id, task, status, user_id";

/// Convert a MySQL row to the Todo model
///
/// `id` may be declared signed or unsigned, and `user_id` may be a numeric
/// column; both are accepted.
pub fn row_to_todo(row: &MySqlRow) -> Result<Todo> {
    let id = match row.try_get::<i64, _>("id") {
        Ok(id) => id,
        Err(_) => id_from_u64(row.try_get("id").map_err(sqlx_error_to_todo_error)?)?,
    };

    let user_id = row
        .try_get::<String, _>("user_id")
        .or_else(|_| row.try_get::<i64, _>("user_id").map(|id| id.to_string()))
        .map_err(sqlx_error_to_todo_error)?;

    Ok(Todo {
        id,
        task: row.try_get("task").map_err(sqlx_error_to_todo_error)?,
        status: row.try_get("status").map_err(sqlx_error_to_todo_error)?,
        user_id,
    })
}

/// Narrow an unsigned store ID to the model's `i64`
pub fn id_from_u64(id: u64) -> Result<i64> {
    i64::try_from(id).map_err(|_| TodoError::Database(format!("Todo ID {id} is out of range")))
}

/// Convert SQLx error to TodoError
pub fn sqlx_error_to_todo_error(err: sqlx::Error) -> TodoError {
    match &err {
        sqlx::Error::Configuration(cause) => {
            TodoError::Configuration(format!("Invalid database configuration: {cause}"))
        }
        sqlx::Error::Database(db_err) => {
            TodoError::Database(format!("Database error: {}", db_err.message()))
        }
        sqlx::Error::PoolTimedOut => TodoError::Database("Connection pool timeout".to_string()),
        sqlx::Error::PoolClosed => TodoError::Database("Connection pool closed".to_string()),
        sqlx::Error::Io(io_err) => TodoError::Database(format!("Database I/O error: {io_err}")),
        sqlx::Error::Tls(tls_err) => TodoError::Database(format!("Database TLS error: {tls_err}")),
        sqlx::Error::ColumnNotFound(column) => {
            TodoError::Database(format!("Column not found in todos table: {column}"))
        }
        _ => TodoError::Database(format!("Database operation failed: {err}")),
    }
}

/// Build the list query for one owner.
///
/// Deleted rows are excluded unconditionally; a status filter is ANDed on
/// top, so a filter of `deleted` matches nothing.
pub fn build_list_query(filter: &TodoFilter) -> QueryBuilder<'_, MySql> {
    let mut query_builder: QueryBuilder<MySql> =
        QueryBuilder::new(format!("SELECT {TODO_COLUMNS} FROM todos WHERE user_id = "));
    query_builder.push_bind(&filter.user_id);
    query_builder.push(format!(" AND status != '{STATUS_DELETED}'"));

    if let Some(ref status) = filter.status {
        query_builder.push(" AND status = ");
        query_builder.push_bind(status);
    }

    query_builder
}
