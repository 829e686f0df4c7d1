use database::{ConnectionSource, MySqlTodoRepository};
use std::{sync::Arc, time::Instant};
use thiserror::Error;
use todo_api::TodoServer;
use todo_core::TodoError;
use tracing::info;

use crate::config::Config;

/// Why the service could not get to the point of accepting traffic
#[derive(Debug, Error)]
pub enum StartupError {
    /// Connection inputs are missing or malformed
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The store was configured but could not be reached
    #[error("Database connectivity error: {0}")]
    Connectivity(String),
}

impl StartupError {
    /// Process exit code for this failure
    pub fn exit_code(&self) -> i32 {
        match self {
            StartupError::Configuration(_) => 1,
            StartupError::Connectivity(_) => 2,
        }
    }
}

impl From<TodoError> for StartupError {
    fn from(err: TodoError) -> Self {
        match err {
            TodoError::Configuration(message) => StartupError::Configuration(message),
            other => StartupError::Connectivity(other.to_string()),
        }
    }
}

/// A verified store handle, ready to be served
#[derive(Debug, Clone)]
pub struct Provisioned {
    pub repository: Arc<MySqlTodoRepository>,
}

/// Resolve the connection source, build the pool and prove it is reachable
///
/// Never exits the process; the caller decides what a failure means.
pub async fn provision(config: &Config) -> Result<Provisioned, StartupError> {
    info!("Provisioning database connection");

    let source = ConnectionSource::resolve(&config.connection_settings())?;
    let repository = MySqlTodoRepository::connect(&source, config.pool_settings()).await?;

    info!(source = %source.describe(), "Database connection verified");

    Ok(Provisioned {
        repository: Arc::new(repository),
    })
}

/// Create the HTTP server around a provisioned store
///
/// Health uptime counts from `started_at`, normally the start of the process.
pub fn create_server(
    provisioned: &Provisioned,
    started_at: Instant,
) -> TodoServer<MySqlTodoRepository> {
    info!("Creating todo server");
    TodoServer::new(provisioned.repository.clone()).with_start_time(started_at)
}
