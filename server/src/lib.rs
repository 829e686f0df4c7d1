//! Todo Server Library
//!
//! Configuration loading, telemetry, and store provisioning for the todo
//! HTTP service. The binary in `main.rs` wires these together.

pub mod config;
pub mod setup;
pub mod telemetry;

pub use config::Config;
pub use setup::{create_server, provision, Provisioned, StartupError};
pub use telemetry::init_telemetry;
