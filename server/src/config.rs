use anyhow::{anyhow, Context, Result};
use config::{Config as ConfigBuilder, Environment, File, FileFormat, Map};
use database::{ConnectionSettings, PoolSettings};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Prefix of structured environment overrides, e.g. `TODO__SERVER__PORT`
pub const ENV_PREFIX: &str = "TODO";

/// Variables standing in for the process environment
pub type EnvironmentMap = Map<String, String>;

const URL_ALIASES: &[&str] = &["MYSQL_URL", "MYSQL_PUBLIC_URL", "DATABASE_URL"];
const HOST_ALIASES: &[&str] = &["MYSQL_HOST", "MYSQLHOST"];
const USER_ALIASES: &[&str] = &["MYSQL_USER", "MYSQLUSER"];
const PASSWORD_ALIASES: &[&str] = &["MYSQL_PASSWORD", "MYSQLPASSWORD"];
const DATABASE_ALIASES: &[&str] = &["MYSQL_DATABASE", "MYSQLDATABASE"];
const DB_PORT_ALIASES: &[&str] = &["MYSQL_PORT", "MYSQLPORT"];

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    /// Full connection string; wins over the discrete parts unless it is an
    /// unresolved placeholder
    pub url: Option<String>,
    pub host: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    /// Schema name
    pub name: Option<String>,
    pub port: Option<u16>,
    /// Maximum number of database connections in the pool
    pub max_connections: u32,
    /// Connection acquire timeout in seconds
    pub connection_timeout: u64,
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url.as_deref().map(database::redact_url))
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("name", &self.name)
            .field("port", &self.port)
            .field("max_connections", &self.max_connections)
            .field("connection_timeout", &self.connection_timeout)
            .finish()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    /// Listen address for the HTTP server
    pub listen_addr: String,
    /// Port number to listen on
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (pretty, json, compact)
    pub format: LogFormat,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
    Compact,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            "compact" => Ok(LogFormat::Compact),
            other => Err(anyhow!(
                "Invalid log format: {other}. Must be one of: pretty, json, compact"
            )),
        }
    }
}

impl Config {
    /// Load configuration from the process environment and an optional file
    pub fn load(config_file: Option<&str>) -> Result<Self> {
        Self::load_from(config_file, None, |name| env::var(name).ok())
    }

    /// Load configuration with explicit environment sources
    ///
    /// `environment` replaces the process environment for `TODO__*`
    /// overrides when given; `lookup` resolves the well-known aliases.
    pub fn load_from<F>(
        config_file: Option<&str>,
        environment: Option<EnvironmentMap>,
        lookup: F,
    ) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = ConfigBuilder::builder();

        // Start with default configuration
        builder = builder.add_source(File::from_str(
            include_str!("../config/default.toml"),
            FileFormat::Toml,
        ));

        if let Some(config_file) = config_file {
            builder = builder.add_source(File::with_name(config_file).format(FileFormat::Toml));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .source(environment),
        );

        let config = builder
            .build()
            .context("Failed to build configuration")?;

        let mut result: Config = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        result.apply_env_aliases(lookup)?;

        Ok(result)
    }

    /// Apply the well-known deployment variables (`MYSQL_URL`, `PORT`, ...)
    ///
    /// For each setting the first alias with a non-blank value wins.
    pub fn apply_env_aliases<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |names: &[&str]| -> Option<(String, String)> {
            names.iter().find_map(|name| {
                lookup(name)
                    .filter(|value| !value.trim().is_empty())
                    .map(|value| (name.to_string(), value))
            })
        };

        if let Some((_, url)) = first(URL_ALIASES) {
            self.database.url = Some(url);
        }
        if let Some((_, host)) = first(HOST_ALIASES) {
            self.database.host = Some(host);
        }
        if let Some((_, user)) = first(USER_ALIASES) {
            self.database.user = Some(user);
        }
        if let Some((_, password)) = first(PASSWORD_ALIASES) {
            self.database.password = Some(password);
        }
        if let Some((_, name)) = first(DATABASE_ALIASES) {
            self.database.name = Some(name);
        }
        if let Some((name, port)) = first(DB_PORT_ALIASES) {
            self.database.port = Some(parse_port(&name, &port)?);
        }
        if let Some((name, port)) = first(&["PORT"]) {
            self.server.port = parse_port(&name, &port)?;
        }
        if let Some((_, listen_addr)) = first(&["LISTEN_ADDR"]) {
            self.server.listen_addr = listen_addr;
        }
        if let Some((_, level)) = first(&["LOG_LEVEL"]) {
            self.logging.level = level;
        }
        if let Some((_, format)) = first(&["LOG_FORMAT"]) {
            self.logging.format = format.parse()?;
        }

        Ok(())
    }

    /// Connection inputs handed to the database provisioner
    pub fn connection_settings(&self) -> ConnectionSettings {
        ConnectionSettings {
            url: self.database.url.clone(),
            host: self.database.host.clone(),
            user: self.database.user.clone(),
            password: self.database.password.clone(),
            database: self.database.name.clone(),
            port: self.database.port,
        }
    }

    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.database.max_connections,
            acquire_timeout: Duration::from_secs(self.database.connection_timeout),
        }
    }

    /// Get the server socket address
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.listen_addr, self.server.port)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(anyhow!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    self.logging.level
                ));
            }
        }

        if self.server.port == 0 {
            return Err(anyhow!("Server port cannot be 0"));
        }

        if self.database.max_connections == 0 {
            return Err(anyhow!("Database max_connections must be greater than 0"));
        }

        if self.database.connection_timeout == 0 {
            return Err(anyhow!("Database connection_timeout must be greater than 0"));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: None,
                host: None,
                user: None,
                password: None,
                name: None,
                port: None,
                max_connections: 10,
                connection_timeout: 10,
            },
            server: ServerConfig {
                listen_addr: "0.0.0.0".to_string(),
                port: 5000,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: LogFormat::Compact,
            },
        }
    }
}

fn parse_port(name: &str, value: &str) -> Result<u16> {
    value
        .trim()
        .parse::<u16>()
        .with_context(|| format!("{name} must be a port number, got '{value}'"))
}
