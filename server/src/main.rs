use anyhow::{Context, Result};
use clap::Parser;
use std::{process, time::Instant};
use todo_server::{
    config::{Config, LogFormat},
    create_server, provision,
    telemetry::{init_telemetry, log_startup_info},
};
use tracing::{error, info};

const EXIT_CONFIGURATION: i32 = 1;
const EXIT_SERVE: i32 = 3;

#[derive(Parser)]
#[command(name = "todo-server")]
#[command(about = "Todo HTTP service backed by MySQL")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "CONFIG_FILE")]
    config: Option<String>,

    /// Connection string override
    #[arg(long)]
    database_url: Option<String>,

    /// Listen address override
    #[arg(long)]
    listen_addr: Option<String>,

    /// Listen port override
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level override
    #[arg(long)]
    log_level: Option<String>,

    /// Log format override (pretty, json, compact)
    #[arg(long)]
    log_format: Option<LogFormat>,
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load(cli.config.as_deref())?;

    // CLI overrides win over every other source
    if let Some(ref database_url) = cli.database_url {
        config.database.url = Some(database_url.clone());
    }

    if let Some(ref listen_addr) = cli.listen_addr {
        config.server.listen_addr = listen_addr.clone();
    }

    if let Some(port) = cli.port {
        config.server.port = port;
    }

    if let Some(ref log_level) = cli.log_level {
        config.logging.level = log_level.clone();
    }

    if let Some(log_format) = cli.log_format {
        config.logging.format = log_format;
    }

    Ok(config)
}

#[tokio::main]
async fn main() {
    let started_at = Instant::now();
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    // Telemetry is not up yet, so configuration failures go to stderr
    let config = match load_config(&cli).context("Failed to load configuration") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e:#}");
            process::exit(EXIT_CONFIGURATION);
        }
    };

    if let Err(e) = init_telemetry(&config.logging) {
        eprintln!("{e:#}");
        process::exit(EXIT_CONFIGURATION);
    }

    if let Err(e) = config.validate() {
        error!(error = %e, "Configuration validation failed");
        process::exit(EXIT_CONFIGURATION);
    }

    log_startup_info(&config);

    let provisioned = match provision(&config).await {
        Ok(provisioned) => provisioned,
        Err(e) => {
            error!(error = %e, "Startup failed");
            process::exit(e.exit_code());
        }
    };

    let addr = config.server_address();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, address = %addr, "Failed to bind listener");
            process::exit(EXIT_SERVE);
        }
    };

    let server = create_server(&provisioned, started_at);
    if let Err(e) = server.serve(listener, shutdown_signal()).await {
        error!(error = %e, "Todo server error");
        process::exit(EXIT_SERVE);
    }

    provisioned.repository.close().await;
    info!("Todo server shut down cleanly");
}

/// Resolve on SIGINT or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to register SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
