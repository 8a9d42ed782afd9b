//! Youth Registry - HTTP endpoint for the registry of youth organizations
//!
//! Serves the registry resource (list/create/update/delete on a single path)
//! backed by SQLite, plus health checks.

use std::env;
use std::net::SocketAddr;

use anyhow::{Context, Result};
use tracing::info;

use youth_registry::{api, db, logging, AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        print_help();
        return Ok(());
    }

    if args.iter().any(|arg| arg == "--version" || arg == "-V") {
        println!("Youth Registry {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Load configuration first (before logging, so we know log format)
    let config = AppConfig::load().context("Failed to load configuration")?;

    // The guard must be kept alive so file logs are flushed
    let _log_guard = logging::init_logging(&config.logging);

    info!("Youth Registry starting up");

    ensure_data_directory(&config)?;

    info!("Initializing database connection");
    let db = db::init_pool(&config.database)
        .await
        .context("Failed to initialize database")?;

    let state = AppState {
        config: config.clone(),
        db,
    };

    let app = api::create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address configuration")?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(
        "Registry endpoint listening on http://{}{}",
        addr, config.server.base_path
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Youth Registry stopped");

    Ok(())
}

/// Ensure the directory holding the SQLite file exists
fn ensure_data_directory(config: &AppConfig) -> Result<()> {
    let url = &config.database.url;
    let path = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"));

    if let Some(path) = path {
        let path = path.split('?').next().unwrap_or(path);
        if path == ":memory:" {
            return Ok(());
        }
        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).context("Failed to create data directory")?;
                info!("Created data directory: {:?}", parent);
            }
        }
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

fn print_help() {
    println!(
        r#"Youth Registry {}

Registry endpoint for youth organizations.

USAGE:
    youth-registry [OPTIONS]

OPTIONS:
    -h, --help       Print this help message
    -V, --version    Print version

ENVIRONMENT:
    YOUTH_REGISTRY_CONFIG       Path to the YAML configuration file
    YOUTH_REGISTRY_HOST         Listen address (default 127.0.0.1)
    YOUTH_REGISTRY_PORT         Listen port (default 5051)
    YOUTH_REGISTRY_LOG_LEVEL    Log level (default info)
    DATABASE_URL                SQLite URL (default sqlite://./data/youth-registry.db)
    RUST_LOG                    Overrides the log filter
"#,
        env!("CARGO_PKG_VERSION")
    );
}
