//! switchyard server binary.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request       ┌───────────────────────────────────────────────┐
//!     ─────────────────────┼─▶ http::server (axum, timeout, request id)    │
//!                          │        │                                      │
//!                          │        ▼                                      │
//!                          │   engine (groups → middleware chain)          │
//!                          │        │                                      │
//!                          │        ▼                                      │
//!                          │   routing (per-method segment tree)           │
//!                          │        │                                      │
//!                          │        ▼                                      │
//!     Client Response      │   route handler / static files / 404          │
//!     ◀────────────────────┼── Context response                            │
//!                          └───────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use axum::http::StatusCode;
use clap::Parser;
use tokio::net::TcpListener;

use switchyard::config::{load_config, validate_config, ConfigError, ServerConfig};
use switchyard::middleware::{logger, recovery};
use switchyard::observability::logging;
use switchyard::{Engine, HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "switchyard")]
#[command(about = "HTTP router with group middleware and static file serving", long_about = None)]
struct Cli {
    /// TOML configuration file; defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,
}

fn load(cli: &Cli) -> Result<ServerConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = &cli.bind {
        config.listener.bind_address = bind.clone();
        validate_config(&config).map_err(ConfigError::Validation)?;
    }
    Ok(config)
}

fn build_engine(config: &ServerConfig) -> switchyard::Result<Engine> {
    let mut engine = Engine::new();
    if config.middleware.logger {
        engine.use_middleware([logger()]);
    }
    if config.middleware.recovery {
        engine.use_middleware([recovery()]);
    }

    if let Some(glob) = &config.templates.glob {
        engine.load_templates(glob)?;
        tracing::info!(glob = %glob, "Templates loaded");
    }

    engine.get("/ping", |c| c.string(StatusCode::OK, "pong\n"));
    for mount in &config.statics {
        tracing::info!(prefix = %mount.prefix, root = %mount.root, "Serving static files");
        engine.static_files(&mount.prefix, &mount.root);
    }
    Ok(engine)
}

#[tokio::main]
async fn main() -> switchyard::Result<()> {
    let cli = Cli::parse();
    let config = load(&cli)?;
    logging::init(&config.observability)?;

    tracing::info!("switchyard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        static_mounts = config.statics.len(),
        "Configuration loaded"
    );

    let engine = build_engine(&config)?;
    tracing::info!(routes = engine.routes().len(), "Routes registered");

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let shutdown = Shutdown::new();
    let server = HttpServer::new(engine, config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
