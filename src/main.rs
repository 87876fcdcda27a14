//! mvc-router demo server.
//!
//! # Architecture Overview
//!
//! ```text
//!   startup:  config ──▶ ControllerScanner ──▶ HandlerRegistry (frozen) ──▶ Dispatcher
//!
//!   request:  client ──▶ axum ──▶ Dispatcher ──▶ HandlerExecution ──▶ ModelAndView ──▶ JSON
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::net::TcpListener;

use mvc_router::config::{load_config, validate_config, ConfigError, MvcConfig};
use mvc_router::lifecycle::{build_application, signals, startup, Shutdown};
use mvc_router::observability::logging;
use mvc_router::{demo, HttpServer};

#[derive(Parser)]
#[command(name = "mvc-router")]
#[command(about = "Serve the demo controllers through the handler mapping", long_about = None)]
struct Cli {
    /// Path to a TOML config file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,
    /// Print every registered handler key and exit
    Routes,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => MvcConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    logging::init_logging(&config.observability)?;
    tracing::info!("mvc-router v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        base_packages = ?config.scan.base_packages,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let app = build_application(&config, &demo::catalog())?;

    if let Some(Commands::Routes) = cli.command {
        let mut keys = app.mapping.handler_keys();
        keys.sort();
        for key in keys {
            println!("{:<8} {}", key.method(), key.url());
        }
        return Ok(());
    }

    startup::start_metrics(&config)?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(&config, app.dispatcher);
    let server_shutdown = shutdown.subscribe();
    let server_task = tokio::spawn(server.run(listener, server_shutdown));

    signals::trigger_on_signal(&shutdown).await;
    server_task.await??;

    tracing::info!("Shutdown complete");
    Ok(())
}
