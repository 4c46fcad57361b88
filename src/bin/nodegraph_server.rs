//! nodegraph-server - runs the node graph API
//!
//! Usage:
//!   nodegraph-server [DB FLAGS] serve [--listen 0.0.0.0:8080]
//!   nodegraph-server [DB FLAGS] invoke [--event event.json]
//!   nodegraph-server --ephemeral serve
//!
//! Database flags fall back to DB_HOST, DB_PORT, DB_USER, DB_PASSWORD, DB_NAME.
//! `serve` runs the long-lived HTTP server. `invoke` handles one
//! API-gateway proxy event (file or stdin) and prints the proxy response.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::io::AsyncReadExt;
use tracing::info;
use tracing_subscriber::EnvFilter;

use nodegraph::{gateway, http, DbConfig, GraphService, GraphStore, MemoryStore, MySqlStore};

#[derive(Parser, Debug)]
#[command(name = "nodegraph-server", version, about = "Node graph persistence API")]
struct Cli {
    #[command(flatten)]
    db: DbConfig,

    /// Keep nodes in process memory instead of MySQL (lost on exit)
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server
    Serve {
        /// Address to listen on
        #[arg(long, env = "NODEGRAPH_LISTEN", default_value = "0.0.0.0:8080")]
        listen: SocketAddr,
    },
    /// Handle one API-gateway proxy event and print the response
    Invoke {
        /// Event file; stdin when omitted
        #[arg(long)]
        event: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries gateway responses, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!("Starting nodegraph-server v{}", env!("CARGO_PKG_VERSION"));

    let store = open_store(&cli).await?;
    let service = GraphService::new(store.clone());

    let outcome = match cli.command {
        Command::Serve { listen } => run_server(listen, service).await,
        Command::Invoke { event } => run_invoke(event, &service).await,
    };

    store.close().await;
    info!(backend = store.backend(), "Store closed");

    outcome
}

/// Open the shared store. A failed connectivity check aborts startup.
async fn open_store(cli: &Cli) -> anyhow::Result<Arc<dyn GraphStore>> {
    if cli.ephemeral {
        info!("Using ephemeral in-memory store");
        return Ok(Arc::new(MemoryStore::new()));
    }

    info!("Connecting to mysql://{}", cli.db.display_target());
    let store = MySqlStore::connect_with(cli.db.connect_options())
        .await
        .context("Database is not accessible")?;
    info!("Database connection established");

    Ok(Arc::new(store))
}

async fn run_server(listen: SocketAddr, service: GraphService) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .with_context(|| format!("failed to bind {}", listen))?;

    http::serve(listener, service, shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Server stopped");
    Ok(())
}

async fn run_invoke(event: Option<PathBuf>, service: &GraphService) -> anyhow::Result<()> {
    let raw = match event {
        Some(path) => tokio::fs::read(&path)
            .await
            .with_context(|| format!("failed to read event {:?}", path))?,
        None => {
            let mut buf = Vec::new();
            tokio::io::stdin()
                .read_to_end(&mut buf)
                .await
                .context("failed to read event from stdin")?;
            buf
        }
    };

    let response = gateway::handle_json(service, &raw)
        .await
        .context("invalid gateway event")?;
    println!("{}", response);
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!("failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Received shutdown signal, draining connections");
}
