//! vpsd — the VPS inventory daemon.
//!
//! Single binary that assembles the service: record store (redb),
//! configured resource limits, and the REST API.
//!
//! # Usage
//!
//! ```text
//! vpsd serve --port 8000 --data-dir /var/lib/vpsd [--limits limits.toml]
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use vps_core::VpsLimits;

#[derive(Parser)]
#[command(name = "vpsd", about = "VPS inventory daemon")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the REST API.
    Serve {
        /// Port to listen on.
        #[arg(long, default_value = "8000")]
        port: u16,

        /// Data directory for persistent state.
        #[arg(long, default_value = "/var/lib/vpsd")]
        data_dir: PathBuf,

        /// Resource limits file (TOML). Built-in defaults when omitted.
        #[arg(long)]
        limits: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,vpsd=debug,vps=debug".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            port,
            data_dir,
            limits,
        } => run_serve(port, data_dir, limits).await,
    }
}

async fn run_serve(port: u16, data_dir: PathBuf, limits: Option<PathBuf>) -> anyhow::Result<()> {
    info!("vpsd starting");

    // Resource limits: file if given, built-in defaults otherwise.
    let limits = match limits {
        Some(path) => {
            let loaded = VpsLimits::from_file(&path)?;
            info!(path = ?path, "resource limits loaded");
            loaded
        }
        None => {
            info!("using default resource limits");
            VpsLimits::default()
        }
    };

    // Ensure data directory exists.
    std::fs::create_dir_all(&data_dir)?;
    let db_path = data_dir.join("vpsd.redb");

    // Record store.
    let store = vps_state::RecordStore::open(&db_path)?;
    info!(path = ?db_path, "record store opened");

    // ── Start API server ───────────────────────────────────────

    let router = vps_api::build_router(store, limits);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!(%addr, "API server starting");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Graceful shutdown on Ctrl-C.
    let server = axum::serve(listener, router).with_graceful_shutdown(async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
        info!("shutdown signal received");
    });

    server.await?;

    info!("vpsd stopped");
    Ok(())
}
