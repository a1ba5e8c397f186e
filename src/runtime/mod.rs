use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

mod app;
mod listener;
mod shutdown;

use self::app::build_state;
use self::listener::{bind_listener, maybe_write_addr_file};
use self::shutdown::shutdown_signal;

use crate::routes::app_router;

#[derive(Parser)]
#[command(name = "taskdeck-server")]
#[command(about = "Multi-user to-do list service", long_about = None)]
pub(crate) struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8080")]
    pub(crate) addr: SocketAddr,

    /// Write bound address to this file (dev/test convenience)
    #[arg(long)]
    pub(crate) addr_file: Option<PathBuf>,

    /// Data directory
    #[arg(long, default_value = "./taskdeck-data")]
    pub(crate) data_dir: PathBuf,

    /// Shared secret used to sign and verify bearer tokens
    #[arg(long)]
    pub(crate) jwt_secret: String,

    /// Access token validity in seconds
    #[arg(long, default_value_t = 3 * 24 * 60 * 60)]
    pub(crate) access_ttl_secs: i64,

    /// Refresh token validity in seconds
    #[arg(long, default_value_t = 7 * 24 * 60 * 60)]
    pub(crate) refresh_ttl_secs: i64,
}

pub(crate) async fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    std::fs::create_dir_all(&args.data_dir)
        .with_context(|| format!("create data dir {}", args.data_dir.display()))?;

    let state = build_state(&args)?;
    let app = app_router(state);

    let listener = bind_listener(args.addr).await?;
    let local_addr = listener.local_addr().context("read listener local addr")?;
    tracing::info!(%local_addr, "taskdeck-server listening");
    maybe_write_addr_file(args.addr_file.as_ref(), local_addr)?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}
