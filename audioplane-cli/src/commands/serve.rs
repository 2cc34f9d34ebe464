//! HTTP server command
//!
//! Runs the catalog JSON API until Ctrl+C or SIGTERM.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use audioplane_core::models::RowLimit;
use audioplane_server::{run_server, ServerConfig};
use clap::Parser;

use super::{connect, load_config};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default from config, else 127.0.0.1:3030)
    #[arg(long, short = 'b', env = "AUDIOPLANE_BIND")]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Rows returned by list routes without ?limit= (1-2000)
    #[arg(long)]
    pub row_limit: Option<i64>,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let app = load_config()?;

    let mut config = ServerConfig::from(&app.server);
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    config.cors_permissive |= args.cors_permissive;
    config.row_limit = args
        .row_limit
        .map(RowLimit::new)
        .unwrap_or_else(|| app.display.row_limit());

    tracing::info!(bind = %config.bind_addr, "Starting audioplane server");

    let db = connect(&app)?;

    run_server(db, config).await.context("Server error")?;

    Ok(())
}
