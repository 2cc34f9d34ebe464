//! Command implementations for the audioplane CLI

pub mod crud;
pub mod list;
#[cfg(feature = "server")]
pub mod serve;
pub mod stats;
pub mod view;

use anyhow::{Context, Result};
use audioplane_core::config::{load_dotenv, AppConfig, DbConfig};
use audioplane_core::Database;

pub use crud::{run_artists, run_playlist_songs, run_playlists, run_songs, run_users};
pub use list::run_list;
#[cfg(feature = "server")]
pub use serve::run_serve;
pub use stats::run_stats;
pub use view::run_view;

/// Load `.env` files and `~/.audioplane/config.toml`.
pub fn load_config() -> Result<AppConfig> {
    load_dotenv();
    AppConfig::load().context("Failed to load ~/.audioplane/config.toml")
}

/// Build the store handle. Missing or invalid settings are fatal; an
/// unreachable store is not, its failures surface per command as diagnostics.
pub fn connect(app: &AppConfig) -> Result<Database> {
    let config = DbConfig::from_env()
        .context("Database settings incomplete. Set PGDATABASE, PGUSER and PGPASSWORD (environment, ./.env or ~/.audioplane/.env)")?
        .with_tuning(&app.database)
        .context("Invalid [database] section in ~/.audioplane/config.toml")?;
    tracing::debug!(?config, "opening pool");

    Ok(Database::connect(&config))
}
