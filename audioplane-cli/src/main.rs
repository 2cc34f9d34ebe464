//! audioplane CLI - music catalog browser and editor
//!
//! Provides:
//! - Flat table listings (`list`) and joined/aggregate views (`view`)
//! - Insert/update/delete for users, artists, songs and playlists
//! - Playlist song listings and catalog stats
//! - The JSON HTTP API (`serve`, with the `server` feature)
//!
//! Store credentials come from PG* environment variables, `./.env` or
//! `~/.audioplane/.env`.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

mod commands;
mod tracing_setup;
mod ui;

#[derive(Parser, Debug)]
#[command(
    name = "audioplane",
    author,
    version,
    about = "Browse and edit the Audioplane music catalog",
    long_about = "List catalog tables and views, edit users, artists, songs and playlists, \
                  and serve the catalog as a JSON API. Connection settings are read from \
                  PGHOST, PGPORT, PGDATABASE, PGUSER, PGPASSWORD, PGSSLMODE and PGSCHEMA."
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Export traces over OTLP (requires the `telemetry` feature)
    #[arg(long, global = true)]
    otel: bool,

    /// Suppress progress spinners (for script consumption)
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    /// Print results as JSON instead of a table
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List rows of a catalog table
    List(commands::list::ListArgs),
    /// Show a joined or aggregate view
    View(commands::view::ViewArgs),
    /// Insert, update or delete users
    Users(commands::crud::UsersArgs),
    /// Insert, update or delete artists
    Artists(commands::crud::ArtistsArgs),
    /// Insert, update or delete songs
    Songs(commands::crud::SongsArgs),
    /// Insert, update or delete playlists
    Playlists(commands::crud::PlaylistsArgs),
    /// Songs saved on a playlist, in order
    PlaylistSongs(commands::crud::PlaylistSongsArgs),
    /// Average playlist size and most liked songs
    Stats,
    /// Run the JSON HTTP API
    #[cfg(feature = "server")]
    Serve(commands::serve::ServeArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig {
        debug: cli.debug,
        otel: cli.otel,
    })
    .ok();
    ui::init_quiet_mode(cli.quiet);

    let json = cli.json;
    let result = match cli.command {
        Commands::List(args) => commands::run_list(args, json).await,
        Commands::View(args) => commands::run_view(args, json).await,
        Commands::Users(args) => commands::run_users(args, json).await,
        Commands::Artists(args) => commands::run_artists(args, json).await,
        Commands::Songs(args) => commands::run_songs(args, json).await,
        Commands::Playlists(args) => commands::run_playlists(args, json).await,
        Commands::PlaylistSongs(args) => commands::run_playlist_songs(args, json).await,
        Commands::Stats => commands::run_stats(json).await,
        #[cfg(feature = "server")]
        Commands::Serve(args) => commands::run_serve(args).await,
        Commands::Completions(args) => run_completions(args),
    };

    tracing_setup::shutdown_otel();
    result
}

fn run_completions(args: CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}
