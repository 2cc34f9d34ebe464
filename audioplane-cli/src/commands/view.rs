//! `audioplane view <view>` - joined and aggregate views

use anyhow::Result;
use audioplane_core::db::{ActivityRepo, AlbumRepo, ArtistRepo, PlaylistRepo, SongRepo};
use audioplane_core::models::{LimitParams, RowLimit};
use audioplane_core::LikeGraph;
use clap::{Parser, ValueEnum};

use super::{connect, load_config};
use crate::ui;

/// Rows in the top-liked chart
const POPULARITY_LIMIT: i64 = 5;
/// Like pairs fed to the network graph
const NETWORK_LIMIT: i64 = 500;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Songs with their producing artist
    SongsWithArtist,
    /// Albums with their recording artist, newest first
    AlbumsWithArtist,
    /// Playlists with the user who created them
    PlaylistsWithCreator,
    /// Songs produced per artist
    ArtistSongCounts,
    /// Songs ranked by likes
    MostLikedSongs,
    /// Liked songs and created playlists per user
    UserActivity,
    /// Album track listings
    AlbumTracks,
    /// Likes, newest first
    LikesFeed,
    /// Likes per song title (top 5 by default)
    Popularity,
    /// User-song like network as nodes and edges
    Network,
    /// Playlist ids and names
    PlaylistChoices,
}

#[derive(Parser, Debug)]
pub struct ViewArgs {
    /// View to show
    #[arg(value_enum)]
    pub view: View,

    /// Maximum rows to show (1-2000)
    #[arg(long, short = 'n')]
    pub limit: Option<i64>,
}

impl ViewArgs {
    fn limit(&self, configured: RowLimit) -> Option<i64> {
        let fallback = match self.view {
            View::Popularity => RowLimit::new(POPULARITY_LIMIT),
            View::Network => RowLimit::new(NETWORK_LIMIT),
            _ => configured,
        };
        LimitParams { limit: self.limit }.resolve(fallback).bound()
    }
}

pub async fn run_view(args: ViewArgs, as_json: bool) -> Result<()> {
    let app = load_config()?;
    let limit = args.limit(app.display.row_limit());
    let db = connect(&app)?;

    match args.view {
        View::SongsWithArtist => {
            ui::print_fetched(
                &ui::with_spinner("Querying", SongRepo::new(&db).list_with_artist(limit)).await,
                as_json,
            )
        }
        View::AlbumsWithArtist => {
            ui::print_fetched(
                &ui::with_spinner("Querying", AlbumRepo::new(&db).list_with_artist(limit)).await,
                as_json,
            )
        }
        View::PlaylistsWithCreator => {
            ui::print_fetched(
                &ui::with_spinner("Querying", PlaylistRepo::new(&db).list_with_creator(limit)).await,
                as_json,
            )
        }
        View::ArtistSongCounts => {
            ui::print_fetched(
                &ui::with_spinner("Querying", ArtistRepo::new(&db).song_counts(limit)).await,
                as_json,
            )
        }
        View::MostLikedSongs => {
            ui::print_fetched(
                &ui::with_spinner("Querying", SongRepo::new(&db).most_liked(limit)).await,
                as_json,
            )
        }
        View::UserActivity => {
            ui::print_fetched(
                &ui::with_spinner("Querying", ActivityRepo::new(&db).user_activity(limit)).await,
                as_json,
            )
        }
        View::AlbumTracks => ui::print_fetched(
            &ui::with_spinner("Querying", AlbumRepo::new(&db).tracks(limit)).await,
            as_json,
        ),
        View::LikesFeed => {
            ui::print_fetched(
                &ui::with_spinner("Querying", ActivityRepo::new(&db).likes_feed(limit)).await,
                as_json,
            )
        }
        View::Popularity => ui::print_fetched(
            &ui::with_spinner("Querying", SongRepo::new(&db).popularity(limit)).await,
            as_json,
        ),
        View::PlaylistChoices => ui::print_fetched(
            &ui::with_spinner("Querying", PlaylistRepo::new(&db).choices()).await,
            as_json,
        ),
        View::Network => {
            let fetched = ui::with_spinner("Querying", ActivityRepo::new(&db).like_edges(limit)).await;
            if let Some(diagnostic) = &fetched.diagnostic {
                ui::print_diagnostic(diagnostic);
            }
            let graph = LikeGraph::from_edges(&fetched.rows);
            if as_json {
                println!("{}", ui::to_json(&graph));
            } else {
                println!(
                    "{} nodes, {} edges (use --json for the full graph)",
                    graph.node_count(),
                    graph.edge_count()
                );
                print!("{}", ui::render_table(&graph.nodes));
            }
        }
    }

    Ok(())
}
