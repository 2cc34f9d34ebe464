//! Insert/update/delete subcommands for the editable entities
//!
//! Input is validated before the store is contacted, so a bad id or date
//! fails fast without credentials.

use anyhow::{Context, Result};
use audioplane_core::db::{ArtistRepo, PlaylistRepo, SongRepo, UserRepo};
use audioplane_core::models::{
    ArtistForm, EntityId, NewArtist, NewPlaylist, NewSong, NewUser, PlaylistForm, SongForm,
    UserForm,
};
use clap::{Parser, Subcommand};

use super::{connect, load_config};
use crate::ui;

// === Users ===

#[derive(Parser, Debug)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub command: UsersCommand,
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    /// Add a user
    Insert {
        /// Display name
        #[arg(long)]
        username: String,
    },
    /// Rename a user
    Update {
        /// User ID
        id: EntityId,
        /// New display name
        #[arg(long)]
        username: String,
    },
    /// Delete a user
    Delete {
        /// User ID
        id: EntityId,
    },
}

pub async fn run_users(args: UsersArgs, as_json: bool) -> Result<()> {
    match args.command {
        UsersCommand::Insert { username } => {
            let user = NewUser::try_from(UserForm { username }).context("Invalid user")?;
            let db = connect(&load_config()?)?;
            ui::print_mutated(
                &ui::with_spinner("Writing", UserRepo::new(&db).insert(&user)).await,
                as_json,
            );
        }
        UsersCommand::Update { id, username } => {
            let user = NewUser::try_from(UserForm { username }).context("Invalid user")?;
            let db = connect(&load_config()?)?;
            ui::print_mutated(
                &ui::with_spinner("Writing", UserRepo::new(&db).update(id, &user)).await,
                as_json,
            );
        }
        UsersCommand::Delete { id } => {
            let db = connect(&load_config()?)?;
            ui::print_mutated(
                &ui::with_spinner("Writing", UserRepo::new(&db).delete(id)).await,
                as_json,
            );
        }
    }
    Ok(())
}

// === Artists ===

#[derive(Parser, Debug)]
pub struct ArtistsArgs {
    #[command(subcommand)]
    pub command: ArtistsCommand,
}

#[derive(Parser, Debug)]
pub struct ArtistFields {
    /// Artist name
    #[arg(long)]
    pub name: String,
    /// Where the artist is based (omit or leave blank for none)
    #[arg(long)]
    pub location: Option<String>,
}

impl TryFrom<ArtistFields> for NewArtist {
    type Error = anyhow::Error;

    fn try_from(fields: ArtistFields) -> Result<Self> {
        NewArtist::try_from(ArtistForm {
            name: fields.name,
            location: fields.location,
        })
        .context("Invalid artist")
    }
}

#[derive(Subcommand, Debug)]
pub enum ArtistsCommand {
    /// Add an artist
    Insert(ArtistFields),
    /// Replace an artist's name and location
    Update {
        /// Artist ID
        id: EntityId,
        #[command(flatten)]
        fields: ArtistFields,
    },
    /// Delete an artist
    Delete {
        /// Artist ID
        id: EntityId,
    },
}

pub async fn run_artists(args: ArtistsArgs, as_json: bool) -> Result<()> {
    match args.command {
        ArtistsCommand::Insert(fields) => {
            let artist = NewArtist::try_from(fields)?;
            let db = connect(&load_config()?)?;
            ui::print_mutated(
                &ui::with_spinner("Writing", ArtistRepo::new(&db).insert(&artist)).await,
                as_json,
            );
        }
        ArtistsCommand::Update { id, fields } => {
            let artist = NewArtist::try_from(fields)?;
            let db = connect(&load_config()?)?;
            ui::print_mutated(
                &ui::with_spinner("Writing", ArtistRepo::new(&db).update(id, &artist)).await,
                as_json,
            );
        }
        ArtistsCommand::Delete { id } => {
            let db = connect(&load_config()?)?;
            ui::print_mutated(
                &ui::with_spinner("Writing", ArtistRepo::new(&db).delete(id)).await,
                as_json,
            );
        }
    }
    Ok(())
}

// === Songs ===

#[derive(Parser, Debug)]
pub struct SongsArgs {
    #[command(subcommand)]
    pub command: SongsCommand,
}

#[derive(Parser, Debug)]
pub struct SongFields {
    /// Song title
    #[arg(long)]
    pub name: String,
    /// Release date (YYYY-MM-DD)
    #[arg(long)]
    pub released: String,
}

impl TryFrom<SongFields> for NewSong {
    type Error = anyhow::Error;

    fn try_from(fields: SongFields) -> Result<Self> {
        NewSong::try_from(SongForm {
            name: fields.name,
            released: fields.released,
        })
        .context("Invalid song")
    }
}

#[derive(Subcommand, Debug)]
pub enum SongsCommand {
    /// Add a song
    Insert(SongFields),
    /// Replace a song's title and release date
    Update {
        /// Song ID
        id: EntityId,
        #[command(flatten)]
        fields: SongFields,
    },
    /// Delete a song
    Delete {
        /// Song ID
        id: EntityId,
    },
}

pub async fn run_songs(args: SongsArgs, as_json: bool) -> Result<()> {
    match args.command {
        SongsCommand::Insert(fields) => {
            let song = NewSong::try_from(fields)?;
            let db = connect(&load_config()?)?;
            ui::print_mutated(
                &ui::with_spinner("Writing", SongRepo::new(&db).insert(&song)).await,
                as_json,
            );
        }
        SongsCommand::Update { id, fields } => {
            let song = NewSong::try_from(fields)?;
            let db = connect(&load_config()?)?;
            ui::print_mutated(
                &ui::with_spinner("Writing", SongRepo::new(&db).update(id, &song)).await,
                as_json,
            );
        }
        SongsCommand::Delete { id } => {
            let db = connect(&load_config()?)?;
            ui::print_mutated(
                &ui::with_spinner("Writing", SongRepo::new(&db).delete(id)).await,
                as_json,
            );
        }
    }
    Ok(())
}

// === Playlists ===

#[derive(Parser, Debug)]
pub struct PlaylistsArgs {
    #[command(subcommand)]
    pub command: PlaylistsCommand,
}

#[derive(Parser, Debug)]
pub struct PlaylistFields {
    /// Playlist name
    #[arg(long)]
    pub name: String,
    /// Declared number of songs
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub num_songs: i64,
}

impl TryFrom<PlaylistFields> for NewPlaylist {
    type Error = anyhow::Error;

    fn try_from(fields: PlaylistFields) -> Result<Self> {
        NewPlaylist::try_from(PlaylistForm {
            name: fields.name,
            num_songs: fields.num_songs,
        })
        .context("Invalid playlist")
    }
}

#[derive(Subcommand, Debug)]
pub enum PlaylistsCommand {
    /// Add a playlist
    Insert(PlaylistFields),
    /// Replace a playlist's name and song count
    Update {
        /// Playlist ID
        id: EntityId,
        #[command(flatten)]
        fields: PlaylistFields,
    },
    /// Delete a playlist
    Delete {
        /// Playlist ID
        id: EntityId,
    },
}

pub async fn run_playlists(args: PlaylistsArgs, as_json: bool) -> Result<()> {
    match args.command {
        PlaylistsCommand::Insert(fields) => {
            let playlist = NewPlaylist::try_from(fields)?;
            let db = connect(&load_config()?)?;
            ui::print_mutated(
                &ui::with_spinner("Writing", PlaylistRepo::new(&db).insert(&playlist)).await,
                as_json,
            );
        }
        PlaylistsCommand::Update { id, fields } => {
            let playlist = NewPlaylist::try_from(fields)?;
            let db = connect(&load_config()?)?;
            ui::print_mutated(
                &ui::with_spinner("Writing", PlaylistRepo::new(&db).update(id, &playlist)).await,
                as_json,
            );
        }
        PlaylistsCommand::Delete { id } => {
            let db = connect(&load_config()?)?;
            ui::print_mutated(
                &ui::with_spinner("Writing", PlaylistRepo::new(&db).delete(id)).await,
                as_json,
            );
        }
    }
    Ok(())
}

/// Arguments for `audioplane playlist-songs`
#[derive(Parser, Debug)]
pub struct PlaylistSongsArgs {
    /// Playlist ID
    pub id: EntityId,
}

/// Songs saved on one playlist, in position order
pub async fn run_playlist_songs(args: PlaylistSongsArgs, as_json: bool) -> Result<()> {
    let db = connect(&load_config()?)?;
    ui::print_fetched(
        &ui::with_spinner("Querying", PlaylistRepo::new(&db).songs(args.id)).await,
        as_json,
    );
    Ok(())
}
