//! Playlist repository
//!
//! Handles playlist CRUD with:
//! - creator join and per-playlist song listing
//! - average saved songs across playlists

use serde::Serialize;
use sqlx::FromRow;

use crate::db::{Database, Fetched, Mutated};
use crate::flash::{EntityKind, FlashAction, Flashable};
use crate::models::{EntityId, NewPlaylist};

/// Playlist record from database. `num_songs` is the declared count,
/// not derived from `Saves`.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Playlist {
    pub playlist_id: i32,
    pub name: String,
    pub num_songs: i32,
}

impl Flashable for Playlist {
    const ENTITY: EntityKind = EntityKind::Playlist;

    fn id(&self) -> i32 {
        self.playlist_id
    }

    fn label(&self) -> &str {
        &self.name
    }
}

/// Playlist with the user who created it
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct PlaylistWithCreator {
    pub playlist_id: i32,
    pub name: String,
    pub num_songs: i32,
    pub creator: Option<String>,
}

/// Id/name pair for playlist pickers
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct PlaylistChoice {
    pub playlist_id: i32,
    pub name: String,
}

/// A saved song at its position in a playlist
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct PlaylistEntry {
    pub position: i32,
    pub song_id: i32,
    pub song_name: String,
    pub artist_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct SongsPerPlaylist {
    /// `None` when no playlist has saved songs
    pub avg_songs: Option<f64>,
}

/// Playlist repository
pub struct PlaylistRepo<'a> {
    db: &'a Database,
}

impl<'a> PlaylistRepo<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub async fn list(&self, limit: Option<i64>) -> Fetched<Playlist> {
        let query = sqlx::query_as::<_, Playlist>(
            r#"
            SELECT playlistID AS playlist_id, playlist_name AS name, num_songs
            FROM Playlist
            ORDER BY playlistID
            LIMIT $1
            "#,
        )
        .bind(limit);

        self.db.run_query("playlists", query).await
    }

    pub async fn list_with_creator(&self, limit: Option<i64>) -> Fetched<PlaylistWithCreator> {
        let query = sqlx::query_as::<_, PlaylistWithCreator>(
            r#"
            SELECT p.playlistID AS playlist_id, p.playlist_name AS name, p.num_songs,
                   u.userName AS creator
            FROM Playlist p
            LEFT JOIN Creates c ON p.playlistID = c.playlistID
            LEFT JOIN User_table u ON c.userID = u.userID
            ORDER BY p.playlistID, u.userID
            LIMIT $1
            "#,
        )
        .bind(limit);

        self.db.run_query("playlists_with_creator", query).await
    }

    /// Every playlist, for a selector (unbounded).
    pub async fn choices(&self) -> Fetched<PlaylistChoice> {
        let query = sqlx::query_as::<_, PlaylistChoice>(
            r#"
            SELECT playlistID AS playlist_id, playlist_name AS name
            FROM Playlist
            ORDER BY playlistID
            "#,
        );

        self.db.run_query("playlist_choices", query).await
    }

    /// Songs saved on one playlist, in saved order.
    pub async fn songs(&self, playlist: EntityId) -> Fetched<PlaylistEntry> {
        let query = sqlx::query_as::<_, PlaylistEntry>(
            r#"
            SELECT sv.position, s.song_id, s.songName AS song_name, a.artist_name
            FROM Saves sv
            JOIN Song s ON sv.song_id = s.song_id
            LEFT JOIN Produces p ON s.song_id = p.song_id
            LEFT JOIN Artist a ON p.artistID = a.artistID
            WHERE sv.playlistID = $1
            ORDER BY sv.position, s.song_id, a.artistID
            "#,
        )
        .bind(playlist.get());

        self.db.run_query("playlist_songs", query).await
    }

    /// Mean number of saved songs over playlists that have any.
    pub async fn average_song_count(&self) -> Fetched<SongsPerPlaylist> {
        let query = sqlx::query_as::<_, SongsPerPlaylist>(
            r#"
            SELECT AVG(song_count)::float8 AS avg_songs
            FROM (
                SELECT playlistID, COUNT(song_id) AS song_count
                FROM Saves
                GROUP BY playlistID
            ) t
            "#,
        );

        self.db.run_query("avg_songs_per_playlist", query).await
    }

    pub async fn insert(&self, playlist: &NewPlaylist) -> Mutated<Playlist> {
        let query = sqlx::query_as::<_, Playlist>(
            r#"
            INSERT INTO Playlist (playlist_name, num_songs)
            VALUES ($1, $2)
            RETURNING playlistID AS playlist_id, playlist_name AS name, num_songs
            "#,
        )
        .bind(playlist.name.as_str())
        .bind(playlist.num_songs.get());

        self.db.run_mutation(FlashAction::Inserted, query).await
    }

    pub async fn update(&self, id: EntityId, playlist: &NewPlaylist) -> Mutated<Playlist> {
        let query = sqlx::query_as::<_, Playlist>(
            r#"
            UPDATE Playlist
            SET playlist_name = $2, num_songs = $3
            WHERE playlistID = $1
            RETURNING playlistID AS playlist_id, playlist_name AS name, num_songs
            "#,
        )
        .bind(id.get())
        .bind(playlist.name.as_str())
        .bind(playlist.num_songs.get());

        self.db.run_mutation(FlashAction::Updated, query).await
    }

    pub async fn delete(&self, id: EntityId) -> Mutated<Playlist> {
        let query = sqlx::query_as::<_, Playlist>(
            r#"
            DELETE FROM Playlist
            WHERE playlistID = $1
            RETURNING playlistID AS playlist_id, playlist_name AS name, num_songs
            "#,
        )
        .bind(id.get());

        self.db.run_mutation(FlashAction::Deleted, query).await
    }
}
