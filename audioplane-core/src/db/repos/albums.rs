//! Album repository - read-only views
//!
//! Albums have no write path; they are maintained directly in the store.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

use crate::db::{Database, Fetched};

/// Album record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Album {
    pub album_id: i32,
    pub name: String,
    pub released: NaiveDate,
}

/// Album with its recording artist (absent when nobody recorded it)
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct AlbumWithArtist {
    pub album_id: i32,
    pub name: String,
    pub released: NaiveDate,
    pub artist_name: Option<String>,
}

/// One track of an album's listing
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct AlbumTrack {
    pub album_id: i32,
    pub album_name: String,
    pub track_number: i32,
    pub song_id: i32,
    pub song_name: String,
    pub artist_name: Option<String>,
}

/// Album repository
pub struct AlbumRepo<'a> {
    db: &'a Database,
}

impl<'a> AlbumRepo<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub async fn list(&self, limit: Option<i64>) -> Fetched<Album> {
        let query = sqlx::query_as::<_, Album>(
            r#"
            SELECT albumID AS album_id, album_name AS name, release_date AS released
            FROM Album
            ORDER BY albumID
            LIMIT $1
            "#,
        )
        .bind(limit);

        self.db.run_query("albums", query).await
    }

    /// Albums with artists, newest release first.
    pub async fn list_with_artist(&self, limit: Option<i64>) -> Fetched<AlbumWithArtist> {
        let query = sqlx::query_as::<_, AlbumWithArtist>(
            r#"
            SELECT al.albumID AS album_id, al.album_name AS name, al.release_date AS released,
                   ar.artist_name
            FROM Album al
            LEFT JOIN Records r ON al.albumID = r.albumID
            LEFT JOIN Artist ar ON r.artistID = ar.artistID
            ORDER BY al.release_date DESC, al.albumID, ar.artistID
            LIMIT $1
            "#,
        )
        .bind(limit);

        self.db.run_query("albums_with_artist", query).await
    }

    /// Track listings, grouped by album and ordered by track number within it.
    pub async fn tracks(&self, limit: Option<i64>) -> Fetched<AlbumTrack> {
        let query = sqlx::query_as::<_, AlbumTrack>(
            r#"
            SELECT
                al.albumID AS album_id,
                al.album_name,
                c.track_number,
                s.song_id,
                s.songName AS song_name,
                ar.artist_name
            FROM Contains c
            JOIN Album al ON c.albumID = al.albumID
            JOIN Song s ON c.song_id = s.song_id
            LEFT JOIN Records r ON al.albumID = r.albumID
            LEFT JOIN Artist ar ON r.artistID = ar.artistID
            ORDER BY al.album_name, al.albumID, c.track_number, ar.artistID
            LIMIT $1
            "#,
        )
        .bind(limit);

        self.db.run_query("album_tracks", query).await
    }
}
