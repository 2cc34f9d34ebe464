//! Song repository - CRUD, artist join, like rankings

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

use crate::db::{Database, Fetched, Mutated};
use crate::flash::{EntityKind, FlashAction, Flashable};
use crate::models::{EntityId, NewSong};

/// Song record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Song {
    pub song_id: i32,
    pub name: String,
    pub released: NaiveDate,
}

impl Flashable for Song {
    const ENTITY: EntityKind = EntityKind::Song;

    fn id(&self) -> i32 {
        self.song_id
    }

    fn label(&self) -> &str {
        &self.name
    }
}

/// Song with its producing artist (one row per song/artist pair;
/// `artist_name` is absent for songs nobody produced)
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct SongWithArtist {
    pub song_id: i32,
    pub name: String,
    pub released: NaiveDate,
    pub artist_name: Option<String>,
}

/// Song with its number of likes
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct LikedSong {
    pub song_id: i32,
    pub name: String,
    pub artist_name: Option<String>,
    pub like_count: i64,
}

/// Likes per song title, for the popularity chart
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct SongPopularity {
    pub name: String,
    pub like_count: i64,
}

/// Song repository
pub struct SongRepo<'a> {
    db: &'a Database,
}

impl<'a> SongRepo<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub async fn list(&self, limit: Option<i64>) -> Fetched<Song> {
        let query = sqlx::query_as::<_, Song>(
            r#"
            SELECT song_id, songName AS name, dayReleased AS released
            FROM Song
            ORDER BY song_id
            LIMIT $1
            "#,
        )
        .bind(limit);

        self.db.run_query("songs", query).await
    }

    pub async fn list_with_artist(&self, limit: Option<i64>) -> Fetched<SongWithArtist> {
        let query = sqlx::query_as::<_, SongWithArtist>(
            r#"
            SELECT s.song_id, s.songName AS name, s.dayReleased AS released, a.artist_name
            FROM Song s
            LEFT JOIN Produces p ON s.song_id = p.song_id
            LEFT JOIN Artist a ON p.artistID = a.artistID
            ORDER BY s.song_id, a.artistID
            LIMIT $1
            "#,
        )
        .bind(limit);

        self.db.run_query("songs_with_artist", query).await
    }

    /// Songs ranked by likes. Unliked and unproduced songs stay in the
    /// result with a count of 0.
    pub async fn most_liked(&self, limit: Option<i64>) -> Fetched<LikedSong> {
        let query = sqlx::query_as::<_, LikedSong>(
            r#"
            SELECT
                s.song_id,
                s.songName AS name,
                a.artist_name,
                COUNT(l.userID) AS like_count
            FROM Song s
            LEFT JOIN Produces p ON s.song_id = p.song_id
            LEFT JOIN Artist a ON p.artistID = a.artistID
            LEFT JOIN Likes l ON s.song_id = l.song_id
            GROUP BY s.song_id, s.songName, a.artistID, a.artist_name
            ORDER BY like_count DESC, s.song_id
            LIMIT $1
            "#,
        )
        .bind(limit);

        self.db.run_query("most_liked_songs", query).await
    }

    /// Likes grouped by song title, most liked first.
    pub async fn popularity(&self, limit: Option<i64>) -> Fetched<SongPopularity> {
        let query = sqlx::query_as::<_, SongPopularity>(
            r#"
            SELECT s.songName AS name, COUNT(l.userID) AS like_count
            FROM Song s
            LEFT JOIN Likes l ON s.song_id = l.song_id
            GROUP BY s.songName
            ORDER BY like_count DESC, s.songName
            LIMIT $1
            "#,
        )
        .bind(limit);

        self.db.run_query("song_popularity", query).await
    }

    pub async fn insert(&self, song: &NewSong) -> Mutated<Song> {
        let query = sqlx::query_as::<_, Song>(
            r#"
            INSERT INTO Song (songName, dayReleased)
            VALUES ($1, $2)
            RETURNING song_id, songName AS name, dayReleased AS released
            "#,
        )
        .bind(song.name.as_str())
        .bind(song.released.get());

        self.db.run_mutation(FlashAction::Inserted, query).await
    }

    pub async fn update(&self, id: EntityId, song: &NewSong) -> Mutated<Song> {
        let query = sqlx::query_as::<_, Song>(
            r#"
            UPDATE Song
            SET songName = $2, dayReleased = $3
            WHERE song_id = $1
            RETURNING song_id, songName AS name, dayReleased AS released
            "#,
        )
        .bind(id.get())
        .bind(song.name.as_str())
        .bind(song.released.get());

        self.db.run_mutation(FlashAction::Updated, query).await
    }

    pub async fn delete(&self, id: EntityId) -> Mutated<Song> {
        let query = sqlx::query_as::<_, Song>(
            r#"
            DELETE FROM Song
            WHERE song_id = $1
            RETURNING song_id, songName AS name, dayReleased AS released
            "#,
        )
        .bind(id.get());

        self.db.run_mutation(FlashAction::Deleted, query).await
    }
}
