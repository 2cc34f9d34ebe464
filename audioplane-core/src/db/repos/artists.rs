//! Artist repository
//!
//! Handles artist CRUD plus the per-artist song count view.

use serde::Serialize;
use sqlx::FromRow;

use crate::db::{Database, Fetched, Mutated};
use crate::flash::{EntityKind, FlashAction, Flashable};
use crate::models::{EntityId, NewArtist};

/// Artist record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Artist {
    pub artist_id: i32,
    pub name: String,
    pub location: Option<String>,
}

impl Flashable for Artist {
    const ENTITY: EntityKind = EntityKind::Artist;

    fn id(&self) -> i32 {
        self.artist_id
    }

    fn label(&self) -> &str {
        &self.name
    }
}

/// Artist with number of produced songs
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct ArtistSongCount {
    pub artist_id: i32,
    pub name: String,
    pub song_count: i64,
}

/// Artist repository
pub struct ArtistRepo<'a> {
    db: &'a Database,
}

impl<'a> ArtistRepo<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub async fn list(&self, limit: Option<i64>) -> Fetched<Artist> {
        let query = sqlx::query_as::<_, Artist>(
            r#"
            SELECT artistID AS artist_id, artist_name AS name, artist_location AS location
            FROM Artist
            ORDER BY artistID
            LIMIT $1
            "#,
        )
        .bind(limit);

        self.db.run_query("artists", query).await
    }

    /// Songs produced per artist, busiest first.
    ///
    /// LEFT JOIN so artists without songs still appear with 0.
    pub async fn song_counts(&self, limit: Option<i64>) -> Fetched<ArtistSongCount> {
        let query = sqlx::query_as::<_, ArtistSongCount>(
            r#"
            SELECT
                a.artistID AS artist_id,
                a.artist_name AS name,
                COUNT(p.song_id) AS song_count
            FROM Artist a
            LEFT JOIN Produces p ON a.artistID = p.artistID
            GROUP BY a.artistID, a.artist_name
            ORDER BY song_count DESC, a.artistID
            LIMIT $1
            "#,
        )
        .bind(limit);

        self.db.run_query("artist_song_counts", query).await
    }

    pub async fn insert(&self, artist: &NewArtist) -> Mutated<Artist> {
        let query = sqlx::query_as::<_, Artist>(
            r#"
            INSERT INTO Artist (artist_name, artist_location)
            VALUES ($1, $2)
            RETURNING artistID AS artist_id, artist_name AS name, artist_location AS location
            "#,
        )
        .bind(artist.name.as_str())
        .bind(artist.location.as_deref());

        self.db.run_mutation(FlashAction::Inserted, query).await
    }

    pub async fn update(&self, id: EntityId, artist: &NewArtist) -> Mutated<Artist> {
        let query = sqlx::query_as::<_, Artist>(
            r#"
            UPDATE Artist
            SET artist_name = $2, artist_location = $3
            WHERE artistID = $1
            RETURNING artistID AS artist_id, artist_name AS name, artist_location AS location
            "#,
        )
        .bind(id.get())
        .bind(artist.name.as_str())
        .bind(artist.location.as_deref());

        self.db.run_mutation(FlashAction::Updated, query).await
    }

    pub async fn delete(&self, id: EntityId) -> Mutated<Artist> {
        let query = sqlx::query_as::<_, Artist>(
            r#"
            DELETE FROM Artist
            WHERE artistID = $1
            RETURNING artistID AS artist_id, artist_name AS name, artist_location AS location
            "#,
        )
        .bind(id.get());

        self.db.run_mutation(FlashAction::Deleted, query).await
    }
}
