//! Like-centric views across users and songs

use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

use crate::db::{Database, Fetched};

/// Distinct liked songs and created playlists per user
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct UserActivity {
    pub user_id: i32,
    pub username: String,
    pub songs_liked: i64,
    pub playlists_created: i64,
}

/// One like, newest first in the feed
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct LikeEvent {
    pub user_id: i32,
    pub username: String,
    pub song_id: i32,
    pub song_name: String,
    pub artist_name: Option<String>,
    pub liked_at: NaiveDateTime,
}

/// User-likes-song pair feeding the network graph
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct LikeEdge {
    pub user_id: i32,
    pub username: String,
    pub song_id: i32,
    pub song_name: String,
    pub artist_name: Option<String>,
}

/// Activity repository
pub struct ActivityRepo<'a> {
    db: &'a Database,
}

impl<'a> ActivityRepo<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Per-user counts. The two LEFT JOINs multiply rows, so both counts
    /// are DISTINCT.
    pub async fn user_activity(&self, limit: Option<i64>) -> Fetched<UserActivity> {
        let query = sqlx::query_as::<_, UserActivity>(
            r#"
            SELECT
                u.userID AS user_id,
                u.userName AS username,
                COUNT(DISTINCT l.song_id) AS songs_liked,
                COUNT(DISTINCT c.playlistID) AS playlists_created
            FROM User_table u
            LEFT JOIN Likes l ON u.userID = l.userID
            LEFT JOIN Creates c ON u.userID = c.userID
            GROUP BY u.userID, u.userName
            ORDER BY songs_liked DESC, u.userID
            LIMIT $1
            "#,
        )
        .bind(limit);

        self.db.run_query("user_activity", query).await
    }

    /// Likes, most recent first.
    pub async fn likes_feed(&self, limit: Option<i64>) -> Fetched<LikeEvent> {
        let query = sqlx::query_as::<_, LikeEvent>(
            r#"
            SELECT
                u.userID AS user_id,
                u.userName AS username,
                s.song_id,
                s.songName AS song_name,
                a.artist_name,
                l.liked_date::timestamp AS liked_at
            FROM Likes l
            JOIN User_table u ON l.userID = u.userID
            JOIN Song s ON l.song_id = s.song_id
            LEFT JOIN Produces p ON s.song_id = p.song_id
            LEFT JOIN Artist a ON p.artistID = a.artistID
            ORDER BY l.liked_date DESC, u.userID, s.song_id
            LIMIT $1
            "#,
        )
        .bind(limit);

        self.db.run_query("likes_feed", query).await
    }

    /// Raw user/song pairs for [`crate::graph::LikeGraph`].
    pub async fn like_edges(&self, limit: Option<i64>) -> Fetched<LikeEdge> {
        let query = sqlx::query_as::<_, LikeEdge>(
            r#"
            SELECT
                u.userID AS user_id,
                u.userName AS username,
                s.song_id,
                s.songName AS song_name,
                a.artist_name
            FROM Likes l
            JOIN User_table u ON l.userID = u.userID
            JOIN Song s ON l.song_id = s.song_id
            LEFT JOIN Produces p ON s.song_id = p.song_id
            LEFT JOIN Artist a ON p.artistID = a.artistID
            ORDER BY u.userID, s.song_id
            LIMIT $1
            "#,
        )
        .bind(limit);

        self.db.run_query("like_edges", query).await
    }
}
