//! Song endpoints

use std::sync::Arc;

use audioplane_core::db::{LikedSong, Song, SongPopularity, SongRepo, SongWithArtist};
use audioplane_core::models::{LimitParams, NewSong, RowLimit, SongForm};
use axum::{
    extract::{Query, State},
    routing::{get, put},
    Json, Router,
};

use crate::http::error::ApiError;
use crate::http::extractors::{ValidId, ValidJson};
use crate::http::response::{ListResponse, MutationResponse};
use crate::http::server::AppState;

/// Bars in the top-liked chart
const POPULARITY_LIMIT: i64 = 5;

async fn list_songs(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LimitParams>,
) -> Json<ListResponse<Song>> {
    let limit = params.resolve(state.row_limit);
    Json(SongRepo::new(&state.db).list(limit.bound()).await.into())
}

async fn with_artist(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LimitParams>,
) -> Json<ListResponse<SongWithArtist>> {
    let limit = params.resolve(state.row_limit);
    Json(SongRepo::new(&state.db).list_with_artist(limit.bound()).await.into())
}

async fn most_liked(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LimitParams>,
) -> Json<ListResponse<LikedSong>> {
    let limit = params.resolve(state.row_limit);
    Json(SongRepo::new(&state.db).most_liked(limit.bound()).await.into())
}

async fn popularity(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LimitParams>,
) -> Json<ListResponse<SongPopularity>> {
    let limit = params.resolve(RowLimit::new(POPULARITY_LIMIT));
    Json(SongRepo::new(&state.db).popularity(limit.bound()).await.into())
}

async fn create_song(
    State(state): State<Arc<AppState>>,
    ValidJson(form): ValidJson<SongForm>,
) -> Result<Json<MutationResponse<Song>>, ApiError> {
    let song = NewSong::try_from(form)?;
    Ok(Json(SongRepo::new(&state.db).insert(&song).await.into()))
}

async fn update_song(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    ValidJson(form): ValidJson<SongForm>,
) -> Result<Json<MutationResponse<Song>>, ApiError> {
    let song = NewSong::try_from(form)?;
    Ok(Json(SongRepo::new(&state.db).update(id, &song).await.into()))
}

async fn delete_song(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Json<MutationResponse<Song>> {
    Json(SongRepo::new(&state.db).delete(id).await.into())
}

/// Song routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/songs", get(list_songs).post(create_song))
        .route("/songs/with-artist", get(with_artist))
        .route("/songs/most-liked", get(most_liked))
        .route("/songs/popularity", get(popularity))
        .route("/songs/{id}", put(update_song).delete(delete_song))
}
