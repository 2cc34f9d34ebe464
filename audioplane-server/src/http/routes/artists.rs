//! Artist endpoints

use std::sync::Arc;

use audioplane_core::db::{Artist, ArtistRepo, ArtistSongCount};
use audioplane_core::models::{ArtistForm, LimitParams, NewArtist};
use axum::{
    extract::{Query, State},
    routing::{get, put},
    Json, Router,
};

use crate::http::error::ApiError;
use crate::http::extractors::{ValidId, ValidJson};
use crate::http::response::{ListResponse, MutationResponse};
use crate::http::server::AppState;

/// GET /artists
async fn list_artists(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LimitParams>,
) -> Json<ListResponse<Artist>> {
    let limit = params.resolve(state.row_limit);
    Json(ArtistRepo::new(&state.db).list(limit.bound()).await.into())
}

/// GET /artists/song-counts - every artist, including those with no songs
async fn song_counts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LimitParams>,
) -> Json<ListResponse<ArtistSongCount>> {
    let limit = params.resolve(state.row_limit);
    Json(ArtistRepo::new(&state.db).song_counts(limit.bound()).await.into())
}

/// POST /artists
async fn create_artist(
    State(state): State<Arc<AppState>>,
    ValidJson(form): ValidJson<ArtistForm>,
) -> Result<Json<MutationResponse<Artist>>, ApiError> {
    let artist = NewArtist::try_from(form)?;
    Ok(Json(ArtistRepo::new(&state.db).insert(&artist).await.into()))
}

/// PUT /artists/{id}
async fn update_artist(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    ValidJson(form): ValidJson<ArtistForm>,
) -> Result<Json<MutationResponse<Artist>>, ApiError> {
    let artist = NewArtist::try_from(form)?;
    Ok(Json(ArtistRepo::new(&state.db).update(id, &artist).await.into()))
}

/// DELETE /artists/{id}
async fn delete_artist(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Json<MutationResponse<Artist>> {
    Json(ArtistRepo::new(&state.db).delete(id).await.into())
}

/// Artist routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/artists", get(list_artists).post(create_artist))
        .route("/artists/song-counts", get(song_counts))
        .route("/artists/{id}", put(update_artist).delete(delete_artist))
}
