//! Album endpoints (read-only)

use std::sync::Arc;

use audioplane_core::db::{Album, AlbumRepo, AlbumTrack, AlbumWithArtist};
use audioplane_core::models::LimitParams;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use crate::http::response::ListResponse;
use crate::http::server::AppState;

async fn list_albums(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LimitParams>,
) -> Json<ListResponse<Album>> {
    let limit = params.resolve(state.row_limit);
    Json(AlbumRepo::new(&state.db).list(limit.bound()).await.into())
}

async fn with_artist(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LimitParams>,
) -> Json<ListResponse<AlbumWithArtist>> {
    let limit = params.resolve(state.row_limit);
    Json(AlbumRepo::new(&state.db).list_with_artist(limit.bound()).await.into())
}

async fn tracks(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LimitParams>,
) -> Json<ListResponse<AlbumTrack>> {
    let limit = params.resolve(state.row_limit);
    Json(AlbumRepo::new(&state.db).tracks(limit.bound()).await.into())
}

/// Album routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/albums", get(list_albums))
        .route("/albums/with-artist", get(with_artist))
        .route("/albums/tracks", get(tracks))
}
