//! Playlist endpoints

use std::sync::Arc;

use audioplane_core::db::{
    Playlist, PlaylistChoice, PlaylistEntry, PlaylistRepo, PlaylistWithCreator,
};
use audioplane_core::models::{LimitParams, NewPlaylist, PlaylistForm};
use axum::{
    extract::{Query, State},
    routing::{get, put},
    Json, Router,
};
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::extractors::{ValidId, ValidJson};
use crate::http::response::{ListResponse, MutationResponse};
use crate::http::server::AppState;

/// Average saved songs per playlist
#[derive(Serialize)]
pub struct AverageResponse {
    pub avg_songs: Option<f64>,
    pub diagnostic: Option<String>,
}

async fn list_playlists(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LimitParams>,
) -> Json<ListResponse<Playlist>> {
    let limit = params.resolve(state.row_limit);
    Json(PlaylistRepo::new(&state.db).list(limit.bound()).await.into())
}

async fn with_creator(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LimitParams>,
) -> Json<ListResponse<PlaylistWithCreator>> {
    let limit = params.resolve(state.row_limit);
    Json(PlaylistRepo::new(&state.db).list_with_creator(limit.bound()).await.into())
}

async fn choices(State(state): State<Arc<AppState>>) -> Json<ListResponse<PlaylistChoice>> {
    Json(PlaylistRepo::new(&state.db).choices().await.into())
}

/// GET /playlists/{id}/songs - saved songs in position order
async fn playlist_songs(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Json<ListResponse<PlaylistEntry>> {
    Json(PlaylistRepo::new(&state.db).songs(id).await.into())
}

async fn average(State(state): State<Arc<AppState>>) -> Json<AverageResponse> {
    let fetched = PlaylistRepo::new(&state.db).average_song_count().await;
    Json(AverageResponse {
        avg_songs: fetched.rows.first().and_then(|row| row.avg_songs),
        diagnostic: fetched.diagnostic.map(|d| d.to_string()),
    })
}

async fn create_playlist(
    State(state): State<Arc<AppState>>,
    ValidJson(form): ValidJson<PlaylistForm>,
) -> Result<Json<MutationResponse<Playlist>>, ApiError> {
    let playlist = NewPlaylist::try_from(form)?;
    Ok(Json(PlaylistRepo::new(&state.db).insert(&playlist).await.into()))
}

async fn update_playlist(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    ValidJson(form): ValidJson<PlaylistForm>,
) -> Result<Json<MutationResponse<Playlist>>, ApiError> {
    let playlist = NewPlaylist::try_from(form)?;
    Ok(Json(PlaylistRepo::new(&state.db).update(id, &playlist).await.into()))
}

async fn delete_playlist(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Json<MutationResponse<Playlist>> {
    Json(PlaylistRepo::new(&state.db).delete(id).await.into())
}

/// Playlist routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/playlists", get(list_playlists).post(create_playlist))
        .route("/playlists/with-creator", get(with_creator))
        .route("/playlists/choices", get(choices))
        .route("/playlists/average", get(average))
        .route("/playlists/{id}", put(update_playlist).delete(delete_playlist))
        .route("/playlists/{id}/songs", get(playlist_songs))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::http::server::tests::{body_json, offline_router};

    #[tokio::test]
    async fn negative_song_count_is_rejected() {
        let response = offline_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/playlists")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"name": "Road Trip", "num_songs": -3}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn deleting_id_zero_reaches_the_store() {
        let response = offline_router()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/playlists/0")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body["record"].is_null());
        assert!(body["flash"].is_null());
        assert!(body["diagnostic"].is_string());
    }

    #[tokio::test]
    async fn song_listing_needs_a_valid_id() {
        let response = offline_router()
            .oneshot(
                Request::builder()
                    .uri("/playlists/x1/songs")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn average_reports_store_failure() {
        let response = offline_router()
            .oneshot(
                Request::builder()
                    .uri("/playlists/average")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body["avg_songs"].is_null());
        assert!(body["diagnostic"].is_string());
    }
}
