//! Like activity endpoints

use std::sync::Arc;

use audioplane_core::db::{ActivityRepo, LikeEvent, UserActivity};
use audioplane_core::models::{LimitParams, RowLimit};
use audioplane_core::LikeGraph;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::http::response::ListResponse;
use crate::http::server::AppState;

/// Like pairs fed to the network graph
const NETWORK_LIMIT: i64 = 500;

/// User-song network as `{nodes, edges, diagnostic}`
#[derive(Serialize)]
pub struct NetworkResponse {
    #[serde(flatten)]
    pub graph: LikeGraph,
    pub diagnostic: Option<String>,
}

async fn user_activity(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LimitParams>,
) -> Json<ListResponse<UserActivity>> {
    let limit = params.resolve(state.row_limit);
    Json(ActivityRepo::new(&state.db).user_activity(limit.bound()).await.into())
}

async fn likes_feed(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LimitParams>,
) -> Json<ListResponse<LikeEvent>> {
    let limit = params.resolve(state.row_limit);
    Json(ActivityRepo::new(&state.db).likes_feed(limit.bound()).await.into())
}

async fn network(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LimitParams>,
) -> Json<NetworkResponse> {
    let limit = params.resolve(RowLimit::new(NETWORK_LIMIT));
    let fetched = ActivityRepo::new(&state.db).like_edges(limit.bound()).await;
    let graph = LikeGraph::from_edges(&fetched.rows);
    tracing::debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "built like network"
    );

    Json(NetworkResponse {
        graph,
        diagnostic: fetched.diagnostic.map(|d| d.to_string()),
    })
}

/// Activity routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/activity/users", get(user_activity))
        .route("/activity/likes", get(likes_feed))
        .route("/activity/network", get(network))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::http::server::tests::{body_json, offline_router};

    #[tokio::test]
    async fn network_is_empty_graph_when_store_is_down() {
        let response = offline_router()
            .oneshot(
                Request::builder()
                    .uri("/activity/network")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["nodes"], serde_json::json!([]));
        assert_eq!(body["edges"], serde_json::json!([]));
        assert!(body["diagnostic"].is_string());
    }
}
