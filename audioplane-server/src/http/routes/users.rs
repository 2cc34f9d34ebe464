//! User endpoints

use std::sync::Arc;

use audioplane_core::db::{User, UserRepo};
use audioplane_core::models::{LimitParams, NewUser, UserForm};
use axum::{
    extract::{Query, State},
    routing::{get, put},
    Json, Router,
};

use crate::http::error::ApiError;
use crate::http::extractors::{ValidId, ValidJson};
use crate::http::response::{ListResponse, MutationResponse};
use crate::http::server::AppState;

/// GET /users
async fn list_users(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LimitParams>,
) -> Json<ListResponse<User>> {
    let limit = params.resolve(state.row_limit);
    Json(UserRepo::new(&state.db).list(limit.bound()).await.into())
}

/// POST /users
async fn create_user(
    State(state): State<Arc<AppState>>,
    ValidJson(form): ValidJson<UserForm>,
) -> Result<Json<MutationResponse<User>>, ApiError> {
    let user = NewUser::try_from(form)?;
    Ok(Json(UserRepo::new(&state.db).insert(&user).await.into()))
}

/// PUT /users/{id}
async fn update_user(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    ValidJson(form): ValidJson<UserForm>,
) -> Result<Json<MutationResponse<User>>, ApiError> {
    let user = NewUser::try_from(form)?;
    Ok(Json(UserRepo::new(&state.db).update(id, &user).await.into()))
}

/// DELETE /users/{id}
async fn delete_user(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Json<MutationResponse<User>> {
    Json(UserRepo::new(&state.db).delete(id).await.into())
}

/// User routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", put(update_user).delete(delete_user))
}
