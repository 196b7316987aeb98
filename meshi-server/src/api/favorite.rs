//! Favorite API handlers

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use shared::error::{ApiResponse, AppError};
use shared::models::{Favorite, FavoriteWithShop};

use super::ApiResult;
use crate::auth::CurrentUser;
use crate::services::favorite as favorite_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/favorites", get(list))
        .route("/api/favorites/{shop_id}", post(add).delete(remove))
}

/// GET /api/favorites
pub async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<Vec<FavoriteWithShop>> {
    Ok(Json(favorite_service::list(&state.pool, &user.actor()).await?))
}

/// POST /api/favorites/{shop_id}
pub async fn add(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(shop_id): Path<i64>,
) -> ApiResult<Favorite> {
    Ok(Json(
        favorite_service::add(&state.pool, &user.actor(), shop_id).await?,
    ))
}

/// DELETE /api/favorites/{shop_id}
pub async fn remove(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(shop_id): Path<i64>,
) -> Result<ApiResponse<()>, AppError> {
    favorite_service::remove(&state.pool, &user.actor(), shop_id).await?;
    Ok(ApiResponse::ok())
}
