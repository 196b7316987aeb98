//! Shop API handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use shared::error::AppError;
use shared::models::{Page, Shop, ShopCreate, ShopDetail, ShopQuery, ShopUpdate};

use super::{ApiJson, ApiResult};
use crate::auth::CurrentUser;
use crate::services::shop as shop_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/shops", get(list).post(create))
        .route("/api/shops/{id}", put(update).get(detail))
}

/// GET /api/shops?keyword=&category_id=&page=
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ShopQuery>,
) -> ApiResult<Page<Shop>> {
    Ok(Json(shop_service::list(&state.pool, &query).await?))
}

/// GET /api/shops/{id}
pub async fn detail(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<ShopDetail> {
    Ok(Json(shop_service::detail(&state.pool, id).await?))
}

/// POST /api/shops (staff)
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiJson(payload): ApiJson<ShopCreate>,
) -> Result<(StatusCode, Json<Shop>), AppError> {
    let shop = shop_service::create(&state.pool, &user.actor(), payload).await?;
    Ok((StatusCode::CREATED, Json(shop)))
}

/// PUT /api/shops/{id} (staff)
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    ApiJson(payload): ApiJson<ShopUpdate>,
) -> ApiResult<Shop> {
    Ok(Json(
        shop_service::update(&state.pool, &user.actor(), id, payload).await?,
    ))
}
