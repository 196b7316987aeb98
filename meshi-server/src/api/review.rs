//! Review API handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{post, put};
use axum::{Json, Router};
use shared::error::{ApiResponse, AppError};
use shared::models::{Review, ReviewInput};

use super::{ApiJson, ApiResult};
use crate::auth::CurrentUser;
use crate::services::review as review_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/shops/{id}/reviews", post(create))
        .route("/api/reviews/{id}", put(update).delete(delete))
}

/// POST /api/shops/{id}/reviews
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(shop_id): Path<i64>,
    ApiJson(payload): ApiJson<ReviewInput>,
) -> Result<(StatusCode, Json<Review>), AppError> {
    let review = review_service::create(&state.pool, &user.actor(), shop_id, payload).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

/// PUT /api/reviews/{id} (author only)
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    ApiJson(payload): ApiJson<ReviewInput>,
) -> ApiResult<Review> {
    Ok(Json(
        review_service::update(&state.pool, &user.actor(), id, payload).await?,
    ))
}

/// DELETE /api/reviews/{id} (author only)
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<ApiResponse<()>, AppError> {
    review_service::delete(&state.pool, &user.actor(), id).await?;
    Ok(ApiResponse::ok())
}
