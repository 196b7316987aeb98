//! Category API handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use shared::error::AppError;
use shared::models::{Category, CategoryCreate};

use super::{ApiJson, ApiResult};
use crate::auth::CurrentUser;
use crate::services::category as category_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/categories", get(list).post(create))
}

/// GET /api/categories
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Category>> {
    Ok(Json(category_service::list(&state.pool).await?))
}

/// POST /api/categories (staff)
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiJson(payload): ApiJson<CategoryCreate>,
) -> Result<(StatusCode, Json<Category>), AppError> {
    let category = category_service::create(&state.pool, &user.actor(), payload).await?;
    Ok((StatusCode::CREATED, Json(category)))
}
