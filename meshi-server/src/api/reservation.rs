//! Reservation API handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use shared::error::{ApiResponse, AppError};
use shared::models::{Page, Reservation, ReservationRequest, ReservationWithShop};

use super::{ApiJson, ApiResult, PageQuery};
use crate::auth::CurrentUser;
use crate::services::reservation as reservation_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/shops/{id}/reservations", post(make))
        .route("/api/reservations", get(list_mine))
        .route("/api/reservations/{id}", get(detail).delete(cancel))
}

/// POST /api/shops/{id}/reservations
pub async fn make(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(shop_id): Path<i64>,
    ApiJson(payload): ApiJson<ReservationRequest>,
) -> Result<(StatusCode, Json<Reservation>), AppError> {
    let now = state.clock.now();
    let reservation =
        reservation_service::make(&state.pool, &user.actor(), shop_id, payload, now).await?;
    Ok((StatusCode::CREATED, Json(reservation)))
}

/// GET /api/reservations?page=
pub async fn list_mine(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<PageQuery>,
) -> ApiResult<Page<ReservationWithShop>> {
    Ok(Json(
        reservation_service::list_mine(&state.pool, &user.actor(), query.page).await?,
    ))
}

/// GET /api/reservations/{id} (owner only)
pub async fn detail(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<Reservation> {
    Ok(Json(
        reservation_service::get(&state.pool, &user.actor(), id).await?,
    ))
}

/// DELETE /api/reservations/{id} (owner only)
pub async fn cancel(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<ApiResponse<()>, AppError> {
    reservation_service::cancel(&state.pool, &user.actor(), id).await?;
    Ok(ApiResponse::ok())
}
