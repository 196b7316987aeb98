//! Member profile API handlers

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use shared::models::{MemberProfile, MemberProfileUpdate};

use super::{ApiJson, ApiResult};
use crate::auth::CurrentUser;
use crate::services::member as member_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/member", get(get_profile).put(update_profile))
}

/// GET /api/member
pub async fn get_profile(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<MemberProfile> {
    Ok(Json(member_service::get(&state.pool, &user.actor()).await?))
}

/// PUT /api/member
pub async fn update_profile(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiJson(payload): ApiJson<MemberProfileUpdate>,
) -> ApiResult<MemberProfile> {
    let today = state.clock.now().date();
    Ok(Json(
        member_service::update(&state.pool, &user.actor(), payload, today).await?,
    ))
}
