//! Billing endpoints: shop checkout, subscription checkout, billing portal

use axum::extract::{Path, State};
use axum::routing::post;
use axum::{Json, Router};
use shared::models::RedirectUrl;

use super::ApiResult;
use crate::auth::CurrentUser;
use crate::services::billing;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/shops/{id}/checkout", post(shop_checkout))
        .route("/api/subscription", post(subscription_checkout))
        .route("/api/billing/portal", post(billing_portal))
}

/// POST /api/shops/{id}/checkout
pub async fn shop_checkout(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(shop_id): Path<i64>,
) -> ApiResult<RedirectUrl> {
    Ok(Json(
        billing::shop_checkout(&state, &user.actor(), shop_id).await?,
    ))
}

/// POST /api/subscription
pub async fn subscription_checkout(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<RedirectUrl> {
    Ok(Json(
        billing::subscription_checkout(&state, &user.actor()).await?,
    ))
}

/// POST /api/billing/portal
pub async fn billing_portal(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<RedirectUrl> {
    Ok(Json(billing::billing_portal(&state, &user.actor()).await?))
}
