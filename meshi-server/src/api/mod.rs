//! HTTP API routes for meshi-server

pub mod auth;
pub mod billing;
pub mod category;
pub mod company;
pub mod extract;
pub mod favorite;
pub mod health;
pub mod member;
pub mod reservation;
pub mod review;
pub mod shop;

use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use serde::Deserialize;
use shared::error::AppError;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub use extract::ApiJson;

pub type ApiResult<T> = Result<axum::Json<T>, AppError>;

/// `?page=N` (1-based)
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(shop::router())
        .merge(category::router())
        .merge(review::router())
        .merge(reservation::router())
        .merge(favorite::router())
        .merge(member::router())
        .merge(billing::router())
        .merge(company::router())
}

/// Build the full application with middleware and state
pub fn build_app(state: AppState) -> Router {
    build_router()
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::with_status_code(
            http::StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(ConcurrencyLimitLayer::new(256))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
