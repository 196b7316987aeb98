//! Company ("about") endpoint

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use shared::error::{AppError, ErrorCode};
use shared::models::Company;

use super::ApiResult;
use crate::db::repository::company;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/company", get(about))
}

/// GET /api/company
pub async fn about(State(state): State<AppState>) -> ApiResult<Company> {
    let found = company::find_first(&state.pool)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CompanyNotFound))?;
    Ok(Json(found))
}
