//! Reviews: any user may post; only the author may edit or delete

use shared::error::{AppError, ErrorCode};
use shared::models::{MAX_RATING, MIN_RATING, Review, ReviewInput};
use sqlx::SqlitePool;

use super::shop as shop_service;
use crate::booking::{Actor, ensure_owner};
use crate::db::repository::review;
use crate::error::ServiceResult;

fn validate(input: &ReviewInput) -> Result<String, AppError> {
    let content = input.content.trim();
    if content.is_empty() {
        return Err(AppError::field(
            "content",
            ErrorCode::ReviewContentEmpty,
            "Review content is required",
        ));
    }
    if !(MIN_RATING..=MAX_RATING).contains(&input.rating) {
        return Err(AppError::field(
            "rating",
            ErrorCode::RatingOutOfRange,
            format!("Rating must be between {MIN_RATING} and {MAX_RATING}"),
        ));
    }
    Ok(content.to_string())
}

async fn find(pool: &SqlitePool, id: i64) -> ServiceResult<Review> {
    Ok(review::find_by_id(pool, id).await?.ok_or_else(|| {
        AppError::with_message(ErrorCode::ReviewNotFound, format!("Review {id} not found"))
    })?)
}

pub async fn create(
    pool: &SqlitePool,
    actor: &Actor,
    shop_id: i64,
    input: ReviewInput,
) -> ServiceResult<Review> {
    let content = validate(&input)?;
    shop_service::find(pool, shop_id).await?;
    let created = review::create(pool, shop_id, actor.user_id, &content, input.rating).await?;
    tracing::info!(review_id = created.id, shop_id, user_id = actor.user_id, "Review posted");
    Ok(created)
}

pub async fn update(
    pool: &SqlitePool,
    actor: &Actor,
    id: i64,
    input: ReviewInput,
) -> ServiceResult<Review> {
    let existing = find(pool, id).await?;
    ensure_owner(actor, &existing)?;
    let content = validate(&input)?;
    Ok(review::update(pool, id, &content, input.rating).await?)
}

pub async fn delete(pool: &SqlitePool, actor: &Actor, id: i64) -> ServiceResult<()> {
    let existing = find(pool, id).await?;
    ensure_owner(actor, &existing)?;
    review::delete(pool, id).await?;
    tracing::info!(review_id = id, user_id = actor.user_id, "Review deleted");
    Ok(())
}
