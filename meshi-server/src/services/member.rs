//! Member profile

use chrono::NaiveDate;
use shared::error::{AppError, ErrorCode};
use shared::models::{MemberProfile, MemberProfileUpdate};
use sqlx::SqlitePool;

use crate::booking::Actor;
use crate::db::repository::member;
use crate::error::ServiceResult;

/// The actor's profile, created empty on first access
pub async fn get(pool: &SqlitePool, actor: &Actor) -> ServiceResult<MemberProfile> {
    Ok(member::get_or_create(pool, actor.user_id).await?)
}

/// Replace display name and birth date; `today` is the civil date
pub async fn update(
    pool: &SqlitePool,
    actor: &Actor,
    data: MemberProfileUpdate,
    today: NaiveDate,
) -> ServiceResult<MemberProfile> {
    if let Some(birth_date) = data.birth_date
        && birth_date > today
    {
        return Err(AppError::field(
            "birth_date",
            ErrorCode::InvalidBirthDate,
            "Birth date cannot be in the future",
        )
        .into());
    }

    member::get_or_create(pool, actor.user_id).await?;
    let updated = member::update(
        pool,
        actor.user_id,
        data.display_name.trim(),
        data.birth_date,
    )
    .await?;
    tracing::info!(user_id = actor.user_id, "Member profile updated");
    Ok(updated)
}
