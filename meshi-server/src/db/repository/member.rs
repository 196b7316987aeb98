//! Member Profile Repository

use super::{RepoError, RepoResult};
use chrono::NaiveDate;
use shared::models::MemberProfile;
use sqlx::{Sqlite, SqlitePool, Transaction};

const PROFILE_SELECT: &str =
    "SELECT id, user_id, display_name, birth_date, stripe_customer_id FROM member_profiles";

pub async fn find_by_user(pool: &SqlitePool, user_id: i64) -> RepoResult<Option<MemberProfile>> {
    let profile =
        sqlx::query_as::<_, MemberProfile>(&format!("{PROFILE_SELECT} WHERE user_id = ?"))
            .bind(user_id)
            .fetch_optional(pool)
            .await?;
    Ok(profile)
}

/// Insert inside an open transaction
pub async fn insert(
    tx: &mut Transaction<'_, Sqlite>,
    user_id: i64,
    display_name: &str,
    birth_date: Option<NaiveDate>,
) -> RepoResult<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO member_profiles (user_id, display_name, birth_date) VALUES (?1, ?2, ?3) RETURNING id",
    )
    .bind(user_id)
    .bind(display_name)
    .bind(birth_date)
    .fetch_one(&mut **tx)
    .await?;
    Ok(id)
}

/// Fetch the profile, creating an empty one when missing
pub async fn get_or_create(pool: &SqlitePool, user_id: i64) -> RepoResult<MemberProfile> {
    sqlx::query(
        "INSERT INTO member_profiles (user_id, display_name) VALUES (?1, '') ON CONFLICT (user_id) DO NOTHING",
    )
    .bind(user_id)
    .execute(pool)
    .await?;
    find_by_user(pool, user_id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create member profile".into()))
}

pub async fn update(
    pool: &SqlitePool,
    user_id: i64,
    display_name: &str,
    birth_date: Option<NaiveDate>,
) -> RepoResult<MemberProfile> {
    let rows = sqlx::query(
        "UPDATE member_profiles SET display_name = ?1, birth_date = ?2 WHERE user_id = ?3",
    )
    .bind(display_name)
    .bind(birth_date)
    .bind(user_id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Profile for user {user_id} not found")));
    }
    find_by_user(pool, user_id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Profile for user {user_id} not found")))
}

/// Record the billing customer id; keeps an id that is already set
pub async fn set_stripe_customer(
    pool: &SqlitePool,
    user_id: i64,
    customer_id: &str,
) -> RepoResult<()> {
    sqlx::query(
        "UPDATE member_profiles SET stripe_customer_id = ?1 WHERE user_id = ?2 AND stripe_customer_id IS NULL",
    )
    .bind(customer_id)
    .bind(user_id)
    .execute(pool)
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support;

    #[tokio::test]
    async fn test_get_or_create_is_idempotent() {
        let pool = test_support::pool().await;
        let user = test_support::user(&pool, "jiro").await;

        let first = get_or_create(&pool, user.id).await.unwrap();
        let second = get_or_create(&pool, user.id).await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(first.display_name, "");
    }

    #[tokio::test]
    async fn test_update_profile() {
        let pool = test_support::pool().await;
        let user = test_support::user(&pool, "jiro").await;
        get_or_create(&pool, user.id).await.unwrap();

        let birth = NaiveDate::from_ymd_opt(1990, 4, 1);
        let updated = update(&pool, user.id, "Jiro", birth).await.unwrap();
        assert_eq!(updated.display_name, "Jiro");
        assert_eq!(updated.birth_date, birth);
    }

    #[tokio::test]
    async fn test_stripe_customer_set_once() {
        let pool = test_support::pool().await;
        let user = test_support::user(&pool, "jiro").await;
        get_or_create(&pool, user.id).await.unwrap();

        set_stripe_customer(&pool, user.id, "cus_1").await.unwrap();
        set_stripe_customer(&pool, user.id, "cus_2").await.unwrap();
        let profile = find_by_user(&pool, user.id).await.unwrap().unwrap();
        assert_eq!(profile.stripe_customer_id.as_deref(), Some("cus_1"));
    }
}
