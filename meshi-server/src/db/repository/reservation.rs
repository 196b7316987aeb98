//! Reservation Repository

use super::{RepoError, RepoResult, page_bounds};
use chrono::{NaiveDate, NaiveTime};
use shared::models::{Reservation, ReservationWithShop};
use sqlx::SqlitePool;

const RESERVATION_SELECT: &str =
    "SELECT id, shop_id, user_id, date, time, num_people, created_at FROM reservations";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Reservation>> {
    let reservation =
        sqlx::query_as::<_, Reservation>(&format!("{RESERVATION_SELECT} WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(reservation)
}

/// Whether `user_id` already holds `(shop_id, date, time)`
pub async fn exists(
    pool: &SqlitePool,
    shop_id: i64,
    user_id: i64,
    date: NaiveDate,
    time: NaiveTime,
) -> RepoResult<bool> {
    let found = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM reservations WHERE shop_id = ?1 AND date = ?2 AND time = ?3 AND user_id = ?4",
    )
    .bind(shop_id)
    .bind(date)
    .bind(time)
    .bind(user_id)
    .fetch_one(pool)
    .await?;
    Ok(found > 0)
}

/// Insert; a concurrent duplicate surfaces as `RepoError::Duplicate`
pub async fn create(
    pool: &SqlitePool,
    shop_id: i64,
    user_id: i64,
    date: NaiveDate,
    time: NaiveTime,
    num_people: i32,
) -> RepoResult<Reservation> {
    let now = shared::util::now_millis();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO reservations (shop_id, user_id, date, time, num_people, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6) RETURNING id",
    )
    .bind(shop_id)
    .bind(user_id)
    .bind(date)
    .bind(time)
    .bind(num_people)
    .bind(now)
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create reservation".into()))
}

/// A user's reservations, latest date/time first
pub async fn list_for_user(
    pool: &SqlitePool,
    user_id: i64,
    page: u32,
    per_page: u32,
) -> RepoResult<(Vec<ReservationWithShop>, i64)> {
    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reservations WHERE user_id = ?")
        .bind(user_id)
        .fetch_one(pool)
        .await?;

    let (limit, offset) = page_bounds(page, per_page);
    let rows = sqlx::query_as::<_, ReservationWithShop>(
        "SELECT r.id, r.shop_id, s.name AS shop_name, r.user_id, r.date, r.time, r.num_people, r.created_at FROM reservations r JOIN shops s ON r.shop_id = s.id WHERE r.user_id = ?1 ORDER BY r.date DESC, r.time DESC, r.id DESC LIMIT ?2 OFFSET ?3",
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok((rows, total))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM reservations WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
