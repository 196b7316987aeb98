//! Favorite Repository
//!
//! `(user_id, shop_id)` is unique; inserts never fail on that index.

use super::RepoResult;
use shared::models::{Favorite, FavoriteWithShop, Shop};
use sqlx::SqlitePool;

pub async fn find(pool: &SqlitePool, user_id: i64, shop_id: i64) -> RepoResult<Option<Favorite>> {
    let favorite = sqlx::query_as::<_, Favorite>(
        "SELECT id, user_id, shop_id, created_at FROM favorites WHERE user_id = ? AND shop_id = ?",
    )
    .bind(user_id)
    .bind(shop_id)
    .fetch_optional(pool)
    .await?;
    Ok(favorite)
}

/// Insert unless present; returns whether a row was added
pub async fn insert_if_absent(pool: &SqlitePool, user_id: i64, shop_id: i64) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "INSERT INTO favorites (user_id, shop_id, created_at) VALUES (?1, ?2, ?3) ON CONFLICT (user_id, shop_id) DO NOTHING",
    )
    .bind(user_id)
    .bind(shop_id)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Returns whether a row was removed
pub async fn delete(pool: &SqlitePool, user_id: i64, shop_id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM favorites WHERE user_id = ? AND shop_id = ?")
        .bind(user_id)
        .bind(shop_id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

#[derive(sqlx::FromRow)]
struct FavoriteRow {
    favorite_id: i64,
    favorite_created_at: i64,
    #[sqlx(flatten)]
    shop: Shop,
}

/// A user's favorites with shops resolved, in insertion order
pub async fn list_for_user(pool: &SqlitePool, user_id: i64) -> RepoResult<Vec<FavoriteWithShop>> {
    let rows = sqlx::query_as::<_, FavoriteRow>(
        "SELECT f.id AS favorite_id, f.created_at AS favorite_created_at, s.id, s.name, s.category_id, s.img, s.address, s.budget, s.closed_days, s.opening_hours, s.detail, s.price, s.created_at, s.updated_at FROM favorites f JOIN shops s ON f.shop_id = s.id WHERE f.user_id = ? ORDER BY f.created_at, f.id",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows
        .into_iter()
        .map(|r| FavoriteWithShop {
            id: r.favorite_id,
            created_at: r.favorite_created_at,
            shop: r.shop,
        })
        .collect())
}
