//! Review Repository

use super::{RepoError, RepoResult};
use shared::models::{Review, ReviewWithAuthor};
use sqlx::SqlitePool;

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Review>> {
    let review = sqlx::query_as::<_, Review>(
        "SELECT id, shop_id, user_id, content, rating, created_at FROM reviews WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(review)
}

/// Reviews of a shop, newest first
pub async fn list_for_shop(pool: &SqlitePool, shop_id: i64) -> RepoResult<Vec<ReviewWithAuthor>> {
    let reviews = sqlx::query_as::<_, ReviewWithAuthor>(
        "SELECT r.id, r.shop_id, r.user_id, u.username, r.content, r.rating, r.created_at FROM reviews r JOIN users u ON r.user_id = u.id WHERE r.shop_id = ? ORDER BY r.created_at DESC, r.id DESC",
    )
    .bind(shop_id)
    .fetch_all(pool)
    .await?;
    Ok(reviews)
}

pub async fn create(
    pool: &SqlitePool,
    shop_id: i64,
    user_id: i64,
    content: &str,
    rating: i32,
) -> RepoResult<Review> {
    let now = shared::util::now_millis();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO reviews (shop_id, user_id, content, rating, created_at) VALUES (?1, ?2, ?3, ?4, ?5) RETURNING id",
    )
    .bind(shop_id)
    .bind(user_id)
    .bind(content)
    .bind(rating)
    .bind(now)
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create review".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, content: &str, rating: i32) -> RepoResult<Review> {
    let rows = sqlx::query("UPDATE reviews SET content = ?1, rating = ?2 WHERE id = ?3")
        .bind(content)
        .bind(rating)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Review {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Review {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM reviews WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
