//! Favorite set manager
//!
//! At most one favorite per (user, shop). `add` and `remove` are idempotent
//! and never surface the uniqueness index as an error.

use shared::models::{Favorite, FavoriteWithShop};
use sqlx::SqlitePool;

use super::shop as shop_service;
use crate::booking::Actor;
use crate::db::repository::favorite;
use crate::error::{ServiceError, ServiceResult};

/// Favorite `shop_id`, returning the stored row (existing or new)
pub async fn add(pool: &SqlitePool, actor: &Actor, shop_id: i64) -> ServiceResult<Favorite> {
    shop_service::find(pool, shop_id).await?;

    if let Some(existing) = favorite::find(pool, actor.user_id, shop_id).await? {
        return Ok(existing);
    }
    if favorite::insert_if_absent(pool, actor.user_id, shop_id).await? {
        tracing::info!(shop_id, user_id = actor.user_id, "Favorite added");
    }
    favorite::find(pool, actor.user_id, shop_id)
        .await?
        .ok_or_else(|| ServiceError::Db("Favorite missing after insert".into()))
}

/// Unfavorite `shop_id`; absent favorites are not an error
pub async fn remove(pool: &SqlitePool, actor: &Actor, shop_id: i64) -> ServiceResult<()> {
    shop_service::find(pool, shop_id).await?;

    if favorite::delete(pool, actor.user_id, shop_id).await? {
        tracing::info!(shop_id, user_id = actor.user_id, "Favorite removed");
    }
    Ok(())
}

/// The actor's favorites in the order they were added
pub async fn list(pool: &SqlitePool, actor: &Actor) -> ServiceResult<Vec<FavoriteWithShop>> {
    Ok(favorite::list_for_user(pool, actor.user_id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support;
    use shared::error::{AppError, ErrorCode};

    async fn setup() -> (SqlitePool, Actor, i64) {
        let pool = test_support::pool().await;
        let user = test_support::user(&pool, "fan").await;
        let shop = test_support::shop(&pool, "Tebasaki", "").await;
        let actor = Actor {
            user_id: user.id,
            is_staff: false,
        };
        (pool, actor, shop.id)
    }

    async fn count(pool: &SqlitePool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM favorites")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_scenario_add_twice_remove_twice() {
        let (pool, actor, shop_id) = setup().await;

        let first = add(&pool, &actor, shop_id).await.unwrap();
        let second = add(&pool, &actor, shop_id).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(count(&pool).await, 1);

        remove(&pool, &actor, shop_id).await.unwrap();
        remove(&pool, &actor, shop_id).await.unwrap();
        assert_eq!(count(&pool).await, 0);
    }

    #[tokio::test]
    async fn test_unknown_shop_not_found() {
        let (pool, actor, _) = setup().await;
        let err = AppError::from(add(&pool, &actor, 404).await.unwrap_err());
        assert_eq!(err.code, ErrorCode::ShopNotFound);
        let err = AppError::from(remove(&pool, &actor, 404).await.unwrap_err());
        assert_eq!(err.code, ErrorCode::ShopNotFound);
    }

    #[tokio::test]
    async fn test_sets_are_per_user() {
        let (pool, actor, shop_id) = setup().await;
        let other = test_support::user(&pool, "other").await;
        let other = Actor {
            user_id: other.id,
            is_staff: false,
        };

        add(&pool, &actor, shop_id).await.unwrap();
        add(&pool, &other, shop_id).await.unwrap();
        remove(&pool, &other, shop_id).await.unwrap();

        let mine = list(&pool, &actor).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].shop.id, shop_id);
        assert!(list(&pool, &other).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_in_insertion_order() {
        let (pool, actor, first_shop) = setup().await;
        let second_shop = test_support::shop(&pool, "Miso Katsu", "").await.id;

        add(&pool, &actor, second_shop).await.unwrap();
        add(&pool, &actor, first_shop).await.unwrap();

        let ids: Vec<i64> = list(&pool, &actor)
            .await
            .unwrap()
            .iter()
            .map(|f| f.shop.id)
            .collect();
        assert_eq!(ids, [second_shop, first_shop]);
    }
}
