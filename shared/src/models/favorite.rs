//! Favorite Model

use serde::{Deserialize, Serialize};

use super::shop::Shop;

/// Favorite join row; `(user_id, shop_id)` is unique
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Favorite {
    pub id: i64,
    pub user_id: i64,
    pub shop_id: i64,
    pub created_at: i64,
}

/// Favorite with its shop resolved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteWithShop {
    pub id: i64,
    pub created_at: i64,
    pub shop: Shop,
}
