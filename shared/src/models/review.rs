//! Review Model

use serde::{Deserialize, Serialize};

/// Lowest accepted rating
pub const MIN_RATING: i32 = 0;
/// Highest accepted rating
pub const MAX_RATING: i32 = 5;

/// Review entity, always listed newest-first
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Review {
    pub id: i64,
    pub shop_id: i64,
    pub user_id: i64,
    pub content: String,
    pub rating: i32,
    pub created_at: i64,
}

/// Review with author name (shop detail view)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ReviewWithAuthor {
    pub id: i64,
    pub shop_id: i64,
    pub user_id: i64,
    pub username: String,
    pub content: String,
    pub rating: i32,
    pub created_at: i64,
}

/// Create/update review payload (both fields editable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewInput {
    pub content: String,
    #[serde(default)]
    pub rating: i32,
}
