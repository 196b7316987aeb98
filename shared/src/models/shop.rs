//! Shop Model

use serde::{Deserialize, Serialize};

use super::category::Category;
use super::review::ReviewWithAuthor;

/// Budget tier shown on the shop card
///
/// Stored as `LOW` / `MED` / `HIGH`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum Budget {
    /// ~999 yen
    #[serde(rename = "LOW")]
    #[cfg_attr(feature = "db", sqlx(rename = "LOW"))]
    Low,
    /// 1,000~2,999 yen
    #[default]
    #[serde(rename = "MED")]
    #[cfg_attr(feature = "db", sqlx(rename = "MED"))]
    Medium,
    /// 3,000 yen~
    #[serde(rename = "HIGH")]
    #[cfg_attr(feature = "db", sqlx(rename = "HIGH"))]
    High,
}

impl Budget {
    /// Human-readable price band
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "~999",
            Self::Medium => "1,000~2,999",
            Self::High => "3,000~",
        }
    }
}

/// Default reservation fee (whole currency units)
pub const DEFAULT_SHOP_PRICE: i64 = 1000;

/// Default image name when none is uploaded
pub const NO_IMAGE: &str = "noImage.png";

/// Shop entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Shop {
    pub id: i64,
    pub name: String,
    pub category_id: Option<i64>,
    pub img: String,
    pub address: String,
    pub budget: Budget,
    /// Free text, e.g. "Mon"
    pub closed_days: String,
    /// Single open-close interval, e.g. "11:00-22:00"; may be blank
    pub opening_hours: String,
    pub detail: Option<String>,
    /// Reservation fee, charged as-is in the configured currency
    pub price: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create shop payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopCreate {
    pub name: String,
    pub category_id: Option<i64>,
    pub img: Option<String>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub budget: Budget,
    #[serde(default)]
    pub closed_days: String,
    #[serde(default)]
    pub opening_hours: String,
    pub detail: Option<String>,
    pub price: Option<i64>,
}

/// Update shop payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShopUpdate {
    pub name: Option<String>,
    pub category_id: Option<i64>,
    pub img: Option<String>,
    pub address: Option<String>,
    pub budget: Option<Budget>,
    pub closed_days: Option<String>,
    pub opening_hours: Option<String>,
    pub detail: Option<String>,
    pub price: Option<i64>,
}

/// Shop detail page: the shop, its category and reviews newest-first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopDetail {
    pub shop: Shop,
    pub category: Option<Category>,
    pub budget_label: String,
    pub reviews: Vec<ReviewWithAuthor>,
}

/// Shop list query (keyword + category filter, 1-based page)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShopQuery {
    pub keyword: Option<String>,
    pub category_id: Option<i64>,
    pub page: Option<u32>,
}
