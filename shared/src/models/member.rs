//! Member Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Member profile, one per user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MemberProfile {
    pub id: i64,
    pub user_id: i64,
    pub display_name: String,
    pub birth_date: Option<NaiveDate>,
    /// Billing provider customer, created on first billing interaction
    #[serde(skip_serializing)]
    pub stripe_customer_id: Option<String>,
}

/// Update member payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberProfileUpdate {
    #[serde(default)]
    pub display_name: String,
    pub birth_date: Option<NaiveDate>,
}
