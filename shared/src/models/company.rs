//! Company Model

use serde::{Deserialize, Serialize};

/// Operator information for the "about" page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub founded_year: i32,
    pub description: String,
    pub headquarters: String,
}
