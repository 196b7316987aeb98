//! Reservation Model

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Reservation entity
///
/// `(shop_id, date, time, user_id)` is unique.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Reservation {
    pub id: i64,
    pub shop_id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub num_people: i32,
    pub created_at: i64,
}

/// Reservation joined with its shop name (my-reservations view)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ReservationWithShop {
    pub id: i64,
    pub shop_id: i64,
    pub shop_name: String,
    pub user_id: i64,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub num_people: i32,
    pub created_at: i64,
}

/// Make reservation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationRequest {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub num_people: i32,
}
