//! Data models
//!
//! Shared between the server and API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod billing;
pub mod category;
pub mod company;
pub mod favorite;
pub mod member;
pub mod reservation;
pub mod review;
pub mod shop;
pub mod user;

// Re-exports
pub use billing::*;
pub use category::*;
pub use company::*;
pub use favorite::*;
pub use member::*;
pub use reservation::*;
pub use review::*;
pub use shop::*;
pub use user::*;

/// One page of a listing
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

impl<T> Page<T> {
    /// Number of pages needed for `total` rows (at least 1)
    pub fn page_count(&self) -> u32 {
        if self.per_page == 0 {
            return 1;
        }
        let pages = (self.total.max(0) as u64).div_ceil(self.per_page as u64);
        pages.max(1) as u32
    }
}
