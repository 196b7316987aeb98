//! Business operations
//!
//! Handlers stay thin: they extract the `Actor` and payload, call one
//! function here and serialize the result.

pub mod account;
pub mod billing;
pub mod category;
pub mod favorite;
pub mod member;
pub mod reservation;
pub mod review;
pub mod shop;

/// Shops per listing page
pub const SHOPS_PER_PAGE: u32 = 9;
/// Reservations per listing page
pub const RESERVATIONS_PER_PAGE: u32 = 10;
