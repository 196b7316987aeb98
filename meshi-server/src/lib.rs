//! meshi-server: restaurant directory, reservations and member billing
//!
//! JSON API over SQLite. Accounts authenticate with JWT bearer tokens;
//! payments and subscriptions go through Stripe Checkout.

pub mod api;
pub mod auth;
pub mod booking;
pub mod config;
pub mod db;
pub mod error;
pub mod services;
pub mod state;
pub mod stripe;
pub mod util;
