//! Billing Model

use serde::{Deserialize, Serialize};

/// Hosted page the client should redirect to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectUrl {
    pub url: String,
}
