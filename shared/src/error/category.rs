//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Authentication errors
/// - 2xxx: Permission errors
/// - 3xxx: Shop errors
/// - 4xxx: Reservation errors
/// - 5xxx: Billing errors
/// - 6xxx: Review errors
/// - 7xxx: Member errors
/// - 8xxx and above: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Permission errors (2xxx)
    Permission,
    /// Shop errors (3xxx)
    Shop,
    /// Reservation errors (4xxx)
    Reservation,
    /// Billing errors (5xxx)
    Billing,
    /// Review errors (6xxx)
    Review,
    /// Member errors (7xxx)
    Member,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            3000..4000 => Self::Shop,
            4000..5000 => Self::Reservation,
            5000..6000 => Self::Billing,
            6000..7000 => Self::Review,
            7000..8000 => Self::Member,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Permission => "permission",
            Self::Shop => "shop",
            Self::Reservation => "reservation",
            Self::Billing => "billing",
            Self::Review => "review",
            Self::Member => "member",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
