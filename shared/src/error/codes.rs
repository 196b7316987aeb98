//! Unified error codes for meshi
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Shop errors (shops, categories, company)
//! - 4xxx: Reservation errors
//! - 5xxx: Billing errors
//! - 6xxx: Review errors
//! - 7xxx: Member errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so clients can switch on
/// them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Username is already taken
    UsernameExists = 1006,
    /// Password too short
    PasswordTooShort = 1007,

    // ==================== 2xxx: Permission ====================
    /// Permission denied (acting user does not own the resource)
    PermissionDenied = 2001,
    /// Staff account required
    StaffRequired = 2002,

    // ==================== 3xxx: Shop ====================
    /// Shop not found
    ShopNotFound = 3001,
    /// Shop name is empty
    ShopNameRequired = 3002,
    /// Stored opening hours cannot be used to admit a reservation
    ShopHoursNotConfigured = 3003,
    /// Opening hours supplied on a shop write are malformed
    InvalidOpeningHours = 3004,
    /// Shop price is negative
    InvalidShopPrice = 3005,
    /// Category not found
    CategoryNotFound = 3101,
    /// Category name already exists
    CategoryNameExists = 3102,
    /// No company record
    CompanyNotFound = 3201,

    // ==================== 4xxx: Reservation ====================
    /// Reservation not found
    ReservationNotFound = 4001,
    /// Reservation date/time is not in the future
    ReservationInPast = 4002,
    /// Reservation time is outside the shop's opening hours
    ReservationOutsideHours = 4003,
    /// Party size must be positive
    InvalidPartySize = 4004,
    /// Same user already booked this shop at this date and time
    ReservationAlreadyExists = 4005,

    // ==================== 5xxx: Billing ====================
    /// Checkout session could not be created
    PaymentSetupFailed = 5001,
    /// Billing portal session could not be created
    BillingPortalUnavailable = 5002,
    /// Billing customer could not be created
    BillingCustomerFailed = 5003,

    // ==================== 6xxx: Review ====================
    /// Review not found
    ReviewNotFound = 6001,
    /// Rating outside 0..=5
    RatingOutOfRange = 6002,
    /// Review content is empty
    ReviewContentEmpty = 6003,

    // ==================== 7xxx: Member ====================
    /// Birth date lies in the future
    InvalidBirthDate = 7002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::RequiredField => "Required field is missing",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid username or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::UsernameExists => "Username is already taken",
            ErrorCode::PasswordTooShort => "Password must be at least 8 characters",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::StaffRequired => "Staff account is required",

            // Shop
            ErrorCode::ShopNotFound => "Shop not found",
            ErrorCode::ShopNameRequired => "Shop name must not be empty",
            ErrorCode::ShopHoursNotConfigured => "Shop opening hours are not configured correctly",
            ErrorCode::InvalidOpeningHours => "Opening hours must look like HH:MM-HH:MM",
            ErrorCode::InvalidShopPrice => "Shop price must not be negative",
            ErrorCode::CategoryNotFound => "Category not found",
            ErrorCode::CategoryNameExists => "Category name already exists",
            ErrorCode::CompanyNotFound => "Company information not found",

            // Reservation
            ErrorCode::ReservationNotFound => "Reservation not found",
            ErrorCode::ReservationInPast => "Reservation must be in the future",
            ErrorCode::ReservationOutsideHours => "Reservation is outside opening hours",
            ErrorCode::InvalidPartySize => "Party size must be at least 1",
            ErrorCode::ReservationAlreadyExists => "Reservation already booked",

            // Billing
            ErrorCode::PaymentSetupFailed => "Payment setup failed",
            ErrorCode::BillingPortalUnavailable => "Billing portal could not be opened",
            ErrorCode::BillingCustomerFailed => "Billing customer could not be created",

            // Review
            ErrorCode::ReviewNotFound => "Review not found",
            ErrorCode::RatingOutOfRange => "Rating must be between 0 and 5",
            ErrorCode::ReviewContentEmpty => "Review content must not be empty",

            // Member
            ErrorCode::InvalidBirthDate => "Birth date must not be in the future",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            7 => Ok(ErrorCode::RequiredField),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1006 => Ok(ErrorCode::UsernameExists),
            1007 => Ok(ErrorCode::PasswordTooShort),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::StaffRequired),

            // Shop
            3001 => Ok(ErrorCode::ShopNotFound),
            3002 => Ok(ErrorCode::ShopNameRequired),
            3003 => Ok(ErrorCode::ShopHoursNotConfigured),
            3004 => Ok(ErrorCode::InvalidOpeningHours),
            3005 => Ok(ErrorCode::InvalidShopPrice),
            3101 => Ok(ErrorCode::CategoryNotFound),
            3102 => Ok(ErrorCode::CategoryNameExists),
            3201 => Ok(ErrorCode::CompanyNotFound),

            // Reservation
            4001 => Ok(ErrorCode::ReservationNotFound),
            4002 => Ok(ErrorCode::ReservationInPast),
            4003 => Ok(ErrorCode::ReservationOutsideHours),
            4004 => Ok(ErrorCode::InvalidPartySize),
            4005 => Ok(ErrorCode::ReservationAlreadyExists),

            // Billing
            5001 => Ok(ErrorCode::PaymentSetupFailed),
            5002 => Ok(ErrorCode::BillingPortalUnavailable),
            5003 => Ok(ErrorCode::BillingCustomerFailed),

            // Review
            6001 => Ok(ErrorCode::ReviewNotFound),
            6002 => Ok(ErrorCode::RatingOutOfRange),
            6003 => Ok(ErrorCode::ReviewContentEmpty),

            // Member
            7002 => Ok(ErrorCode::InvalidBirthDate),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
