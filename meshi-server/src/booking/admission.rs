//! Reservation admission rule
//!
//! Decides whether a proposed booking can be accepted, in this order:
//! 1. the civil date+time must be strictly later than `now`
//! 2. the shop's opening hours must parse (`HH:MM-HH:MM`, same day)
//! 3. the time must fall in `[open, close)`
//! 4. the party size must be at least 1
//!
//! Uniqueness of `(shop, date, time, user)` is not decided here; the
//! reservation service checks it and the storage index enforces it.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use shared::error::{AppError, ErrorCode};

use super::hours::{HoursError, OpeningHours};

/// Outcome of [`admit`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    Accepted,
    Rejected(Rejection),
}

impl Admission {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// `Ok(())` when accepted, the rejection otherwise
    pub fn into_result(self) -> Result<(), Rejection> {
        match self {
            Self::Accepted => Ok(()),
            Self::Rejected(r) => Err(r),
        }
    }
}

/// Who has to fix a rejected booking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionKind {
    /// The user can correct the form and resubmit
    InputInvalid,
    /// The shop's stored configuration is unusable
    DataIntegrity,
}

/// Why a booking was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Date+time not strictly after now
    InPast,
    /// Opening hours missing or malformed
    HoursNotConfigured,
    /// Close time not after open time
    UnsupportedHours { open: NaiveTime, close: NaiveTime },
    /// Time outside `[open, close)`
    OutsideHours { open: NaiveTime, close: NaiveTime },
    /// Party size below 1
    InvalidPartySize(i32),
}

impl Rejection {
    pub fn kind(&self) -> RejectionKind {
        match self {
            Self::HoursNotConfigured | Self::UnsupportedHours { .. } => {
                RejectionKind::DataIntegrity
            }
            Self::InPast | Self::OutsideHours { .. } | Self::InvalidPartySize(_) => {
                RejectionKind::InputInvalid
            }
        }
    }

    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::InPast => ErrorCode::ReservationInPast,
            Self::HoursNotConfigured | Self::UnsupportedHours { .. } => {
                ErrorCode::ShopHoursNotConfigured
            }
            Self::OutsideHours { .. } => ErrorCode::ReservationOutsideHours,
            Self::InvalidPartySize(_) => ErrorCode::InvalidPartySize,
        }
    }

    /// Form field the rejection belongs to, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InPast => Some("date"),
            Self::OutsideHours { .. } => Some("time"),
            Self::InvalidPartySize(_) => Some("num_people"),
            Self::HoursNotConfigured | Self::UnsupportedHours { .. } => None,
        }
    }

    /// Message shown to the user
    pub fn reason(&self) -> String {
        match self {
            Self::InPast => "Reservation date and time must be in the future".to_string(),
            Self::HoursNotConfigured => "Shop hours are not configured".to_string(),
            Self::UnsupportedHours { open, close } => format!(
                "Shop hours {}-{} span midnight, which is not supported",
                open.format("%H:%M"),
                close.format("%H:%M")
            ),
            Self::OutsideHours { open, close } => format!(
                "Reservation time is outside opening hours ({}-{})",
                open.format("%H:%M"),
                close.format("%H:%M")
            ),
            Self::InvalidPartySize(n) => format!("Party size must be at least 1 (got {n})"),
        }
    }
}

impl From<HoursError> for Rejection {
    fn from(e: HoursError) -> Self {
        match e {
            HoursError::Overnight { open, close } => Self::UnsupportedHours { open, close },
            HoursError::MissingSeparator
            | HoursError::TooManySeparators
            | HoursError::InvalidTime(_) => Self::HoursNotConfigured,
        }
    }
}

impl From<Rejection> for AppError {
    fn from(r: Rejection) -> Self {
        let mut err = AppError::with_message(r.error_code(), r.reason());
        if let Some(field) = r.field() {
            err = err.with_detail("field", field);
        }
        match r {
            Rejection::OutsideHours { open, close }
            | Rejection::UnsupportedHours { open, close } => err
                .with_detail("open", open.format("%H:%M").to_string())
                .with_detail("close", close.format("%H:%M").to_string()),
            _ => err,
        }
    }
}

/// Decide whether a reservation at `date` `time` for `num_people` may be
/// accepted by a shop with `opening_hours`, given the civil time `now`.
pub fn admit(
    opening_hours: &str,
    date: NaiveDate,
    time: NaiveTime,
    num_people: i32,
    now: NaiveDateTime,
) -> Admission {
    match check(opening_hours, date, time, num_people, now) {
        Ok(()) => Admission::Accepted,
        Err(r) => Admission::Rejected(r),
    }
}

fn check(
    opening_hours: &str,
    date: NaiveDate,
    time: NaiveTime,
    num_people: i32,
    now: NaiveDateTime,
) -> Result<(), Rejection> {
    if date.and_time(time) <= now {
        return Err(Rejection::InPast);
    }

    let hours = OpeningHours::parse(opening_hours)?;
    if !hours.contains(time) {
        return Err(Rejection::OutsideHours {
            open: hours.open(),
            close: hours.close(),
        });
    }

    if num_people < 1 {
        return Err(Rejection::InvalidPartySize(num_people));
    }
    Ok(())
}
