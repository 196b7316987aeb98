//! Opening hours: a single same-day `open-close` interval in 24-hour `HH:MM`

use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use thiserror::Error;

const TIME_FORMAT: &str = "%H:%M";

/// Why an opening-hours string cannot be used
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HoursError {
    #[error("opening hours have no '-' separator")]
    MissingSeparator,

    #[error("opening hours must contain exactly one '-'")]
    TooManySeparators,

    #[error("invalid time of day: {0:?}")]
    InvalidTime(String),

    /// Close time not after open time (spans midnight or is empty)
    #[error("overnight opening hours are not supported: {open}-{close}")]
    Overnight { open: NaiveTime, close: NaiveTime },
}

/// Parsed opening hours, always `open < close`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpeningHours {
    open: NaiveTime,
    close: NaiveTime,
}

impl OpeningHours {
    /// Parse `"HH:MM-HH:MM"`
    pub fn parse(s: &str) -> Result<Self, HoursError> {
        let mut parts = s.split('-');
        let (Some(open), Some(close)) = (parts.next(), parts.next()) else {
            return Err(HoursError::MissingSeparator);
        };
        if parts.next().is_some() {
            return Err(HoursError::TooManySeparators);
        }

        let open = parse_time(open)?;
        let close = parse_time(close)?;
        if close <= open {
            return Err(HoursError::Overnight { open, close });
        }
        Ok(Self { open, close })
    }

    pub fn open(&self) -> NaiveTime {
        self.open
    }

    pub fn close(&self) -> NaiveTime {
        self.close
    }

    /// Half-open: opening time is bookable, closing time is not
    pub fn contains(&self, time: NaiveTime) -> bool {
        self.open <= time && time < self.close
    }
}

impl FromStr for OpeningHours {
    type Err = HoursError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for OpeningHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.open.format(TIME_FORMAT),
            self.close.format(TIME_FORMAT)
        )
    }
}

fn parse_time(s: &str) -> Result<NaiveTime, HoursError> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, TIME_FORMAT).map_err(|_| HoursError::InvalidTime(s.to_string()))
}
