//! Civil clock for the shops' locale
//!
//! Reservations are stored as naive local date+time, so "now" must be
//! expressed in the same zone before comparing.

use chrono::{FixedOffset, NaiveDateTime, Offset, Utc};

/// Default offset: UTC+09:00
pub const DEFAULT_OFFSET_MINUTES: i32 = 9 * 60;

#[derive(Debug, Clone, Copy)]
pub struct CivilClock {
    offset: FixedOffset,
}

impl CivilClock {
    /// Build from an offset east of UTC in minutes; `None` when out of range
    pub fn from_offset_minutes(minutes: i32) -> Option<Self> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(|offset| Self { offset })
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Current wall-clock time in the configured zone
    pub fn now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.offset).naive_local()
    }
}

impl Default for CivilClock {
    fn default() -> Self {
        Self::from_offset_minutes(DEFAULT_OFFSET_MINUTES).unwrap_or(Self { offset: Utc.fix() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_utc_plus_nine() {
        assert_eq!(CivilClock::default().offset().local_minus_utc(), 9 * 3600);
    }

    #[test]
    fn test_out_of_range_offset() {
        assert!(CivilClock::from_offset_minutes(24 * 60).is_none());
        assert!(CivilClock::from_offset_minutes(-300).is_some());
        assert!(CivilClock::from_offset_minutes(40_000_000).is_none());
        assert!(CivilClock::from_offset_minutes(i32::MIN).is_none());
    }

    #[test]
    fn test_now_shifted_from_utc() {
        let clock = CivilClock::from_offset_minutes(60).unwrap();
        let utc = Utc::now().naive_utc();
        let local = clock.now();
        let diff = (local - utc).num_minutes();
        assert!((59..=61).contains(&diff), "diff was {diff}");
    }
}
