//! Booking rules
//!
//! Pure decision logic, independent of HTTP and storage:
//! - [`admission`]: may a (shop, date, time, party) reservation be accepted
//! - [`hours`]: the `HH:MM-HH:MM` opening-hours format
//! - [`ownership`]: may an actor mutate a user-owned record
//! - [`clock`]: civil "now" used by admission

pub mod admission;
pub mod clock;
pub mod hours;
pub mod ownership;

pub use admission::{Admission, Rejection, RejectionKind, admit};
pub use clock::CivilClock;
pub use hours::{HoursError, OpeningHours};
pub use ownership::{Actor, Owned, can_mutate, ensure_owner};
