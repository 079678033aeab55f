//! The scheduling-eligibility core: pure calendar arithmetic and rule
//! evaluation, decoupled from persistence. The booking workflow in
//! `modules::appointments` wires these pieces to the database.

pub mod calendar;
pub mod conflict;
pub mod eligibility;
pub mod rejection;
pub mod slot;

pub use calendar::{BlockedDates, CalendarSnapshot, LunchBreak, OperatingWindow, WeekdayHours};
pub use conflict::{has_conflict, BookedInterval};
pub use eligibility::{BookingPolicy, EligibilityEvaluator};
pub use rejection::{Rejection, RejectionKind};
pub use slot::{minutes_since_midnight, normalize_slot, parse_date, CanonicalSlot};
