//! Core abstractions for habitvault.
//!
//! Date handling and the injected time source shared by every feature.

mod clock;
pub mod date;

pub use clock::{Clock, FixedClock, SystemClock};
pub use date::{format_date, parse_date, parse_date_input, WeekStart, DATE_FORMAT};
