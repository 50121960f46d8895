//! Time source for "today".
//!
//! Nothing in the engine reads the system clock; callers pass a [`Clock`]
//! so that tests and the `--today` flag can pin the current day.

use chrono::{Local, NaiveDate};

/// Source of the current calendar day.
pub trait Clock {
    /// The current local calendar day.
    fn today(&self) -> NaiveDate;
}

/// The machine's local clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock stuck on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}
