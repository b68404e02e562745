use chrono::{Local, NaiveDate};

/// Clock abstracts access to the current date so forecasts stay deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns today's naive local date.
    fn today(&self) -> NaiveDate;
}

/// Real clock backed by the local system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
