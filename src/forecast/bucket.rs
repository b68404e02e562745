use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Days of the month treated as paydays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaydaySet(BTreeSet<u32>);

impl PaydaySet {
    pub fn new(days: impl IntoIterator<Item = u32>) -> Self {
        Self(days.into_iter().collect())
    }

    pub fn contains(&self, day_of_month: u32) -> bool {
        self.0.contains(&day_of_month)
    }

    pub fn days(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }
}

impl Default for PaydaySet {
    fn default() -> Self {
        Self::new([1, 3, 15, 30, 31])
    }
}

/// Grouping key for averaging: paydays form one bucket regardless of weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayBucket {
    Payday,
    Weekday(Weekday),
}

impl DayBucket {
    pub fn is_payday(&self) -> bool {
        matches!(self, DayBucket::Payday)
    }
}

/// Classifies a date: payday when its day of month is in `paydays`, its
/// weekday otherwise. Used for both history and projected dates.
pub fn classify(date: NaiveDate, paydays: &PaydaySet) -> DayBucket {
    if paydays.contains(date.day()) {
        DayBucket::Payday
    } else {
        DayBucket::Weekday(date.weekday())
    }
}
