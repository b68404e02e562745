use serde::{Deserialize, Serialize};

use super::bucket::{classify, DayBucket, PaydaySet};
use crate::errors::{CashError, Result};
use chrono::NaiveDate;

pub const DEFAULT_SAFETY_MARGIN: f64 = 1.10;
pub const DEFAULT_FALLBACK: f64 = 5000.0;
pub const DEFAULT_HORIZON_DAYS: usize = 7;

/// How several observations logged for the same date are sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateDates {
    /// Every row is its own sample.
    #[default]
    Independent,
    /// Rows sharing a date are summed into one daily sample first.
    SumPerDay,
}

/// Tunable constants of the forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastPolicy {
    pub payday_days: PaydaySet,
    pub safety_margin: f64,
    pub fallback_default: f64,
    pub horizon_days: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payday_label: Option<String>,
    pub duplicate_dates: DuplicateDates,
}

impl Default for ForecastPolicy {
    fn default() -> Self {
        Self {
            payday_days: PaydaySet::default(),
            safety_margin: DEFAULT_SAFETY_MARGIN,
            fallback_default: DEFAULT_FALLBACK,
            horizon_days: DEFAULT_HORIZON_DAYS,
            payday_label: None,
            duplicate_dates: DuplicateDates::default(),
        }
    }
}

impl ForecastPolicy {
    pub fn classify(&self, date: NaiveDate) -> DayBucket {
        classify(date, &self.payday_days)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(day) = self.payday_days.days().find(|day| !(1..=31).contains(day)) {
            return Err(CashError::ConfigError(format!(
                "payday day {} is outside 1..=31",
                day
            )));
        }
        if !self.safety_margin.is_finite() || self.safety_margin < 0.0 {
            return Err(CashError::ConfigError(format!(
                "safety margin must be a non-negative number (got {})",
                self.safety_margin
            )));
        }
        if !self.fallback_default.is_finite() || self.fallback_default < 0.0 {
            return Err(CashError::ConfigError(format!(
                "fallback default must be a non-negative number (got {})",
                self.fallback_default
            )));
        }
        if self.horizon_days == 0 {
            return Err(CashError::ConfigError(
                "forecast horizon must cover at least one day".into(),
            ));
        }
        Ok(())
    }
}
