use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{CashError, Result};

pub const DATE_COLUMN: &str = "Date";
pub const AMOUNT_COLUMN: &str = "Cash_Dispensed";

/// One logged cash amount for a calendar day.
///
/// Several observations may share a date; each one is kept as its own row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Cash_Dispensed")]
    pub amount: f64,
}

impl Observation {
    /// Builds an observation, rejecting negative and non-finite amounts.
    pub fn new(date: NaiveDate, amount: f64) -> Result<Self> {
        let observation = Self { date, amount };
        observation.validate()?;
        Ok(observation)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_finite() {
            return Err(CashError::InvalidInput(format!(
                "amount for {} must be a finite number",
                self.date
            )));
        }
        if self.amount < 0.0 {
            return Err(CashError::InvalidInput(format!(
                "amount for {} must not be negative (got {})",
                self.date, self.amount
            )));
        }
        Ok(())
    }
}
