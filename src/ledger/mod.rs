//! Ledger domain models for the cash log.

pub mod observation;

pub use observation::{Observation, AMOUNT_COLUMN, DATE_COLUMN};
