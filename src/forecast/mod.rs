//! Weekday and payday based cash forecasting.
//!
//! Historical observations are split into a payday bucket and seven weekday
//! buckets, each bucket is averaged, and the averages are projected over the
//! days following a reference date with a safety margin applied.

pub mod bucket;
pub mod engine;
pub mod labels;
pub mod policy;

pub use bucket::{classify, DayBucket, PaydaySet};
pub use engine::{Basis, BucketAverages, BucketStat, ForecastEngine, ForecastRow};
pub use labels::Language;
pub use policy::{DuplicateDates, ForecastPolicy};
