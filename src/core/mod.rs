pub mod clock;
pub mod service;

pub use clock::{Clock, FixedClock, SystemClock};
pub use service::{CashService, ForecastReport};
