#![doc(test(attr(deny(warnings))))]

//! cashcast keeps an append-only log of daily cash amounts and projects the
//! cash needed for the coming week from weekday and payday averages.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod errors;
pub mod forecast;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing once per process.
pub fn init() {
    INIT_TRACING.call_once(utils::init_tracing);
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
