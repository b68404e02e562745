pub mod csv_backend;
pub mod memory;

use crate::{errors::Result, ledger::Observation};

/// Abstraction over append-only backends holding the cash log.
pub trait ObservationStore: Send + Sync {
    /// Returns every observation in insertion order.
    ///
    /// Fails with [`CashError::StoreNotFound`](crate::errors::CashError::StoreNotFound)
    /// when the backing store has never been created.
    fn read_all(&self) -> Result<Vec<Observation>>;

    /// Durably appends one observation after all existing ones.
    fn append(&self, observation: &Observation) -> Result<()>;
}

pub use csv_backend::CsvStore;
pub use memory::MemoryStore;
