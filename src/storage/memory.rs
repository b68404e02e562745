use std::sync::Mutex;

use super::ObservationStore;
use crate::{
    errors::{CashError, Result},
    ledger::Observation,
};

/// Volatile store for tests and ad-hoc forecasts over in-memory data.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<Observation>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_observations(observations: Vec<Observation>) -> Self {
        Self {
            rows: Mutex::new(observations),
        }
    }
}

impl ObservationStore for MemoryStore {
    fn read_all(&self) -> Result<Vec<Observation>> {
        self.rows
            .lock()
            .map(|rows| rows.clone())
            .map_err(|_| CashError::StorageError("memory store lock poisoned".into()))
    }

    fn append(&self, observation: &Observation) -> Result<()> {
        observation.validate()?;
        let mut rows = self
            .rows
            .lock()
            .map_err(|_| CashError::WriteFailure("memory store lock poisoned".into()))?;
        rows.push(*observation);
        Ok(())
    }
}
