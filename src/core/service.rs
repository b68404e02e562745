use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use super::clock::Clock;
use crate::{
    errors::Result,
    forecast::{BucketAverages, ForecastEngine, ForecastRow},
    ledger::Observation,
    storage::ObservationStore,
};

/// Forecast computed from a fresh read of the store.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastReport {
    pub reference: NaiveDate,
    pub observation_count: usize,
    pub rows: Vec<ForecastRow>,
}

impl ForecastReport {
    pub fn fallback_count(&self) -> usize {
        self.rows.iter().filter(|row| row.is_fallback()).count()
    }
}

/// Facade tying a store, the forecast engine and a clock together.
///
/// Writing and forecasting are separate calls: callers `record` first and
/// then ask for a new `forecast`, which always re-reads the store.
pub struct CashService {
    store: Box<dyn ObservationStore>,
    engine: ForecastEngine,
    clock: Box<dyn Clock>,
}

impl CashService {
    pub fn new(
        store: Box<dyn ObservationStore>,
        engine: ForecastEngine,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            store,
            engine,
            clock,
        }
    }

    pub fn engine(&self) -> &ForecastEngine {
        &self.engine
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Appends one observation. Nothing is recomputed here.
    pub fn record(&self, date: NaiveDate, amount: f64) -> Result<Observation> {
        let observation = Observation::new(date, amount)?;
        self.store.append(&observation)?;
        Ok(observation)
    }

    pub fn history(&self) -> Result<Vec<Observation>> {
        self.store.read_all()
    }

    pub fn averages(&self) -> Result<BucketAverages> {
        let history = self.store.read_all()?;
        Ok(self.engine.aggregate(&history))
    }

    /// Forecast for the days after today.
    pub fn forecast(&self) -> Result<ForecastReport> {
        self.forecast_from(self.clock.today())
    }

    pub fn forecast_from(&self, reference: NaiveDate) -> Result<ForecastReport> {
        let history = self.store.read_all()?;
        let rows = self.engine.forecast(&history, reference);
        let report = ForecastReport {
            reference,
            observation_count: history.len(),
            rows,
        };
        info!(
            %reference,
            observations = report.observation_count,
            fallbacks = report.fallback_count(),
            "computed forecast"
        );
        Ok(report)
    }
}
