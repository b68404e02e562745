use std::collections::{BTreeMap, HashMap};

use chrono::{NaiveDate, Weekday};
use serde::Serialize;
use tracing::debug;

use super::{
    bucket::DayBucket,
    labels::Language,
    policy::{DuplicateDates, ForecastPolicy},
};
use crate::ledger::Observation;

/// Mean of one bucket together with the number of samples behind it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BucketStat {
    pub mean: f64,
    pub samples: usize,
}

#[derive(Debug, Default, Clone, Copy)]
struct RunningMean {
    sum: f64,
    count: usize,
}

impl RunningMean {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn finish(self) -> Option<BucketStat> {
        (self.count > 0).then(|| BucketStat {
            mean: self.sum / self.count as f64,
            samples: self.count,
        })
    }
}

/// Historical averages per bucket. Buckets without history have no entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BucketAverages {
    pub weekday: HashMap<Weekday, BucketStat>,
    pub payday: Option<BucketStat>,
}

impl BucketAverages {
    pub fn weekday_average(&self, weekday: Weekday) -> Option<f64> {
        self.weekday.get(&weekday).map(|stat| stat.mean)
    }

    pub fn payday_average(&self) -> Option<f64> {
        self.payday.map(|stat| stat.mean)
    }

    pub fn stat_for(&self, bucket: DayBucket) -> Option<BucketStat> {
        match bucket {
            DayBucket::Payday => self.payday,
            DayBucket::Weekday(weekday) => self.weekday.get(&weekday).copied(),
        }
    }
}

/// Where a row's base amount came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Basis {
    History { samples: usize },
    Fallback,
}

/// One projected day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastRow {
    pub date: NaiveDate,
    #[serde(skip)]
    pub bucket: DayBucket,
    pub label: String,
    pub base: f64,
    /// Base with the safety margin applied, unrounded.
    pub predicted_cash: f64,
    pub basis: Basis,
}

impl ForecastRow {
    /// Predicted cash rounded to the nearest whole currency unit.
    pub fn rounded_cash(&self) -> f64 {
        self.predicted_cash.round()
    }

    pub fn is_fallback(&self) -> bool {
        self.basis == Basis::Fallback
    }
}

/// Stateless forecaster: every call works from the full history it is given.
#[derive(Debug, Clone, Default)]
pub struct ForecastEngine {
    policy: ForecastPolicy,
    language: Language,
}

impl ForecastEngine {
    pub fn new(policy: ForecastPolicy, language: Language) -> Self {
        Self { policy, language }
    }

    pub fn classify(&self, date: NaiveDate) -> DayBucket {
        self.policy.classify(date)
    }

    pub fn label_for(&self, bucket: DayBucket) -> String {
        match bucket {
            DayBucket::Payday => self
                .policy
                .payday_label
                .clone()
                .unwrap_or_else(|| self.language.payday_label().to_string()),
            DayBucket::Weekday(weekday) => self.language.weekday_name(weekday).to_string(),
        }
    }

    /// Averages the history per bucket.
    pub fn aggregate(&self, observations: &[Observation]) -> BucketAverages {
        let mut payday = RunningMean::default();
        let mut weekdays: HashMap<Weekday, RunningMean> = HashMap::new();

        for (date, amount) in self.samples(observations) {
            match self.classify(date) {
                DayBucket::Payday => payday.push(amount),
                DayBucket::Weekday(weekday) => weekdays.entry(weekday).or_default().push(amount),
            }
        }

        BucketAverages {
            weekday: weekdays
                .into_iter()
                .filter_map(|(weekday, acc)| acc.finish().map(|stat| (weekday, stat)))
                .collect(),
            payday: payday.finish(),
        }
    }

    /// Projects the days after `reference` (exclusive), one row per day in
    /// ascending order.
    pub fn forecast(&self, observations: &[Observation], reference: NaiveDate) -> Vec<ForecastRow> {
        let averages = self.aggregate(observations);
        self.project(&averages, reference)
    }

    /// Projection step on precomputed averages.
    pub fn project(&self, averages: &BucketAverages, reference: NaiveDate) -> Vec<ForecastRow> {
        reference
            .iter_days()
            .skip(1)
            .take(self.policy.horizon_days)
            .map(|date| self.row_for(averages, date))
            .collect()
    }

    fn row_for(&self, averages: &BucketAverages, date: NaiveDate) -> ForecastRow {
        let bucket = self.classify(date);
        let (base, basis) = match averages.stat_for(bucket) {
            Some(stat) => (
                stat.mean,
                Basis::History {
                    samples: stat.samples,
                },
            ),
            None => {
                debug!(%date, ?bucket, "no history for bucket, using fallback default");
                (self.policy.fallback_default, Basis::Fallback)
            }
        };
        ForecastRow {
            date,
            bucket,
            label: self.label_for(bucket),
            base,
            predicted_cash: base * self.policy.safety_margin,
            basis,
        }
    }

    fn samples(&self, observations: &[Observation]) -> Vec<(NaiveDate, f64)> {
        match self.policy.duplicate_dates {
            DuplicateDates::Independent => observations
                .iter()
                .map(|obs| (obs.date, obs.amount))
                .collect(),
            DuplicateDates::SumPerDay => {
                let mut daily: BTreeMap<NaiveDate, f64> = BTreeMap::new();
                for obs in observations {
                    *daily.entry(obs.date).or_insert(0.0) += obs.amount;
                }
                daily.into_iter().collect()
            }
        }
    }
}
