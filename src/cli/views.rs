//! Tables shown by the CLI commands.

use chrono::{Datelike, NaiveDate, Weekday};

use super::table::{Table, TableColumn};
use crate::{
    core::ForecastReport,
    currency::{format_cash, format_money, LocaleConfig},
    forecast::{BucketAverages, DayBucket, ForecastEngine},
    ledger::Observation,
};

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Currency settings shared by every view.
#[derive(Debug, Clone)]
pub struct Money {
    pub currency: String,
    pub locale: LocaleConfig,
}

impl Money {
    pub fn new(currency: &str, locale_tag: &str) -> Self {
        Self {
            currency: currency.to_string(),
            locale: LocaleConfig::from_tag(locale_tag),
        }
    }

    /// Whole-unit amount, as used for predictions.
    pub fn format(&self, amount: f64) -> String {
        format_cash(amount, &self.currency, &self.locale)
    }

    /// Recorded amount, keeping cents when there are any.
    pub fn format_recorded(&self, amount: f64) -> String {
        let precision = if amount.fract() == 0.0 { 0 } else { 2 };
        format_money(amount, &self.currency, &self.locale, precision)
    }
}

/// Date / Type / Cash to prepare. Rows without history are starred.
pub fn forecast_table(report: &ForecastReport, money: &Money) -> Table {
    let mut table = Table::new(vec![
        TableColumn::left("Date"),
        TableColumn::left("Type"),
        TableColumn::right("Cash to prepare"),
    ]);
    for row in &report.rows {
        let marker = if row.is_fallback() { "*" } else { "" };
        table.push_row(vec![
            row.date.format("%Y-%m-%d").to_string(),
            row.label.clone(),
            format!("{}{}", marker, money.format(row.rounded_cash())),
        ]);
    }
    table
}

pub fn history_table(observations: &[Observation], engine: &ForecastEngine, money: &Money) -> Table {
    let mut table = Table::new(vec![
        TableColumn::left("Date"),
        TableColumn::left("Type"),
        TableColumn::right("Cash dispensed"),
    ]);
    for obs in observations {
        table.push_row(vec![
            obs.date.format("%Y-%m-%d").to_string(),
            engine.label_for(engine.classify(obs.date)),
            money.format_recorded(obs.amount),
        ]);
    }
    table
}

/// One line per bucket in calendar order, payday last.
pub fn averages_table(averages: &BucketAverages, engine: &ForecastEngine, money: &Money) -> Table {
    let mut table = Table::new(vec![
        TableColumn::left("Bucket"),
        TableColumn::right("Samples"),
        TableColumn::right("Average"),
    ]);
    let buckets = WEEK
        .iter()
        .map(|weekday| DayBucket::Weekday(*weekday))
        .chain(std::iter::once(DayBucket::Payday));
    for bucket in buckets {
        let (samples, average) = match averages.stat_for(bucket) {
            Some(stat) => (stat.samples.to_string(), money.format(stat.mean)),
            None => ("0".to_string(), "-".to_string()),
        };
        table.push_row(vec![engine.label_for(bucket), samples, average]);
    }
    table
}

/// Weekday of a date in the engine's language, for messages.
pub fn weekday_label(engine: &ForecastEngine, date: NaiveDate) -> String {
    engine.label_for(DayBucket::Weekday(date.weekday()))
}
