mod common;

use cashcast::{
    core::{CashService, FixedClock},
    errors::CashError,
    forecast::{Basis, DayBucket, DuplicateDates, ForecastEngine, ForecastPolicy, Language},
    storage::{CsvStore, MemoryStore},
};
use chrono::{Datelike, Weekday};
use common::{date, obs, seeded_store, store_path};

fn service(store: CsvStore, today: chrono::NaiveDate) -> CashService {
    CashService::new(
        Box::new(store),
        ForecastEngine::default(),
        Box::new(FixedClock(today)),
    )
}

#[test]
fn wednesday_without_history_falls_back_to_5500() {
    // Only Monday and Friday history, no paydays.
    let store = seeded_store(&[obs(2025, 1, 6, 800.0), obs(2025, 1, 10, 900.0)]);
    // 2025-01-07 is a Tuesday, so the first forecast day is Wednesday the 8th.
    let report = service(store, date(2025, 1, 7)).forecast().expect("forecast");

    let wednesday = &report.rows[0];
    assert_eq!(wednesday.date.weekday(), Weekday::Wed);
    assert_eq!(wednesday.bucket, DayBucket::Weekday(Weekday::Wed));
    assert_eq!(wednesday.basis, Basis::Fallback);
    assert_eq!(wednesday.rounded_cash(), 5500.0);
}

#[test]
fn payday_average_drives_payday_rows() {
    let store = seeded_store(&[obs(2025, 1, 1, 1000.0), obs(2025, 1, 15, 2000.0)]);
    let engine = ForecastEngine::default();
    let history = cashcast::storage::ObservationStore::read_all(&store).expect("read");

    let averages = engine.aggregate(&history);
    assert_eq!(averages.payday_average(), Some(1500.0));
    assert!(averages.weekday.is_empty());

    // Window 2025-01-29 ..= 2025-02-04 holds paydays on the 30th, 31st, 1st and 3rd.
    let rows = engine.forecast(&history, date(2025, 1, 28));
    let paydays: Vec<_> = rows.iter().filter(|row| row.bucket.is_payday()).collect();
    assert_eq!(paydays.len(), 4);
    for row in paydays {
        assert_eq!(row.rounded_cash(), 1650.0);
        assert_eq!(row.basis, Basis::History { samples: 2 });
        assert_eq!(row.label, Language::En.payday_label());
    }
}

#[test]
fn missing_payday_history_falls_back_instead_of_failing() {
    let engine = ForecastEngine::default();
    let rows = engine.forecast(&[obs(2025, 1, 7, 400.0)], date(2025, 1, 14));

    assert_eq!(rows[0].date, date(2025, 1, 15));
    assert!(rows[0].bucket.is_payday());
    assert_eq!(rows[0].basis, Basis::Fallback);
    assert_eq!(rows[0].rounded_cash(), 5500.0);
}

#[test]
fn forecast_window_is_seven_ascending_days_for_any_history() {
    let histories = vec![
        Vec::new(),
        vec![obs(2025, 1, 6, 100.0)],
        date(2024, 1, 1)
            .iter_days()
            .take(400)
            .map(|d| obs(d.year(), d.month(), d.day(), d.ordinal() as f64))
            .collect(),
    ];
    let engine = ForecastEngine::default();
    // Includes a month end and a leap day.
    for reference in [date(2024, 2, 27), date(2024, 12, 29), date(2025, 6, 30)] {
        for history in &histories {
            let rows = engine.forecast(history, reference);
            assert_eq!(rows.len(), 7);
            for (offset, row) in rows.iter().enumerate() {
                assert_eq!((row.date - reference).num_days(), offset as i64 + 1);
            }
        }
    }
}

#[test]
fn bucket_partition_is_total_and_disjoint() {
    let engine = ForecastEngine::default();
    for day in date(2024, 1, 1).iter_days().take(731) {
        let bucket = engine.classify(day);
        let payday = [1, 3, 15, 30, 31].contains(&day.day());
        assert_eq!(bucket == DayBucket::Payday, payday);
        assert_eq!(bucket == DayBucket::Weekday(day.weekday()), !payday);
    }
}

#[test]
fn duplicate_policy_is_injectable() {
    let history = [
        obs(2025, 1, 6, 100.0),
        obs(2025, 1, 6, 200.0),
        obs(2025, 1, 13, 600.0),
    ];
    let summed = ForecastEngine::new(
        ForecastPolicy {
            duplicate_dates: DuplicateDates::SumPerDay,
            ..ForecastPolicy::default()
        },
        Language::En,
    );

    // Independent: (100 + 200 + 600) / 3; per day: (300 + 600) / 2.
    assert_eq!(
        ForecastEngine::default()
            .aggregate(&history)
            .weekday_average(Weekday::Mon),
        Some(300.0)
    );
    assert_eq!(
        summed.aggregate(&history).weekday_average(Weekday::Mon),
        Some(450.0)
    );
}

#[test]
fn service_separates_recording_from_forecasting() {
    let service = CashService::new(
        Box::new(MemoryStore::new()),
        ForecastEngine::default(),
        Box::new(FixedClock(date(2025, 1, 7))),
    );

    let saved = service.record(date(2025, 1, 8), 2000.0).expect("record");
    assert_eq!(saved, obs(2025, 1, 8, 2000.0));

    let report = service.forecast().expect("forecast");
    assert_eq!(report.rows[0].rounded_cash(), 2200.0);
    assert_eq!(report.fallback_count(), 6);
}

#[test]
fn forecast_without_store_is_fatal() {
    let service = service(CsvStore::new(store_path()), date(2025, 1, 7));
    assert!(matches!(
        service.forecast(),
        Err(CashError::StoreNotFound(_))
    ));
}
