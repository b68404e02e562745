mod common;

use std::{fs, path::PathBuf};

use cashcast::{
    config::{Config, ConfigManager},
    errors::CashError,
    forecast::{DuplicateDates, Language, PaydaySet},
};
use common::test_dir;

#[test]
fn default_config_matches_documented_policy() {
    let cfg = Config::default();

    assert_eq!(cfg.currency, "USD");
    assert_eq!(cfg.store_path, PathBuf::from("transaction_history.csv"));
    assert_eq!(cfg.policy.payday_days, PaydaySet::new([1, 3, 15, 30, 31]));
    assert_eq!(cfg.policy.safety_margin, 1.10);
    assert_eq!(cfg.policy.fallback_default, 5000.0);
}

#[test]
fn missing_file_loads_defaults() {
    let manager = ConfigManager::new(test_dir().join("cashcast.json"));
    assert_eq!(manager.load().expect("load"), Config::default());
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = test_dir();
    let manager = ConfigManager::new(dir.join("cashcast.json"));

    let mut cfg = Config::default();
    cfg.currency = "KRW".to_string();
    cfg.language = Language::Ko;
    cfg.policy.payday_days = PaydaySet::new([10, 25]);
    cfg.policy.duplicate_dates = DuplicateDates::SumPerDay;

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded, cfg);
    assert!(!dir.join("cashcast.json.tmp").exists());
}

#[test]
fn partial_file_keeps_remaining_defaults() {
    let path = test_dir().join("cashcast.json");
    fs::write(
        &path,
        r#"{ "store_path": "ledger/cash.csv", "policy": { "safety_margin": 1.25 } }"#,
    )
    .expect("write config");

    let cfg = ConfigManager::new(&path).load().expect("load");
    assert_eq!(cfg.store_path, PathBuf::from("ledger/cash.csv"));
    assert_eq!(cfg.policy.safety_margin, 1.25);
    assert_eq!(cfg.policy.fallback_default, 5000.0);
    assert_eq!(cfg.language, Language::En);
}

#[test]
fn invalid_policy_is_a_config_error() {
    let path = test_dir().join("cashcast.json");
    fs::write(&path, r#"{ "policy": { "payday_days": [0, 40] } }"#).expect("write config");

    assert!(matches!(
        ConfigManager::new(&path).load(),
        Err(CashError::ConfigError(_))
    ));
}

#[test]
fn malformed_json_is_a_config_error() {
    let path = test_dir().join("cashcast.json");
    fs::write(&path, "{ not json").expect("write config");

    match ConfigManager::new(&path).load() {
        Err(CashError::ConfigError(message)) => assert!(message.contains("cashcast.json")),
        other => panic!("expected ConfigError, got {:?}", other),
    }
}
