use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::{
    errors::{CashError, Result},
    forecast::{ForecastPolicy, Language},
    storage::csv_backend::DEFAULT_STORE_FILE,
};

pub const DEFAULT_CONFIG_FILE: &str = "cashcast.json";
pub const DEFAULT_CHART_FILE: &str = "cash_history.svg";
const TMP_SUFFIX: &str = "tmp";

/// User preferences plus the forecast policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    pub language: Language,
    pub store_path: PathBuf,
    pub chart_path: PathBuf,
    pub plain_output: bool,
    pub policy: ForecastPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            language: Language::default(),
            store_path: PathBuf::from(DEFAULT_STORE_FILE),
            chart_path: PathBuf::from(DEFAULT_CHART_FILE),
            plain_output: false,
            policy: ForecastPolicy::default(),
        }
    }
}

/// Loads and saves [`Config`] at a fixed path.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the config file, falling back to defaults when it is absent.
    pub fn load(&self) -> Result<Config> {
        let config = if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            let config: Config = serde_json::from_str(&data).map_err(|err| {
                CashError::ConfigError(format!("{}: {}", self.path.display(), err))
            })?;
            debug!(path = %self.path.display(), "loaded configuration");
            config
        } else {
            debug!(path = %self.path.display(), "no configuration file, using defaults");
            Config::default()
        };
        config.policy.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        config.policy.validate()?;
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}
