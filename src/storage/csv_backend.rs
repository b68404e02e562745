use std::{
    fs::{self, File, OpenOptions},
    io::{self, ErrorKind, Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};

use csv::{ReaderBuilder, Trim, WriterBuilder};
use tracing::{debug, info};

use super::ObservationStore;
use crate::{
    errors::{CashError, Result},
    ledger::{Observation, AMOUNT_COLUMN, DATE_COLUMN},
};

pub const DEFAULT_STORE_FILE: &str = "transaction_history.csv";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Flat-file store: a `Date,Cash_Dispensed` CSV table, one row per observation.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the backing file with only its header row.
    ///
    /// Returns `false` and leaves the file untouched when it already exists.
    pub fn initialize(&self) -> Result<bool> {
        if self.path.exists() {
            debug!(path = %self.path.display(), "store already present");
            return Ok(false);
        }
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)?;
        file.write_all(header_line().as_bytes())?;
        file.sync_all()?;
        info!(path = %self.path.display(), "created ledger store");
        Ok(true)
    }

    fn missing(&self) -> CashError {
        CashError::StoreNotFound(self.path.clone())
    }

    /// Bytes that must precede a new row so it starts on a fresh line.
    fn row_prefix(&self) -> io::Result<String> {
        let mut file = File::open(&self.path)?;
        let len = file.metadata()?.len();
        if len == 0 {
            return Ok(header_line());
        }
        file.seek(SeekFrom::Start(len - 1))?;
        let mut last = [0u8; 1];
        file.read_exact(&mut last)?;
        Ok(if last[0] == b'\n' {
            String::new()
        } else {
            "\n".to_string()
        })
    }
}

impl ObservationStore for CsvStore {
    fn read_all(&self) -> Result<Vec<Observation>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Err(self.missing()),
            Err(err) => return Err(err.into()),
        };
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(file);

        let mut observations = Vec::new();
        for (index, record) in reader.deserialize::<Observation>().enumerate() {
            // Header is line 1.
            let line = index + 2;
            let observation = record.map_err(|err| {
                CashError::StorageError(format!(
                    "{} line {}: {}",
                    self.path.display(),
                    line,
                    err
                ))
            })?;
            observations.push(observation);
        }
        debug!(
            path = %self.path.display(),
            rows = observations.len(),
            "loaded observations"
        );
        Ok(observations)
    }

    fn append(&self, observation: &Observation) -> Result<()> {
        observation.validate()?;
        if !self.path.exists() {
            return Err(self.missing());
        }

        let row = encode_row(observation)?;
        let mut buffer = self.row_prefix().map_err(write_failure)?;
        buffer.push_str(&row);

        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(write_failure)?;
        file.write_all(buffer.as_bytes()).map_err(write_failure)?;
        file.sync_data().map_err(write_failure)?;

        info!(
            date = %observation.date,
            amount = observation.amount,
            "appended observation"
        );
        Ok(())
    }
}

fn header_line() -> String {
    format!("{},{}\n", DATE_COLUMN, AMOUNT_COLUMN)
}

fn encode_row(observation: &Observation) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer
        .write_record([
            observation.date.format(DATE_FORMAT).to_string(),
            observation.amount.to_string(),
        ])
        .map_err(|err| CashError::WriteFailure(err.to_string()))?;
    let bytes = writer
        .into_inner()
        .map_err(|err| CashError::WriteFailure(err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| CashError::WriteFailure(err.to_string()))
}

fn write_failure(err: io::Error) -> CashError {
    CashError::WriteFailure(err.to_string())
}
