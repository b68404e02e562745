use std::path::PathBuf;

use chrono::NaiveDate;
use tracing::debug;

use super::{
    chart, output,
    views::{self, Money},
};
use crate::{
    config::{ConfigManager, DEFAULT_CONFIG_FILE},
    core::{CashService, ForecastReport, SystemClock},
    currency::{self, LocaleConfig},
    errors::{CashError, CliError},
    forecast::ForecastEngine,
    storage::CsvStore,
};

pub const USAGE: &str = "\
Usage: cashcast [--config FILE] [--store FILE] [--plain] [--quiet] <command>

Commands:
  init                       create the ledger store with its header row
  log <DATE|today> <AMOUNT>  record the cash dispensed on DATE (YYYY-MM-DD)
  forecast [--from DATE] [--json]
                             cash to prepare for the 7 days after DATE (default today)
  history                    list recorded amounts
  averages                   show historical averages per weekday and payday
  chart [FILE]               write an SVG chart of the history
  config                     print the effective configuration
  help                       show this message";

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq)]
pub enum DateArg {
    Today,
    On(NaiveDate),
}

impl DateArg {
    fn parse(raw: &str) -> Result<Self, CliError> {
        if raw.eq_ignore_ascii_case("today") {
            return Ok(DateArg::Today);
        }
        NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map(DateArg::On)
            .map_err(|_| {
                CliError::Usage(format!("invalid date `{}` (expected YYYY-MM-DD)", raw))
            })
    }

    fn resolve(&self, today: NaiveDate) -> NaiveDate {
        match self {
            DateArg::Today => today,
            DateArg::On(date) => *date,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Init,
    /// The amount is kept as typed; it is parsed with the configured locale.
    Log { date: DateArg, amount: String },
    Forecast { from: Option<DateArg>, json: bool },
    History,
    Averages,
    Chart { output: Option<PathBuf> },
    Config,
    Help,
}

/// Parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub config_path: Option<PathBuf>,
    pub store_path: Option<PathBuf>,
    pub plain: bool,
    pub quiet: bool,
    pub command: Command,
}

/// Parses arguments (without the program name).
pub fn parse_args<I>(args: I) -> Result<Invocation, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut config_path = None;
    let mut store_path = None;
    let mut plain = false;
    let mut quiet = false;
    let mut json = false;
    let mut positional = Vec::new();
    let mut from = None;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => config_path = Some(PathBuf::from(required(&mut args, "--config")?)),
            "--store" => store_path = Some(PathBuf::from(required(&mut args, "--store")?)),
            "--from" => from = Some(DateArg::parse(&required(&mut args, "--from")?)?),
            "--plain" => plain = true,
            "--quiet" => quiet = true,
            "--json" => json = true,
            "-h" | "--help" => positional.insert(0, "help".to_string()),
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let name = positional.next().unwrap_or_else(|| "help".to_string());
    let rest: Vec<String> = positional.collect();

    if (from.is_some() || json) && name != "forecast" {
        return Err(CliError::Usage(
            "--from and --json only apply to `forecast`".into(),
        ));
    }

    let command = match (name.as_str(), rest.as_slice()) {
        ("init", []) => Command::Init,
        ("log", [date, amount]) => Command::Log {
            date: DateArg::parse(date)?,
            amount: amount.clone(),
        },
        ("log", _) => {
            return Err(CliError::Usage(
                "usage: cashcast log <DATE|today> <AMOUNT>".into(),
            ))
        }
        ("forecast", []) => Command::Forecast { from, json },
        ("history", []) => Command::History,
        ("averages", []) => Command::Averages,
        ("chart", []) => Command::Chart { output: None },
        ("chart", [file]) => Command::Chart {
            output: Some(PathBuf::from(file)),
        },
        ("config", []) => Command::Config,
        ("help", _) => Command::Help,
        (other, []) => return Err(CliError::Usage(format!("unknown command `{}`", other))),
        (other, extra) => {
            return Err(CliError::Usage(format!(
                "unexpected arguments for `{}`: {}",
                other,
                extra.join(" ")
            )))
        }
    };

    Ok(Invocation {
        config_path,
        store_path,
        plain,
        quiet,
        command,
    })
}

fn required(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, CliError> {
    args.next()
        .ok_or_else(|| CliError::Usage(format!("{} expects a value", flag)))
}

fn parse_amount(raw: &str, locale: &LocaleConfig) -> Result<f64, CliError> {
    let amount = currency::parse_amount(raw, locale).ok_or_else(|| {
        CliError::Usage(format!(
            "invalid amount `{}` (decimal separator `{}`, grouping separator `{}`)",
            raw, locale.decimal_separator, locale.grouping_separator
        ))
    })?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(CliError::Usage(format!(
            "amount must be a non-negative number (got `{}`)",
            raw
        )));
    }
    Ok(amount)
}

/// Loads configuration, wires the service and executes one command.
pub fn run(invocation: Invocation) -> Result<(), CliError> {
    let manager = ConfigManager::new(
        invocation
            .config_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE)),
    );
    let mut config = manager.load()?;
    if let Some(store_path) = invocation.store_path.clone() {
        config.store_path = store_path;
    }
    output::set_preferences(output::OutputPreferences {
        plain_mode: invocation.plain || config.plain_output,
        quiet_mode: invocation.quiet,
    });
    debug!(store = %config.store_path.display(), "resolved store path");

    let store = CsvStore::new(config.store_path.clone());
    let engine = ForecastEngine::new(config.policy.clone(), config.language);
    let money = Money::new(&config.currency, &config.locale);
    let service = CashService::new(Box::new(store.clone()), engine, Box::new(SystemClock));

    match invocation.command {
        Command::Init => {
            if store.initialize()? {
                output::success(format!("Created ledger store {}", store.path().display()));
            } else {
                output::info(format!(
                    "Ledger store {} already exists; left untouched",
                    store.path().display()
                ));
            }
        }
        Command::Log { date, amount } => {
            let amount = parse_amount(&amount, &money.locale)?;
            let date = date.resolve(service.today());
            let observation = service.record(date, amount)?;
            output::success(format!(
                "Saved {} for {} ({})",
                money.format_recorded(observation.amount),
                observation.date,
                views::weekday_label(service.engine(), observation.date)
            ));
            let report = service.forecast()?;
            print_forecast(&report, &money);
        }
        Command::Forecast { from, json } => {
            let report = match from {
                Some(date) => service.forecast_from(date.resolve(service.today()))?,
                None => service.forecast()?,
            };
            if json {
                let rendered =
                    serde_json::to_string_pretty(&report).map_err(CashError::from)?;
                println!("{}", rendered);
            } else {
                print_forecast(&report, &money);
            }
        }
        Command::History => {
            let history = service.history()?;
            output::section("Cash history");
            if history.is_empty() {
                output::info("No amounts recorded yet");
            } else {
                println!(
                    "{}",
                    views::history_table(&history, service.engine(), &money).render()
                );
                output::info(format!("{} observation(s)", history.len()));
            }
        }
        Command::Averages => {
            let averages = service.averages()?;
            output::section("Historical averages");
            println!(
                "{}",
                views::averages_table(&averages, service.engine(), &money).render()
            );
        }
        Command::Chart { output: target } => {
            let history = service.history()?;
            let path = target.unwrap_or_else(|| config.chart_path.clone());
            if chart::write_history_chart(&history, &path)? {
                output::success(format!(
                    "Wrote chart of {} observation(s) to {}",
                    history.len(),
                    path.display()
                ));
            } else {
                output::warning("No amounts recorded yet; nothing to chart");
            }
        }
        Command::Config => {
            let json = serde_json::to_string_pretty(&config).map_err(CashError::from)?;
            println!("{}", json);
        }
        Command::Help => println!("{}", USAGE),
    }
    Ok(())
}

fn print_forecast(report: &ForecastReport, money: &Money) {
    output::section(format!("Cash forecast after {}", report.reference));
    println!("{}", views::forecast_table(report, money).render());
    if report.fallback_count() > 0 {
        output::info("* no history for this day type yet; default amount used");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_log_with_global_flags() {
        let invocation =
            parse_args(args(&["--store", "data/cash.csv", "log", "2025-01-15", "1,500"])).unwrap();
        assert_eq!(invocation.store_path, Some(PathBuf::from("data/cash.csv")));
        assert_eq!(
            invocation.command,
            Command::Log {
                date: DateArg::On(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()),
                amount: "1,500".to_string(),
            }
        );
    }

    #[test]
    fn defaults_to_help() {
        assert_eq!(parse_args(Vec::new()).unwrap().command, Command::Help);
        assert_eq!(parse_args(args(&["--help"])).unwrap().command, Command::Help);
    }

    #[test]
    fn forecast_accepts_reference_date() {
        let invocation = parse_args(args(&["forecast", "--from", "today"])).unwrap();
        assert_eq!(
            invocation.command,
            Command::Forecast {
                from: Some(DateArg::Today),
                json: false,
            }
        );

        let invocation = parse_args(args(&["--quiet", "forecast", "--json"])).unwrap();
        assert!(invocation.quiet);
        assert_eq!(
            invocation.command,
            Command::Forecast {
                from: None,
                json: true,
            }
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            parse_args(args(&["log", "15/01/2025", "10"])),
            Err(CliError::Usage(_))
        ));
        assert!(matches!(parse_args(args(&["log", "today"])), Err(CliError::Usage(_))));
        assert!(matches!(parse_args(args(&["frobnicate"])), Err(CliError::Usage(_))));
        assert!(matches!(
            parse_args(args(&["history", "--from", "2025-01-01"])),
            Err(CliError::Usage(_))
        ));
        assert!(matches!(parse_args(args(&["--store"])), Err(CliError::Usage(_))));
        assert!(matches!(
            parse_args(args(&["history", "--json"])),
            Err(CliError::Usage(_))
        ));
    }

    #[test]
    fn amounts_follow_locale_separators() {
        let english = LocaleConfig::default();
        let german = LocaleConfig::from_tag("de-DE");

        assert_eq!(parse_amount("1,500", &english).unwrap(), 1500.0);
        assert_eq!(parse_amount("12,50", &german).unwrap(), 12.5);
        assert_eq!(parse_amount("1.500,25", &german).unwrap(), 1500.25);
        assert!(matches!(parse_amount("12,50", &english), Err(CliError::Usage(_))));
        assert!(matches!(parse_amount("1,5", &english), Err(CliError::Usage(_))));
        assert!(matches!(parse_amount("12.50", &german), Err(CliError::Usage(_))));
        assert!(matches!(parse_amount("-5", &english), Err(CliError::Usage(_))));
    }
}
