use crate::date_provider::{DateProvider, FixedDateProvider, OverrideDateProvider, SystemDateProvider};
use crate::error::{Error, Result};
use chrono::{DateTime, FixedOffset, NaiveDate};
use clap::Parser;
use std::path::PathBuf;

/// Academic planner dashboard statistics from saved API responses
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "planner_stats")]
#[command(
    about = "Computes dashboard statistics from planner API responses",
    long_about = None
)]
#[command(version)]
pub struct Args {
    /// Tasks response (`{ success, data: { tasks } }`)
    #[arg(long, value_name = "FILE")]
    pub tasks: Option<PathBuf>,

    /// Study sessions response (`{ success, data: { sessions } }`)
    #[arg(long, value_name = "FILE")]
    pub sessions: Option<PathBuf>,

    /// Reminders response (`{ success, data: { reminders } }`)
    #[arg(long, value_name = "FILE")]
    pub reminders: Option<PathBuf>,

    /// Week timetable response (`{ success, data: { weekTimetable } }`)
    #[arg(long, value_name = "FILE")]
    pub timetable: Option<PathBuf>,

    /// Reference instant (RFC 3339); its offset is used as local time
    #[arg(long, value_name = "DATETIME", conflicts_with = "override_date")]
    pub now: Option<String>,

    /// Override current date for testing (YYYY-MM-DD format)
    #[arg(long, value_name = "DATE", help = "Override current date (YYYY-MM-DD format)")]
    pub override_date: Option<String>,

    /// Aggregation settings (TOML)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Days ahead for a task to count as due soon
    #[arg(long, value_name = "DAYS")]
    pub window_days: Option<u32>,

    /// Print the snapshot as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Log aggregation details
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Args::parse()
    }

    /// Validate the override_date argument if provided
    pub fn validate_override_date(&self) -> Result<Option<NaiveDate>> {
        match &self.override_date {
            Some(date_str) => NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
                .map(Some)
                .map_err(|_| {
                    Error::InvalidDate(format!(
                        "'{}' for --override-date, expected YYYY-MM-DD",
                        date_str
                    ))
                }),
            None => Ok(None),
        }
    }

    pub fn validate_now(&self) -> Result<Option<DateTime<FixedOffset>>> {
        match &self.now {
            Some(raw) => DateTime::parse_from_rfc3339(raw)
                .map(Some)
                .map_err(|_| Error::InvalidDate(format!("'{}' for --now, expected RFC 3339", raw))),
            None => Ok(None),
        }
    }

    /// Pick where `now` comes from: `--now`, then `--override-date`, then the system clock
    pub fn date_provider(&self) -> Result<Box<dyn DateProvider>> {
        if let Some(instant) = self.validate_now()? {
            return Ok(Box::new(FixedDateProvider::new(instant)));
        }
        if let Some(date) = self.validate_override_date()? {
            return Ok(Box::new(OverrideDateProvider::new(date)));
        }
        Ok(Box::new(SystemDateProvider))
    }
}
