//! CLI subcommand implementations.

pub mod calview;
pub mod csv;
pub mod edit;
pub mod log;
pub mod note;
pub mod report;
pub mod start;
pub mod status;
pub mod stop;
pub mod tag;

use anyhow::Result;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use ti_core::time::{parse_current_day, parse_user_time, utc_to_local};
use ti_core::{TiError, WorkLog};
use ti_store::DataStore;

use crate::color::Colorizer;

/// Everything a command needs to know about the moment it runs in.
#[derive(Debug, Clone)]
pub struct Invocation<Tz: TimeZone> {
    /// Wall clock at startup; every "now" in one command is this instant.
    pub now: DateTime<Utc>,
    /// Zone user-facing times are read and shown in.
    pub tz: Tz,
    /// `YYYY-MM-DD` override for today.
    pub current_day: Option<String>,
    pub colors: Colorizer,
}

impl<Tz: TimeZone> Invocation<Tz> {
    /// Interprets the time words of `start`/`stop`, joined with spaces.
    pub fn parse_time(&self, words: &[String]) -> Result<DateTime<Utc>, TiError> {
        parse_user_time(
            &words.join(" "),
            self.current_day.as_deref(),
            self.now,
            &self.tz,
        )
    }

    /// Today's date: the override when set, else the local date.
    pub fn today(&self) -> Result<NaiveDate, TiError> {
        match self.current_day.as_deref() {
            Some(raw) => parse_current_day(raw),
            None => Ok(utc_to_local(&self.now, &self.tz).date_naive()),
        }
    }
}

/// Loads the log, applies `op` and saves the result.
///
/// Nothing is written when `op` fails, so a rejected command leaves the sheet
/// as it was.
pub fn with_log_mut<T>(
    store: &dyn DataStore,
    op: impl FnOnce(&mut WorkLog) -> Result<T, TiError>,
) -> Result<T> {
    let mut log = store.load()?;
    let out = op(&mut log)?;
    store.dump(&log)?;
    Ok(out)
}
