//! Read-only derivations over the work log.
//!
//! None of these functions mutate the log. Anything that depends on the wall
//! clock or the local zone takes it as a parameter.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;

use crate::entry::{WorkEntry, WorkLog};
use crate::error::TiError;
use crate::gap::format_gap;
use crate::time::{format_timestamp, utc_to_local};

// ========== Log ==========

/// Which entries `log` shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogPeriod {
    All,
    Today,
}

impl LogPeriod {
    /// `today` selects the current day; anything else, or nothing, shows all.
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            Some("today") => Self::Today,
            _ => Self::All,
        }
    }
}

/// One rendered line of the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub name: String,
    pub start: NaiveDateTime,
    /// `None` while the entry is active.
    pub end: Option<NaiveDateTime>,
    pub gap: String,
    pub tags: Vec<String>,
}

fn local_date<Tz: TimeZone>(timestamp: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    utc_to_local(timestamp, tz).date_naive()
}

/// Entries of the log, optionally limited to those started `today` (local).
pub fn log_view<Tz: TimeZone>(
    log: &WorkLog,
    period: LogPeriod,
    today: NaiveDate,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Vec<LogLine> {
    log.entries()
        .iter()
        .filter(|entry| match period {
            LogPeriod::All => true,
            LogPeriod::Today => local_date(&entry.start_time, tz) == today,
        })
        .map(|entry| LogLine {
            name: entry.name.clone(),
            start: utc_to_local(&entry.start_time, tz).naive_local(),
            end: entry
                .end_time
                .map(|end| utc_to_local(&end, tz).naive_local()),
            gap: format_gap(entry.start_time, entry.end_or(now)),
            tags: entry.tags.iter().cloned().collect(),
        })
        .collect()
}

// ========== Status ==========

/// What `status` reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Idle,
    Working {
        name: String,
        tags: Vec<String>,
        since: DateTime<Utc>,
        gap: String,
    },
}

/// Current activity, if any, and how long it has been running.
pub fn status(log: &WorkLog, now: DateTime<Utc>) -> Status {
    log.active().map_or(Status::Idle, |entry| Status::Working {
        name: entry.name.clone(),
        tags: entry.tags.iter().cloned().collect(),
        since: entry.start_time,
        gap: format_gap(entry.start_time, now),
    })
}

// ========== Activity report ==========

/// Totals for one activity over all finished entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityReport {
    pub activity: String,
    pub entries: usize,
    pub total: Duration,
    /// Per local start day.
    pub days: BTreeMap<NaiveDate, Duration>,
}

/// Sums finished entries whose name is exactly `activity`.
pub fn activity_report<Tz: TimeZone>(log: &WorkLog, activity: &str, tz: &Tz) -> ActivityReport {
    let mut report = ActivityReport {
        activity: activity.to_string(),
        entries: 0,
        total: Duration::zero(),
        days: BTreeMap::new(),
    };

    for (entry, end) in finished(log).filter(|(entry, _)| entry.name == activity) {
        let spent = end - entry.start_time;
        report.entries += 1;
        report.total += spent;
        *report
            .days
            .entry(local_date(&entry.start_time, tz))
            .or_insert_with(Duration::zero) += spent;
    }

    report
}

fn finished(log: &WorkLog) -> impl Iterator<Item = (&WorkEntry, DateTime<Utc>)> {
    log.entries()
        .iter()
        .filter_map(|entry| entry.end_time.map(|end| (entry, end)))
}

// ========== Calendar ==========

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
}

impl CalendarMonth {
    /// Parses `calview`'s argument: a month number (`1`..`12`, in the year
    /// of `today`) or `YYYY-MM`.
    pub fn parse(arg: &str, today: NaiveDate) -> Result<Self, TiError> {
        let invalid = || {
            TiError::bad_arguments(format!(
                "Can't understand the month {arg:?}. Use a month number (1-12) or YYYY-MM"
            ))
        };

        let arg = arg.trim();
        let (year, month) = match arg.split_once('-') {
            Some((year, month)) => (
                year.parse::<i32>().map_err(|_| invalid())?,
                month.parse::<u32>().map_err(|_| invalid())?,
            ),
            None => (today.year(), arg.parse::<u32>().map_err(|_| invalid())?),
        };

        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(invalid());
        }
        Ok(Self { year, month })
    }

    /// First day of the month.
    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Number of days in the month.
    pub fn days_in_month(self) -> u32 {
        let first = self.first_day();
        let next = first
            .checked_add_months(chrono::Months::new(1))
            .unwrap_or(NaiveDate::MAX);
        u32::try_from((next - first).num_days()).unwrap_or(31)
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

/// Worked time per day of one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthTotals {
    pub month: CalendarMonth,
    /// Only days with finished work appear.
    pub days: BTreeMap<NaiveDate, Duration>,
}

impl MonthTotals {
    /// Calendar rows, Monday first, padded with `None` outside the month.
    pub fn weeks(&self) -> Vec<[Option<NaiveDate>; 7]> {
        let first = self.month.first_day();
        let lead = first.weekday().num_days_from_monday() as usize;

        let mut cells: Vec<Option<NaiveDate>> = vec![None; lead];
        cells.extend((0..self.month.days_in_month()).map(|offset| {
            first.checked_add_days(chrono::Days::new(u64::from(offset)))
        }));
        while cells.len() % 7 != 0 {
            cells.push(None);
        }

        cells
            .chunks(7)
            .map(|week| {
                let mut row = [None; 7];
                row.copy_from_slice(week);
                row
            })
            .collect()
    }

    /// Worked time on `date`, zero when nothing was tracked.
    pub fn total_on(&self, date: NaiveDate) -> Duration {
        self.days.get(&date).copied().unwrap_or_else(Duration::zero)
    }

    pub fn total(&self) -> Duration {
        self.days.values().fold(Duration::zero(), |acc, d| acc + *d)
    }
}

/// Buckets finished entries by local start day within `month`.
pub fn calendar<Tz: TimeZone>(log: &WorkLog, month: CalendarMonth, tz: &Tz) -> MonthTotals {
    let mut days = BTreeMap::new();
    for (entry, end) in finished(log) {
        let day = local_date(&entry.start_time, tz);
        if month.contains(day) {
            *days.entry(day).or_insert_with(Duration::zero) += end - entry.start_time;
        }
    }
    MonthTotals { month, days }
}

// ========== CSV ==========

/// One exported row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CsvRow {
    pub name: String,
    pub start: String,
    /// Empty while the entry is active.
    pub end: String,
    /// Tags joined with `,`.
    pub tags: String,
    /// Whole minutes, measured to `now` for the active entry.
    pub duration_minutes: i64,
}

/// Every entry of the log as an export row, in log order.
pub fn csv_rows(log: &WorkLog, now: DateTime<Utc>) -> Vec<CsvRow> {
    log.entries()
        .iter()
        .map(|entry| CsvRow {
            name: entry.name.clone(),
            start: format_timestamp(&entry.start_time),
            end: entry
                .end_time
                .as_ref()
                .map(format_timestamp)
                .unwrap_or_default(),
            tags: entry
                .tags
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(","),
            duration_minutes: entry.duration(now).num_minutes().max(0),
        })
        .collect()
}
