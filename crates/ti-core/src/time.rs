//! Clock-time parsing and UTC/local conversion.
//!
//! Users type wall-clock times (`14:30`, `1430`) in their local zone; the work
//! log stores UTC instants. Everything here is generic over [`TimeZone`] so the
//! CLI can pass [`chrono::Local`] while tests pin a fixed offset.

use std::sync::LazyLock;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use regex::Regex;

use crate::error::TiError;

/// Serialization format for stored instants: ISO-8601, microseconds, `Z`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// Format of the "current day" override.
pub const CURRENT_DAY_FORMAT: &str = "%Y-%m-%d";

/// `HH:MM`, hour and minute may be a single digit.
static COLON_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(2[0-3]|[01]\d|\d):([0-5]\d|\d)$").unwrap());

/// `HHMM`, same field rules without the separator.
static COMPACT_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(2[0-3]|[01]\d|\d)([0-5]\d|\d)$").unwrap());

/// Formats an instant the way the work log stores it.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Parses a stored ISO-8601 UTC timestamp.
///
/// Accepts anything RFC 3339 accepts, plus naive timestamps which are taken
/// to be UTC.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, TiError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| TiError::InvalidTimestamp(s.to_string()))
}

/// Parses the `YYYY-MM-DD` override for "today".
pub fn parse_current_day(raw: &str) -> Result<NaiveDate, TiError> {
    NaiveDate::parse_from_str(raw.trim(), CURRENT_DAY_FORMAT).map_err(|_| {
        TiError::UnparseableTime {
            input: raw.to_string(),
        }
    })
}

/// Parses a 24-hour clock time in either `HH:MM` or `HHMM` form.
pub fn parse_clock_time(input: &str) -> Result<NaiveTime, TiError> {
    let unparseable = || TiError::UnparseableTime {
        input: input.to_string(),
    };

    let trimmed = input.trim();
    let caps = [&*COLON_TIME_RE, &*COMPACT_TIME_RE]
        .into_iter()
        .find_map(|re| re.captures(trimmed))
        .ok_or_else(unparseable)?;

    let hour: u32 = caps[1].parse().map_err(|_| unparseable())?;
    let minute: u32 = caps[2].parse().map_err(|_| unparseable())?;
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(unparseable)
}

/// Converts a wall-clock reading in `tz` to UTC.
///
/// Ambiguous readings (DST fall-back) resolve to the earlier instant. Readings
/// inside a spring-forward gap are moved one hour later, which lands on the
/// instant the clock would have shown without the jump.
pub fn local_to_utc<Tz: TimeZone>(local: &NaiveDateTime, tz: &Tz) -> DateTime<Utc> {
    if let Some(dt) = tz.from_local_datetime(local).earliest() {
        return dt.with_timezone(&Utc);
    }
    let shifted = *local + Duration::hours(1);
    tz.from_local_datetime(&shifted)
        .earliest()
        .map_or_else(|| local.and_utc(), |dt| dt.with_timezone(&Utc))
}

/// Converts a UTC instant to wall-clock time in `tz`.
pub fn utc_to_local<Tz: TimeZone>(timestamp: &DateTime<Utc>, tz: &Tz) -> DateTime<Tz> {
    timestamp.with_timezone(tz)
}

/// Interprets a user-supplied time.
///
/// - Empty input means "now" and returns `now` untouched.
/// - Otherwise the clock time is placed on `current_day` (when given) or on
///   today's date in `tz`, with seconds zeroed, and converted to UTC.
pub fn parse_user_time<Tz: TimeZone>(
    input: &str,
    current_day: Option<&str>,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Result<DateTime<Utc>, TiError> {
    if input.trim().is_empty() {
        return Ok(now);
    }

    let clock = parse_clock_time(input)?;
    let day = match current_day {
        Some(raw) => parse_current_day(raw)?,
        None => utc_to_local(&now, tz).date_naive(),
    };

    let parsed = local_to_utc(&day.and_time(clock), tz);
    tracing::debug!(input, %parsed, "parsed user time");
    Ok(parsed)
}
