//! Human-readable elapsed time.

use chrono::{DateTime, Duration, Utc};

/// Describes the time between two instants as a coarse phrase.
///
/// Works on whole elapsed minutes. Callers pass `end >= start`; a negative
/// span is read as zero minutes.
pub fn format_gap(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    format_gap_minutes((end - start).num_seconds().max(0) / 60)
}

/// Phrase for a number of whole elapsed minutes.
pub fn format_gap_minutes(minutes: i64) -> String {
    match minutes {
        i64::MIN..=0 => "less than a minute".to_string(),
        1 => "a minute".to_string(),
        2..44 => format!("{minutes} minutes"),
        44..89 => "about an hour".to_string(),
        89..1439 => format!("about {} hours", minutes / 60),
        1439..2519 => "about a day".to_string(),
        2519..43199 => format!("about {} days", minutes / 1440),
        43199..86399 => "about a month".to_string(),
        86399..525_599 => format!("about {} months", minutes / 43200),
        _ => "more than a year".to_string(),
    }
}

/// Exact total as `Xh Ym`, or `Ym` under an hour.
pub fn format_hours_minutes(duration: Duration) -> String {
    let total_minutes = duration.num_minutes().max(0);
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours >= 1 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}
