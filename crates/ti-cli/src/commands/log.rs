//! Log command for listing tracked work.

use std::io::Write;

use anyhow::Result;
use chrono::TimeZone;
use ti_core::time::utc_to_local;
use ti_core::views::{LogLine, LogPeriod, log_view};
use ti_store::DataStore;

use crate::color::Colorizer;

use super::Invocation;

pub fn run<W: Write, Tz: TimeZone>(
    writer: &mut W,
    store: &dyn DataStore,
    inv: &Invocation<Tz>,
    period: Option<&str>,
) -> Result<()> {
    let log = store.load()?;
    let period = LogPeriod::from_arg(period);
    // The override day only matters when filtering by it.
    let today = match period {
        LogPeriod::Today => inv.today()?,
        LogPeriod::All => utc_to_local(&inv.now, &inv.tz).date_naive(),
    };
    let lines = log_view(&log, period, today, inv.now, &inv.tz);

    if lines.is_empty() {
        match period {
            LogPeriod::Today => writeln!(writer, "Nothing logged today.")?,
            LogPeriod::All => writeln!(writer, "Nothing logged yet.")?,
        }
        return Ok(());
    }

    let width = lines.iter().map(|line| line.name.chars().count()).max().unwrap_or(0);
    for line in &lines {
        writeln!(writer, "{}", format_line(line, width, inv.colors))?;
    }
    Ok(())
}

fn format_line(line: &LogLine, width: usize, colors: Colorizer) -> String {
    let end = match line.end {
        Some(end) if end.date() == line.start.date() => end.format("%H:%M").to_string(),
        Some(end) => end.format("%Y-%m-%d %H:%M").to_string(),
        None => "active".to_string(),
    };

    let mut out = format!(
        "{}  {} - {}  {}",
        colors.green(&format!("{:<width$}", line.name)),
        line.start.format("%Y-%m-%d %H:%M"),
        end,
        colors.yellow(&line.gap)
    );
    if !line.tags.is_empty() {
        out.push_str(&format!("  [{}]", colors.blue(&line.tags.join(", "))));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;
    use ti_core::{TiError, WorkEntry};

    use crate::commands::testing::{finished, invocation, output, seed, store, utc};

    fn seeded() -> (tempfile::TempDir, ti_store::JsonStore) {
        let (temp, store) = store();
        let mut tagged = finished("coding", "2025-01-29T08:00:00Z", "2025-01-29T08:30:00Z");
        tagged.tags.insert("work".to_string());
        tagged.tags.insert("rust".to_string());
        seed(
            &store,
            vec![
                finished("writing", "2025-01-28T22:00:00Z", "2025-01-29T00:05:00Z"),
                tagged,
                WorkEntry::new("writing", utc("2025-01-29T11:40:00Z")),
            ],
        );
        (temp, store)
    }

    #[test]
    fn log_lists_all_entries() {
        let (_temp, store) = seeded();
        let mut out = Vec::new();
        run(&mut out, &store, &invocation(), None).unwrap();

        assert_snapshot!(output(out), @r"
        writing  2025-01-28 22:00 - 2025-01-29 00:05  about 2 hours
        coding   2025-01-29 08:00 - 08:30  30 minutes  [rust, work]
        writing  2025-01-29 11:40 - active  20 minutes
        ");
    }

    #[test]
    fn log_today_only_shows_todays_entries() {
        let (_temp, store) = seeded();
        let mut out = Vec::new();
        run(&mut out, &store, &invocation(), Some("today")).unwrap();

        let out = output(out);
        assert_eq!(out.lines().count(), 2);
        assert!(!out.contains("22:00"));
    }

    #[test]
    fn bad_override_day_only_breaks_today() {
        let (_temp, store) = seeded();
        let inv = Invocation {
            current_day: Some("20250129".to_string()),
            ..invocation()
        };

        let mut out = Vec::new();
        run(&mut out, &store, &inv, None).unwrap();
        assert_eq!(output(out).lines().count(), 3);

        let err = run(&mut Vec::new(), &store, &inv, Some("today")).unwrap_err();
        assert_eq!(
            err.downcast_ref::<TiError>(),
            Some(&TiError::UnparseableTime {
                input: "20250129".to_string()
            })
        );
    }

    #[test]
    fn log_on_empty_sheet() {
        let (_temp, store) = store();
        let mut out = Vec::new();
        run(&mut out, &store, &invocation(), None).unwrap();
        run(&mut out, &store, &invocation(), Some("today")).unwrap();
        assert_snapshot!(output(out), @r"
        Nothing logged yet.
        Nothing logged today.
        ");
    }
}
