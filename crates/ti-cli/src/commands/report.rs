//! Report command for one activity's totals.

use std::io::Write;

use anyhow::Result;
use chrono::TimeZone;
use ti_core::gap::{format_gap_minutes, format_hours_minutes};
use ti_core::views::activity_report;
use ti_store::DataStore;

use super::Invocation;

pub fn run<W: Write, Tz: TimeZone>(
    writer: &mut W,
    store: &dyn DataStore,
    inv: &Invocation<Tz>,
    activity: &str,
) -> Result<()> {
    let log = store.load()?;
    let report = activity_report(&log, activity, &inv.tz);
    let colors = inv.colors;

    if report.entries == 0 {
        writeln!(writer, "No finished work on {}.", colors.green(activity))?;
        return Ok(());
    }

    writeln!(writer, "{} {}", colors.bold("REPORT"), colors.green(&report.activity))?;
    writeln!(writer, "Entries: {}", report.entries)?;
    writeln!(
        writer,
        "Total: {} ({})",
        colors.yellow(&format_hours_minutes(report.total)),
        format_gap_minutes(report.total.num_minutes())
    )?;
    writeln!(writer, "By day:")?;
    for (day, spent) in &report.days {
        writeln!(writer, "  {}  {}", day.format("%Y-%m-%d"), format_hours_minutes(*spent))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;
    use ti_core::WorkEntry;

    use crate::commands::testing::{finished, invocation, output, seed, store, utc};

    #[test]
    fn report_totals_finished_entries_by_day() {
        let (_temp, store) = store();
        seed(
            &store,
            vec![
                finished("writing", "2025-01-28T09:00:00Z", "2025-01-28T11:05:00Z"),
                finished("coding", "2025-01-29T08:00:00Z", "2025-01-29T08:30:00Z"),
                finished("writing", "2025-01-29T09:00:00Z", "2025-01-29T09:45:00Z"),
                WorkEntry::new("writing", utc("2025-01-29T11:40:00Z")),
            ],
        );

        let mut out = Vec::new();
        run(&mut out, &store, &invocation(), "writing").unwrap();

        assert_snapshot!(output(out), @r"
        REPORT writing
        Entries: 2
        Total: 2h 50m (about 2 hours)
        By day:
          2025-01-28  2h 5m
          2025-01-29  45m
        ");
    }

    #[test]
    fn report_matches_names_exactly() {
        let (_temp, store) = store();
        seed(
            &store,
            vec![finished("writing", "2025-01-28T09:00:00Z", "2025-01-28T11:05:00Z")],
        );

        let mut out = Vec::new();
        run(&mut out, &store, &invocation(), "Writing").unwrap();
        assert_snapshot!(output(out), @"No finished work on Writing.");
    }
}
