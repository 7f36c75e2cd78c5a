//! Calview command: a month grid of worked days.

use std::io::Write;

use anyhow::Result;
use chrono::{Datelike, TimeZone};
use ti_core::gap::format_hours_minutes;
use ti_core::views::{CalendarMonth, MonthTotals, calendar};
use ti_store::DataStore;

use crate::color::Colorizer;

use super::Invocation;

const WEEKDAYS: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

pub fn run<W: Write, Tz: TimeZone>(
    writer: &mut W,
    store: &dyn DataStore,
    inv: &Invocation<Tz>,
    month: &str,
) -> Result<()> {
    let month = CalendarMonth::parse(month, inv.today()?)?;
    let log = store.load()?;
    let totals = calendar(&log, month, &inv.tz);

    write_grid(writer, &totals, inv.colors)?;
    writeln!(writer)?;

    let title = month.first_day().format("%B %Y").to_string();
    if totals.days.is_empty() {
        writeln!(writer, "No finished work in {title}.")?;
        return Ok(());
    }
    for (day, spent) in &totals.days {
        writeln!(writer, "{}  {}", day.format("%Y-%m-%d"), format_hours_minutes(*spent))?;
    }
    writeln!(
        writer,
        "Total: {}",
        inv.colors.yellow(&format_hours_minutes(totals.total()))
    )?;
    Ok(())
}

/// Days with tracked work carry a `*`.
fn write_grid<W: Write>(writer: &mut W, totals: &MonthTotals, colors: Colorizer) -> Result<()> {
    let title = totals.month.first_day().format("%B %Y").to_string();
    writeln!(writer, "{}", colors.bold(&title))?;

    let header: String = WEEKDAYS.iter().map(|day| format!("{day:>3} ")).collect();
    writeln!(writer, "{}", header.trim_end())?;

    for week in totals.weeks() {
        let row: String = week
            .iter()
            .map(|cell| match cell {
                Some(date) if totals.days.contains_key(date) => format!("{:>3}*", date.day()),
                Some(date) => format!("{:>3} ", date.day()),
                None => "    ".to_string(),
            })
            .collect();
        writeln!(writer, "{}", row.trim_end())?;
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
    fn calview_marks_worked_days() {
        let (_temp, store) = store();
        seed(
            &store,
            vec![
                finished("writing", "2024-12-31T09:00:00Z", "2024-12-31T10:00:00Z"),
                finished("writing", "2025-01-28T09:00:00Z", "2025-01-28T11:05:00Z"),
                finished("coding", "2025-01-29T08:00:00Z", "2025-01-29T08:30:00Z"),
                finished("writing", "2025-01-29T09:00:00Z", "2025-01-29T09:45:00Z"),
                WorkEntry::new("writing", utc("2025-01-29T11:40:00Z")),
            ],
        );

        let mut out = Vec::new();
        run(&mut out, &store, &invocation(), "1").unwrap();

        assert_snapshot!(output(out), @r"
        January 2025
         Mo  Tu  We  Th  Fr  Sa  Su
                  1   2   3   4   5
          6   7   8   9  10  11  12
         13  14  15  16  17  18  19
         20  21  22  23  24  25  26
         27  28* 29* 30  31

        2025-01-28  2h 5m
        2025-01-29  1h 15m
        Total: 3h 20m
        ");
    }

    #[test]
    fn calview_accepts_year_month() {
        let (_temp, store) = store();
        seed(
            &store,
            vec![finished("writing", "2024-12-31T09:00:00Z", "2024-12-31T10:00:00Z")],
        );

        let mut out = Vec::new();
        run(&mut out, &store, &invocation(), "2024-12").unwrap();
        let out = output(out);
        assert!(out.starts_with("December 2024\n"));
        assert!(out.contains(" 30  31*"));
        assert!(out.ends_with("Total: 1h 0m\n"));
    }

    #[test]
    fn calview_empty_month() {
        let (_temp, store) = store();
        let mut out = Vec::new();
        run(&mut out, &store, &invocation(), "2").unwrap();
        assert!(output(out).ends_with("\nNo finished work in February 2025.\n"));
    }

    #[test]
    fn calview_rejects_bad_month() {
        let (_temp, store) = store();
        let mut out = Vec::new();
        assert!(run(&mut out, &store, &invocation(), "13").is_err());
        assert!(run(&mut out, &store, &invocation(), "march").is_err());
    }
}
