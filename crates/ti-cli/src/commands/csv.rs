//! CSV command for exporting every entry.

use std::io::Write;

use anyhow::{Context, Result};
use ti_core::views::csv_rows;
use ti_store::DataStore;

/// Writes one row per entry under a header; an empty log writes nothing.
/// Active entries have an empty end and a duration measured to `now`.
pub fn run<W: Write>(
    writer: &mut W,
    store: &dyn DataStore,
    now: chrono::DateTime<chrono::Utc>,
) -> Result<()> {
    let log = store.load()?;

    let mut wtr = ::csv::Writer::from_writer(writer);
    for row in csv_rows(&log, now) {
        wtr.serialize(row).context("failed to write CSV row")?;
    }
    wtr.flush().context("failed to flush CSV output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;
    use ti_core::WorkEntry;

    use crate::commands::testing::{finished, invocation, output, seed, store, utc};

    #[test]
    fn csv_exports_every_entry_once() {
        let (_temp, store) = store();
        let mut tagged = finished("coding", "2025-01-29T08:00:00Z", "2025-01-29T08:30:00Z");
        tagged.tags.insert("work".to_string());
        tagged.tags.insert("urgent".to_string());
        seed(
            &store,
            vec![
                finished("writing", "2025-01-29T06:00:00Z", "2025-01-29T08:05:00Z"),
                tagged,
                WorkEntry::new("review, round 2", utc("2025-01-29T11:15:00Z")),
            ],
        );

        let mut out = Vec::new();
        run(&mut out, &store, invocation().now).unwrap();

        assert_snapshot!(output(out), @r#"
        name,start,end,tags,duration_minutes
        writing,2025-01-29T06:00:00.000000Z,2025-01-29T08:05:00.000000Z,,125
        coding,2025-01-29T08:00:00.000000Z,2025-01-29T08:30:00.000000Z,"urgent,work",30
        "review, round 2",2025-01-29T11:15:00.000000Z,,,45
        "#);
    }

    #[test]
    fn csv_on_empty_sheet_is_empty() {
        let (_temp, store) = store();
        let mut out = Vec::new();
        run(&mut out, &store, invocation().now).unwrap();
        assert_eq!(output(out), "");
    }
}
