//! Status command for showing the current activity.

use std::io::Write;

use anyhow::Result;
use chrono::TimeZone;
use ti_core::time::utc_to_local;
use ti_core::views::{Status, status};
use ti_store::DataStore;

use super::Invocation;

pub fn run<W: Write, Tz: TimeZone>(
    writer: &mut W,
    store: &dyn DataStore,
    inv: &Invocation<Tz>,
) -> Result<()> {
    let log = store.load()?;
    let colors = inv.colors;

    match status(&log, inv.now) {
        Status::Idle => {
            writeln!(writer, "For all I know, you aren't working on anything.")?;
        }
        Status::Working {
            name,
            tags,
            since,
            gap,
        } => {
            let since = utc_to_local(&since, &inv.tz).naive_local();
            writeln!(
                writer,
                "You have been working on {} for {} (since {}).",
                colors.green(&name),
                colors.yellow(&gap),
                since.format("%H:%M")
            )?;
            if !tags.is_empty() {
                let tags: Vec<String> = tags.iter().map(|tag| colors.blue(tag)).collect();
                writeln!(writer, "Tags: {}", tags.join(", "))?;
            }
        }
    }
    Ok(())
}
