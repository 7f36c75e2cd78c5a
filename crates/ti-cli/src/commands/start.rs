//! Start command for beginning work on an activity.

use std::io::Write;

use anyhow::Result;
use chrono::TimeZone;
use ti_store::DataStore;

use super::{Invocation, with_log_mut};

pub fn run<W: Write, Tz: TimeZone>(
    writer: &mut W,
    store: &dyn DataStore,
    inv: &Invocation<Tz>,
    name: &str,
    time: &[String],
) -> Result<()> {
    let start = inv.parse_time(time)?;
    let name = with_log_mut(store, |log| {
        log.start(name, start, inv.now).map(|entry| entry.name.clone())
    })?;

    writeln!(writer, "Start working on {}.", inv.colors.green(&name))?;
    Ok(())
}
