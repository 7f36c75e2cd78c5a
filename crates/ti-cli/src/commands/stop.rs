//! Stop command for finishing the current activity.

use std::io::Write;

use anyhow::Result;
use chrono::TimeZone;
use ti_store::DataStore;

use super::{Invocation, with_log_mut};

pub fn run<W: Write, Tz: TimeZone>(
    writer: &mut W,
    store: &dyn DataStore,
    inv: &Invocation<Tz>,
    time: &[String],
) -> Result<()> {
    let end = inv.parse_time(time)?;
    let stopped = with_log_mut(store, |log| log.stop(end))?;

    writeln!(
        writer,
        "So you stopped working on {} after {}.",
        inv.colors.red(&stopped.name),
        inv.colors.yellow(&stopped.gap)
    )?;
    Ok(())
}
