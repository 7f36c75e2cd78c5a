//! Edit command: hand the sheet to an external editor.

use std::io::Write;
use std::process::Command;

use anyhow::{Context, Result, bail};
use ti_core::WorkLog;
use ti_store::DataStore;

/// Opens the sheet in `editor` and checks it once the editor exits.
///
/// `editor` may carry arguments (`code --wait`); the sheet path is appended.
/// A sheet that no longer passes validation is kept, but every problem is
/// reported so it can be fixed by hand.
pub fn run<W: Write>(writer: &mut W, store: &dyn DataStore, editor: &str) -> Result<()> {
    let path = store.location();
    if !path.exists() {
        store.dump(&WorkLog::default())?;
    }

    let mut parts = editor.split_whitespace();
    let Some(program) = parts.next() else {
        bail!("No editor configured. Set EDITOR or `editor` in the config file.");
    };

    tracing::debug!(editor, path = %path.display(), "launching editor");
    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .with_context(|| format!("failed to launch editor {editor:?}"))?;
    if !status.success() {
        bail!("Editor {editor:?} exited with {status}");
    }

    let log = store
        .load()
        .context("the sheet is no longer valid JSON after editing")?;
    for violation in log.validate() {
        tracing::warn!(%violation, "sheet problem after edit");
        writeln!(writer, "Warning: {violation}")?;
    }
    Ok(())
}
