//! Tag command for labelling the current activity.

use std::io::Write;

use anyhow::Result;
use ti_store::DataStore;

use super::with_log_mut;

pub fn run<W: Write>(writer: &mut W, store: &dyn DataStore, tags: &[String]) -> Result<()> {
    let tags: Vec<&str> = tags
        .iter()
        .map(|tag| tag.trim())
        .filter(|tag| !tag.is_empty())
        .collect();
    if tags.is_empty() {
        return Err(ti_core::TiError::bad_arguments("Please provide at least one tag to add.").into());
    }

    let tagged = with_log_mut(store, |log| log.tag(tags.as_slice()))?;

    match tagged.added {
        0 => writeln!(writer, "Okay, current work already has those tags.")?,
        1 => writeln!(writer, "Okay, tagged current work with 1 tag.")?,
        n => writeln!(writer, "Okay, tagged current work with {n} tags.")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::BTreeSet;

    use insta::assert_snapshot;
    use ti_core::{TiError, WorkEntry};

    use crate::commands::testing::{output, seed, store, utc};

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn tag_collapses_duplicates() {
        let (_temp, store) = store();
        seed(&store, vec![WorkEntry::new("coding", utc("2025-01-29T09:00:00Z"))]);

        let mut out = Vec::new();
        run(&mut out, &store, &tags(&["work", "urgent"])).unwrap();
        run(&mut out, &store, &tags(&["work"])).unwrap();

        assert_snapshot!(output(out), @r"
        Okay, tagged current work with 2 tags.
        Okay, current work already has those tags.
        ");
        let expected: BTreeSet<String> = tags(&["urgent", "work"]).into_iter().collect();
        assert_eq!(store.load().unwrap().entries()[0].tags, expected);
    }

    #[test]
    fn tag_single() {
        let (_temp, store) = store();
        seed(&store, vec![WorkEntry::new("coding", utc("2025-01-29T09:00:00Z"))]);
        let mut out = Vec::new();
        run(&mut out, &store, &tags(&["review"])).unwrap();
        assert_snapshot!(output(out), @"Okay, tagged current work with 1 tag.");
    }

    #[test]
    fn tag_while_idle_fails() {
        let (_temp, store) = store();
        let err = run(&mut Vec::new(), &store, &tags(&["x"])).unwrap_err();
        assert_eq!(err.downcast_ref::<TiError>(), Some(&TiError::NotWorking));
    }

    #[test]
    fn blank_tags_are_rejected() {
        let (_temp, store) = store();
        seed(&store, vec![WorkEntry::new("coding", utc("2025-01-29T09:00:00Z"))]);
        let err = run(&mut Vec::new(), &store, &tags(&["  "])).unwrap_err();
        assert!(matches!(err.downcast_ref::<TiError>(), Some(TiError::BadArguments(_))));
    }
}
