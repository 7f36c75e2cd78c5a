//! Note command for annotating the current activity.

use std::io::Write;

use anyhow::Result;
use ti_core::TiError;
use ti_store::DataStore;

use crate::color::Colorizer;

use super::with_log_mut;

pub fn run<W: Write>(
    writer: &mut W,
    store: &dyn DataStore,
    colors: Colorizer,
    words: &[String],
) -> Result<()> {
    let text = words.join(" ");
    if text.trim().is_empty() {
        return Err(TiError::bad_arguments("Please provide some text to be noted.").into());
    }

    let name = with_log_mut(store, |log| log.note(&text).map(|entry| entry.name.clone()))?;

    writeln!(writer, "Yep, noted to {}.", colors.yellow(&name))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;
    use ti_core::WorkEntry;

    use crate::commands::testing::{output, seed, store, utc};

    #[test]
    fn note_joins_words_and_appends() {
        let (_temp, store) = store();
        seed(&store, vec![WorkEntry::new("coding", utc("2025-01-29T09:00:00Z"))]);

        let mut out = Vec::new();
        run(&mut out, &store, Colorizer::plain(), &["fixed".to_string(), "parser".to_string()]).unwrap();
        run(&mut out, &store, Colorizer::plain(), &["wrote tests".to_string()]).unwrap();

        assert_snapshot!(output(out), @r"
        Yep, noted to coding.
        Yep, noted to coding.
        ");
        assert_eq!(
            store.load().unwrap().entries()[0].notes,
            vec!["fixed parser", "wrote tests"]
        );
    }

    #[test]
    fn note_while_idle_fails() {
        let (_temp, store) = store();
        let err = run(&mut Vec::new(), &store, Colorizer::plain(), &["hello".to_string()]).unwrap_err();
        assert_eq!(err.downcast_ref::<TiError>(), Some(&TiError::NotWorking));
    }
}
