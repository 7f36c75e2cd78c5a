//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// A simple and extensible time tracker for the command line.
///
/// Times are given as 14:30 or 1430 in local time; leave them out to mean
/// "now". Set `TI_CURRENT_DAY=YYYY-MM-DD` to put them on another day.
#[derive(Debug, Parser)]
#[command(name = "ti", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start working on an activity.
    #[command(visible_aliases = ["o", "on"])]
    Start {
        /// What you are working on.
        name: String,

        /// When you started (default: now).
        time: Vec<String>,
    },

    /// Stop working on the current activity.
    #[command(visible_aliases = ["f", "fin"])]
    Stop {
        /// When you stopped (default: now).
        time: Vec<String>,
    },

    /// Show what you are working on.
    #[command(visible_alias = "s")]
    Status,

    /// Tag the current activity.
    #[command(visible_alias = "t")]
    Tag {
        /// Tags to add. Avoid whitespace inside a tag.
        #[arg(required = true)]
        tags: Vec<String>,
    },

    /// Add a note to the current activity.
    #[command(visible_alias = "n")]
    Note {
        /// Note text; words are joined with spaces.
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Show logged work.
    #[command(visible_alias = "l")]
    Log {
        /// Pass `today` to only show work started today.
        period: Option<String>,
    },

    /// Export every entry as CSV.
    Csv,

    /// Total time spent on one activity.
    Report {
        /// Activity name, matched exactly.
        activity: String,
    },

    /// Calendar of worked time for a month.
    Calview {
        /// Month number (1-12) of the current year, or YYYY-MM.
        month: String,
    },

    /// Open the sheet in your editor.
    #[command(visible_alias = "e")]
    Edit,
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn aliases_resolve() {
        let cli = Cli::try_parse_from(["ti", "on", "writing", "09:00"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Start { ref name, ref time }) if name == "writing" && time == &["09:00"]
        ));

        let cli = Cli::try_parse_from(["ti", "fin"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Stop { ref time }) if time.is_empty()));

        let cli = Cli::try_parse_from(["ti", "s"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Status)));
    }

    #[test]
    fn note_keeps_every_word() {
        let cli = Cli::try_parse_from(["ti", "n", "fixed", "the", "-flaky", "test"]).unwrap();
        let Some(Commands::Note { text }) = cli.command else {
            panic!("expected note");
        };
        assert_eq!(text, vec!["fixed", "the", "-flaky", "test"]);
    }

    #[test]
    fn tag_requires_a_tag() {
        assert!(Cli::try_parse_from(["ti", "tag"]).is_err());
        assert!(Cli::try_parse_from(["ti", "note"]).is_err());
        assert!(Cli::try_parse_from(["ti", "start"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["ti", "log", "today", "--no-color"]).unwrap();
        assert!(cli.no_color);
        assert!(matches!(cli.command, Some(Commands::Log { period: Some(ref p) }) if p == "today"));
    }
}
