//! Error taxonomy for the tracker core.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::time::format_timestamp;

/// Errors raised by time parsing, the session state machine and the views.
///
/// Every variant is a user-facing rejection of the current command. None of
/// them is retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TiError {
    /// Malformed or missing command input.
    #[error("{0}")]
    BadArguments(String),

    /// A user-supplied clock time (or override date) could not be interpreted.
    #[error("Don't understand the time {input:?}. Supported formats are 14:30 or 1430")]
    UnparseableTime { input: String },

    /// `start` was requested while another activity is still running.
    #[error("You are already working on {name} (for {gap}). Stop it or use a different sheet.")]
    AlreadyWorking { name: String, gap: String },

    /// An operation that needs an active entry ran while idle.
    #[error(
        "For all I know, you aren't working on anything. I don't know what to do.\nSee `ti -h` to know how to start working."
    )]
    NotWorking,

    /// The stop time lies before the start of the active entry.
    #[error("Can't stop {name} at {}, it was started at {}", format_timestamp(.end), format_timestamp(.start))]
    StopBeforeStart {
        name: String,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// The start time lies before the last entry in the log.
    #[error("Can't start at {}, the log already has work starting at {}", format_timestamp(.start), format_timestamp(.last_start))]
    StartOutOfOrder {
        start: DateTime<Utc>,
        last_start: DateTime<Utc>,
    },

    /// A stored timestamp is not ISO-8601 UTC.
    #[error("invalid timestamp in work log: {0:?}")]
    InvalidTimestamp(String),
}

impl TiError {
    /// Shorthand for [`TiError::BadArguments`].
    pub fn bad_arguments(message: impl Into<String>) -> Self {
        Self::BadArguments(message.into())
    }
}
