//! Work entries and the work log document.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// One tracked activity interval.
///
/// An entry without `end_time` is the active one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkEntry {
    /// Activity name.
    pub name: String,

    /// When work started.
    #[serde(with = "timestamp")]
    pub start_time: DateTime<Utc>,

    /// When work stopped; absent while active.
    #[serde(
        default,
        with = "timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_time: Option<DateTime<Utc>>,

    /// Tags attached to the entry.
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: BTreeSet<String>,

    /// Free-text notes in the order they were added.
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: Vec<String>,
}

impl WorkEntry {
    /// Creates an active entry with no tags or notes.
    pub fn new(name: impl Into<String>, start_time: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            start_time,
            end_time: None,
            tags: BTreeSet::new(),
            notes: Vec::new(),
        }
    }

    /// Whether the entry is still running.
    pub const fn is_active(&self) -> bool {
        self.end_time.is_none()
    }

    /// End of the entry, or `now` while it is still running.
    pub fn end_or(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.end_time.unwrap_or(now)
    }

    /// Elapsed time, measured to `now` while active.
    pub fn duration(&self, now: DateTime<Utc>) -> Duration {
        self.end_or(now) - self.start_time
    }
}

/// The persisted document: every entry ever tracked, in start order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkLog {
    #[serde(default, deserialize_with = "null_as_default")]
    pub work: Vec<WorkEntry>,
}

/// A broken work log invariant, as found by [`WorkLog::validate`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Violation {
    #[error("entry {index} has an empty name")]
    EmptyName { index: usize },

    #[error("entry {index} ({name}) has no end time but is not the last entry")]
    ActiveNotLast { index: usize, name: String },

    #[error("entry {index} ({name}) ends before it starts")]
    EndBeforeStart { index: usize, name: String },

    #[error("entry {index} ({name}) starts before the entry preceding it")]
    OutOfOrder { index: usize, name: String },
}

impl WorkLog {
    /// All entries, oldest first.
    pub fn entries(&self) -> &[WorkEntry] {
        &self.work
    }

    /// The active entry, if any.
    pub fn active(&self) -> Option<&WorkEntry> {
        self.work.last().filter(|entry| entry.is_active())
    }

    pub(crate) fn active_mut(&mut self) -> Option<&mut WorkEntry> {
        self.work.last_mut().filter(|entry| entry.is_active())
    }

    /// Checks the log invariants.
    ///
    /// Logs produced by the state machine always pass; hand-edited ones may not.
    pub fn validate(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        let last = self.work.len().saturating_sub(1);

        for (index, entry) in self.work.iter().enumerate() {
            if entry.name.trim().is_empty() {
                violations.push(Violation::EmptyName { index });
            }
            match entry.end_time {
                None if index != last => violations.push(Violation::ActiveNotLast {
                    index,
                    name: entry.name.clone(),
                }),
                Some(end) if end < entry.start_time => {
                    violations.push(Violation::EndBeforeStart {
                        index,
                        name: entry.name.clone(),
                    });
                }
                _ => {}
            }
            if index > 0 && entry.start_time < self.work[index - 1].start_time {
                violations.push(Violation::OutOfOrder {
                    index,
                    name: entry.name.clone(),
                });
            }
        }

        violations
    }
}

/// Reads `null` as the type's default, for documents written by older tools.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Serde adapters storing instants as `2025-01-29T10:00:00.000000Z`.
mod timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de};

    use crate::time::{format_timestamp, parse_timestamp};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_timestamp(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw).map_err(de::Error::custom)
    }

    pub mod option {
        use super::{DateTime, Deserialize, Deserializer, Serializer, Utc, de};
        use super::{format_timestamp, parse_timestamp};

        #[expect(
            clippy::ref_option,
            reason = "serde `with` adapters receive a reference to the field"
        )]
        pub fn serialize<S: Serializer>(
            value: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(ts) => serializer.serialize_str(&format_timestamp(ts)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            // An empty string is what a hand edit leaves behind when clearing the field.
            Option::<String>::deserialize(deserializer)?
                .filter(|raw| !raw.trim().is_empty())
                .map(|raw| parse_timestamp(&raw).map_err(de::Error::custom))
                .transpose()
        }
    }
}
