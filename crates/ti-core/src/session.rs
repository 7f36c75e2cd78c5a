//! The work session state machine.
//!
//! A [`WorkLog`] is either idle (every entry finished) or active (the last
//! entry has no end time). `start` moves idle to active, `stop` moves back,
//! and `tag`/`note` only touch the active entry. Each operation checks its
//! precondition before changing anything, so a rejected call leaves the log
//! exactly as it was.

use chrono::{DateTime, Utc};

use crate::entry::{WorkEntry, WorkLog};
use crate::error::TiError;
use crate::gap::format_gap;

/// Where a work log currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState<'a> {
    Idle,
    Active(&'a WorkEntry),
}

/// Result of a successful `stop`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stopped {
    pub name: String,
    pub gap: String,
}

/// Result of a successful `tag`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tagged {
    /// Tags that were not on the entry before.
    pub added: usize,
    /// Tags on the entry afterwards.
    pub total: usize,
}

impl WorkLog {
    /// Current state of the log.
    pub fn state(&self) -> SessionState<'_> {
        self.active()
            .map_or(SessionState::Idle, SessionState::Active)
    }

    /// Begins work on `name` at `time`.
    ///
    /// `now` is only used to describe how long the conflicting activity has
    /// been running when the log is already active.
    pub fn start(
        &mut self,
        name: &str,
        time: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<&WorkEntry, TiError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TiError::bad_arguments(
                "Need the name of whatever you are working on.",
            ));
        }

        if let Some(current) = self.active() {
            return Err(TiError::AlreadyWorking {
                name: current.name.clone(),
                gap: format_gap(current.start_time, now),
            });
        }

        if let Some(last_start) = self.work.last().map(|entry| entry.start_time) {
            if time < last_start {
                return Err(TiError::StartOutOfOrder {
                    start: time,
                    last_start,
                });
            }
        }

        tracing::info!(name, start = %time, "starting work");
        self.work.push(WorkEntry::new(name, time));
        Ok(&self.work[self.work.len() - 1])
    }

    /// Finishes the active entry at `time`.
    pub fn stop(&mut self, time: DateTime<Utc>) -> Result<Stopped, TiError> {
        let current = self.active_mut().ok_or(TiError::NotWorking)?;
        if time < current.start_time {
            return Err(TiError::StopBeforeStart {
                name: current.name.clone(),
                start: current.start_time,
                end: time,
            });
        }

        current.end_time = Some(time);
        tracing::info!(name = %current.name, end = %time, "stopped work");
        Ok(Stopped {
            name: current.name.clone(),
            gap: format_gap(current.start_time, time),
        })
    }

    /// Adds tags to the active entry. Tags already present are ignored.
    pub fn tag<S: AsRef<str>>(&mut self, tags: &[S]) -> Result<Tagged, TiError> {
        let current = self.active_mut().ok_or(TiError::NotWorking)?;

        let added = tags
            .iter()
            .filter(|tag| {
                let tag: &str = (*tag).as_ref();
                current.tags.insert(tag.to_string())
            })
            .count();

        tracing::debug!(name = %current.name, added, "tagged work");
        Ok(Tagged {
            added,
            total: current.tags.len(),
        })
    }

    /// Appends a note to the active entry.
    pub fn note(&mut self, text: &str) -> Result<&WorkEntry, TiError> {
        let current = self.active_mut().ok_or(TiError::NotWorking)?;
        current.notes.push(text.to_string());
        tracing::debug!(name = %current.name, "noted work");
        Ok(&*current)
    }
}
