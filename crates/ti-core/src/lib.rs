//! Core domain logic for the ti time tracker.
//!
//! This crate contains:
//! - The work log model: entries and the persisted document
//! - The session state machine: start, stop, tag and note
//! - Time parsing: user clock times to UTC instants
//! - Gap formatting: elapsed time as a human phrase
//! - Views: log, status, per-activity report, calendar and CSV rows

mod entry;
mod error;
pub mod gap;
mod session;
pub mod time;
pub mod views;

pub use entry::{Violation, WorkEntry, WorkLog};
pub use error::TiError;
pub use gap::format_gap;
pub use session::{SessionState, Stopped, Tagged};
pub use time::parse_user_time;
