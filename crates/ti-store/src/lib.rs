//! Storage layer for the ti time tracker.
//!
//! The whole [`WorkLog`] lives in one JSON document. Every command loads it,
//! works on it in memory and, if it changed anything, dumps it back.
//!
//! # Atomicity
//!
//! [`JsonStore::dump`] writes into a temporary file next to the sheet and
//! renames it over the old one, so readers see either the old or the new
//! document, never a partial write. There is no locking between processes:
//! two commands racing on the same sheet resolve to last-write-wins.
//!
//! # Document shape
//!
//! ```json
//! {"work": [{"name": "writing", "start_time": "2025-01-29T09:00:00.000000Z",
//!            "end_time": "2025-01-29T10:00:00.000000Z", "tags": [], "notes": []}]}
//! ```

use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;
use ti_core::WorkLog;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the sheet failed.
    #[error("failed to {action} {}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The sheet is not a valid work log document.
    #[error("invalid work log in {}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The configured datasource type is not supported.
    #[error("App only supports JSON datasources at the moment, not {0:?}")]
    NonexistentDatasource(String),
}

/// Supported datasource types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatasourceKind {
    #[default]
    Json,
}

impl fmt::Display for DatasourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
        }
    }
}

impl FromStr for DatasourceKind {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("json") {
            Ok(Self::Json)
        } else {
            Err(StoreError::NonexistentDatasource(s.to_string()))
        }
    }
}

/// Load/dump access to a persisted work log.
pub trait DataStore {
    /// Reads the whole log. A store that does not exist yet reads as empty.
    fn load(&self) -> Result<WorkLog, StoreError>;

    /// Replaces the stored log with `log`.
    fn dump(&self, log: &WorkLog) -> Result<(), StoreError>;

    /// Where the data lives, for messages and the editor.
    fn location(&self) -> &Path;
}

/// Opens the store of the given datasource type at `path`.
pub fn open(kind: &str, path: &Path) -> Result<Box<dyn DataStore>, StoreError> {
    match kind.parse()? {
        DatasourceKind::Json => Ok(Box::new(JsonStore::new(path))),
    }
}

/// A work log kept in a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn io_error(&self, action: &'static str) -> impl FnOnce(io::Error) -> StoreError + '_ {
        move |source| StoreError::Io {
            action,
            path: self.path.clone(),
            source,
        }
    }
}

impl DataStore for JsonStore {
    fn load(&self) -> Result<WorkLog, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no sheet yet, starting empty");
                return Ok(WorkLog::default());
            }
            Err(e) => return Err(self.io_error("read")(e)),
        };

        if content.trim().is_empty() {
            return Ok(WorkLog::default());
        }

        let log: WorkLog = serde_json::from_str(&content).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), entries = log.entries().len(), "loaded sheet");
        Ok(log)
    }

    fn dump(&self, log: &WorkLog) -> Result<(), StoreError> {
        let dir = self
            .path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir).map_err(self.io_error("create directory for"))?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(self.io_error("create temp file for"))?;
        serde_json::to_writer_pretty(tmp.as_file_mut(), log).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        tmp.write_all(b"\n").map_err(self.io_error("write"))?;
        tmp.as_file().sync_all().map_err(self.io_error("sync"))?;
        tmp.persist(&self.path)
            .map_err(|e| self.io_error("replace")(e.error))?;

        tracing::debug!(path = %self.path.display(), entries = log.entries().len(), "saved sheet");
        Ok(())
    }

    fn location(&self) -> &Path {
        &self.path
    }
}
