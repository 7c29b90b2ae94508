//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the append/list contract shared by every backend.
//! - Keep file and SQL details out of the use-case layer.
//!
//! # Invariants
//! - `save` returns only after the record is durable on the medium.
//! - Records are never updated or deleted once written.
//! - Backends may differ in native order and in how exactly they honor a
//!   limit; callers must not rely on either.

use crate::model::record::RawIdRecord;
use chrono::{DateTime, Utc};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};

pub mod jsonl_repo;
pub mod sqlite_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage failure raised by any repository backend.
#[derive(Debug)]
pub enum RepoError {
    Io { path: PathBuf, source: io::Error },
    Sqlite(rusqlite::Error),
    DuplicateId(String),
    IncompatibleSchema(String),
    Encode(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::DuplicateId(id) => write!(f, "id already stored: {id}"),
            Self::IncompatibleSchema(message) => write!(f, "incompatible ids table: {message}"),
            Self::Encode(err) => write!(f, "failed to encode record: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Sqlite(err) => Some(err),
            Self::DuplicateId(_) | Self::IncompatibleSchema(_) => None,
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

impl RepoError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Durable store for identifier records.
pub trait IdRepository {
    /// Appends one record.
    fn save(&self, id: &str, provider: &str, timestamp: DateTime<Utc>) -> RepoResult<()>;

    /// Returns stored records in the backend's natural order.
    ///
    /// `limit` is a hint; the returned length may exceed it.
    fn list(&self, limit: Option<usize>) -> RepoResult<Vec<RawIdRecord>>;

    /// Backing file of this store.
    fn location(&self) -> &Path;
}

impl<R: IdRepository + ?Sized> IdRepository for Box<R> {
    fn save(&self, id: &str, provider: &str, timestamp: DateTime<Utc>) -> RepoResult<()> {
        (**self).save(id, provider, timestamp)
    }

    fn list(&self, limit: Option<usize>) -> RepoResult<Vec<RawIdRecord>> {
        (**self).list(limit)
    }

    fn location(&self) -> &Path {
        (**self).location()
    }
}

pub(crate) fn ensure_parent_dir(path: &Path) -> RepoResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|err| RepoError::io(parent, err))
        }
        _ => Ok(()),
    }
}
