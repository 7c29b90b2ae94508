//! Provider and repository kind enumerations.
//!
//! Adding a generation algorithm means adding a `ProviderKind` variant, its
//! name here, and its arm in `registry::make_provider`.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Identifier generation algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// Random UUID, version 4.
    Uuid4,
    /// K-sortable unique identifier.
    Ksuid,
    /// Hex SHA-256 digest of fresh random bytes.
    Sha256,
    /// Universally unique lexicographically sortable identifier.
    Ulid,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 4] = [Self::Uuid4, Self::Ksuid, Self::Sha256, Self::Ulid];

    /// Canonical name, also persisted as the record's `provider`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Uuid4 => "uuid4",
            Self::Ksuid => "ksuid",
            Self::Sha256 => "sha256",
            Self::Ulid => "ulid",
        }
    }
}

/// Persistence backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryKind {
    /// Append-only newline-delimited JSON file.
    Jsonl,
    /// Single-table SQLite database.
    Sqlite,
}

impl RepositoryKind {
    pub const ALL: [RepositoryKind; 2] = [Self::Jsonl, Self::Sqlite];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Jsonl => "jsonl",
            Self::Sqlite => "sqlite",
        }
    }
}

/// Unknown kind name requested at the composition boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    UnknownProvider(String),
    UnknownRepository(String),
}

impl Display for SelectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownProvider(value) => write!(
                f,
                "unknown provider `{value}`; expected one of {}",
                names(ProviderKind::ALL.iter().map(|kind| kind.as_str()))
            ),
            Self::UnknownRepository(value) => write!(
                f,
                "unknown repository `{value}`; expected one of {}",
                names(RepositoryKind::ALL.iter().map(|kind| kind.as_str()))
            ),
        }
    }
}

impl Error for SelectionError {}

impl Display for ProviderKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for RepositoryKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = SelectionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| SelectionError::UnknownProvider(value.to_string()))
    }
}

impl FromStr for RepositoryKind {
    type Err = SelectionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| SelectionError::UnknownRepository(value.to_string()))
    }
}

fn names<'a>(values: impl Iterator<Item = &'a str>) -> String {
    values.collect::<Vec<_>>().join("|")
}
