//! Storage path configuration.
//!
//! Resolution order for each backend path:
//! 1. `IDTOOL_JSONL_PATH` / `IDTOOL_SQLITE_PATH`.
//! 2. `<data_dir>/ids.jsonl` / `<data_dir>/ids.db`, where `data_dir` is
//!    `IDTOOL_DATA_DIR`, else the OS data directory, else `./data`.

use crate::model::kind::RepositoryKind;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub const JSONL_PATH_ENV: &str = "IDTOOL_JSONL_PATH";
pub const SQLITE_PATH_ENV: &str = "IDTOOL_SQLITE_PATH";
pub const DATA_DIR_ENV: &str = "IDTOOL_DATA_DIR";

const JSONL_FILE_NAME: &str = "ids.jsonl";
const SQLITE_FILE_NAME: &str = "ids.db";
const LOG_DIR_NAME: &str = "logs";
const FALLBACK_DATA_DIR: &str = "data";

/// Where each repository backend keeps its file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub jsonl_path: PathBuf,
    pub sqlite_path: PathBuf,
}

impl StorageConfig {
    /// Places every store directly under `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            data_dir: dir.to_path_buf(),
            jsonl_path: dir.join(JSONL_FILE_NAME),
            sqlite_path: dir.join(SQLITE_FILE_NAME),
        }
    }

    /// Resolves paths from the process environment.
    pub fn from_env() -> Self {
        Self::resolve(|key| std::env::var_os(key).map(PathBuf::from))
    }

    fn resolve(lookup: impl Fn(&str) -> Option<PathBuf>) -> Self {
        let data_dir = lookup(DATA_DIR_ENV)
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(default_data_dir);
        let mut config = Self::in_dir(data_dir);
        if let Some(path) = lookup(JSONL_PATH_ENV).filter(|p| !p.as_os_str().is_empty()) {
            config.jsonl_path = path;
        }
        if let Some(path) = lookup(SQLITE_PATH_ENV).filter(|p| !p.as_os_str().is_empty()) {
            config.sqlite_path = path;
        }
        config
    }

    pub fn path_for(&self, kind: RepositoryKind) -> &Path {
        match kind {
            RepositoryKind::Jsonl => &self.jsonl_path,
            RepositoryKind::Sqlite => &self.sqlite_path,
        }
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join(LOG_DIR_NAME)
    }
}

fn default_data_dir() -> PathBuf {
    ProjectDirs::from("", "", "idtool")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(FALLBACK_DATA_DIR))
}
