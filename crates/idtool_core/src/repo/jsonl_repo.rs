//! Append-only newline-delimited JSON repository.
//!
//! # Invariants
//! - One JSON object per line: `{"timestamp":..,"id":..,"provider":..}`.
//! - Unparseable lines (bad JSON, invalid UTF-8, torn writes) are skipped on
//!   read; they never fail a `list`.
//! - `list(Some(n))` keeps the last `n` parsed lines in file order.

use super::{ensure_parent_dir, IdRepository, RepoError, RepoResult};
use crate::model::record::RawIdRecord;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Log-file backed repository.
#[derive(Debug, Clone)]
pub struct JsonlIdRepository {
    path: PathBuf,
}

impl JsonlIdRepository {
    /// Creates the repository, creating the parent directory when absent.
    pub fn new(path: impl Into<PathBuf>) -> RepoResult<Self> {
        let path = path.into();
        ensure_parent_dir(&path)?;
        Ok(Self { path })
    }
}

impl IdRepository for JsonlIdRepository {
    fn save(&self, id: &str, provider: &str, timestamp: DateTime<Utc>) -> RepoResult<()> {
        let mut line = serde_json::to_string(&RawIdRecord::new(id, provider, timestamp))?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|err| RepoError::io(&self.path, err))?;
        // Single write per line; append mode keeps concurrent appenders line-atomic.
        file.write_all(line.as_bytes())
            .and_then(|()| file.sync_data())
            .map_err(|err| RepoError::io(&self.path, err))?;

        debug!("event=id_save module=repo status=ok backend=jsonl provider={provider} id={id}");
        Ok(())
    }

    fn list(&self, limit: Option<usize>) -> RepoResult<Vec<RawIdRecord>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(RepoError::io(&self.path, err)),
        };

        let mut records = Vec::new();
        let mut skipped = 0usize;
        // Raw bytes: a line that is not UTF-8 is a bad record, not a read failure.
        for (index, line) in BufReader::new(file).split(b'\n').enumerate() {
            let line = line.map_err(|err| RepoError::io(&self.path, err))?;
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }
            match serde_json::from_slice::<RawIdRecord>(&line) {
                Ok(record) => records.push(record),
                Err(err) => {
                    skipped += 1;
                    warn!(
                        "event=record_skipped module=repo backend=jsonl line={} error={}",
                        index + 1,
                        err
                    );
                }
            }
        }

        if let Some(limit) = limit {
            let start = records.len().saturating_sub(limit);
            records.drain(..start);
        }

        info!(
            "event=id_list module=repo status=ok backend=jsonl returned={} skipped={}",
            records.len(),
            skipped
        );
        Ok(records)
    }

    fn location(&self) -> &Path {
        &self.path
    }
}
