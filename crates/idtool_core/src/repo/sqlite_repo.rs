//! Single-table SQLite repository.
//!
//! # Invariants
//! - Schema: `ids(id TEXT PRIMARY KEY, provider TEXT NOT NULL, timestamp TEXT NOT NULL)`,
//!   created idempotently on open; existing rows are never touched.
//! - An existing `ids` table lacking a required column is rejected on open.
//! - Every `save` is its own committed transaction.
//! - Duplicate ids surface as `RepoError::DuplicateId`, never silently.
//! - `list` is ascending by timestamp text; a limit keeps the newest rows
//!   and is applied in SQL.

use super::{ensure_parent_dir, IdRepository, RepoError, RepoResult};
use crate::model::record::{format_timestamp, RawIdRecord};
use chrono::{DateTime, Utc};
use log::{debug, error, info};
use rusqlite::{params, Connection, ErrorCode, Row};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const SCHEMA_SQL: &str = "CREATE TABLE IF NOT EXISTS ids (
    id TEXT PRIMARY KEY,
    provider TEXT NOT NULL,
    timestamp TEXT NOT NULL
);";
const REQUIRED_COLUMNS: [&str; 3] = ["id", "provider", "timestamp"];
// LIMIT picks the newest `?1` rows (DESC) so a limited list holds the most
// recent records; a plain `ORDER BY timestamp LIMIT n` would keep the oldest.
// Rows still come back oldest first.
const ID_SELECT_SQL: &str = "SELECT id, provider, timestamp FROM (
    SELECT id, provider, timestamp FROM ids ORDER BY timestamp DESC LIMIT ?1
) ORDER BY timestamp;";
const IN_MEMORY_LOCATION: &str = ":memory:";

/// Relational repository owning one SQLite connection.
pub struct SqliteIdRepository {
    conn: Connection,
    path: PathBuf,
}

impl SqliteIdRepository {
    /// Opens (or creates) the database file and ensures the schema.
    pub fn open(path: impl Into<PathBuf>) -> RepoResult<Self> {
        let path = path.into();
        ensure_parent_dir(&path)?;
        let conn = connect("file", || Connection::open(&path))?;
        Ok(Self { conn, path })
    }

    /// Opens a private in-memory database with the schema applied.
    pub fn open_in_memory() -> RepoResult<Self> {
        Ok(Self {
            conn: connect("memory", Connection::open_in_memory)?,
            path: PathBuf::from(IN_MEMORY_LOCATION),
        })
    }
}

impl IdRepository for SqliteIdRepository {
    fn save(&self, id: &str, provider: &str, timestamp: DateTime<Utc>) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        match tx.execute(
            "INSERT INTO ids (id, provider, timestamp) VALUES (?1, ?2, ?3);",
            params![id, provider, format_timestamp(timestamp)],
        ) {
            Ok(_) => {}
            Err(err) if is_primary_key_violation(&err) => {
                return Err(RepoError::DuplicateId(id.to_string()));
            }
            Err(err) => return Err(err.into()),
        }
        tx.commit()?;

        debug!("event=id_save module=repo status=ok backend=sqlite provider={provider} id={id}");
        Ok(())
    }

    fn list(&self, limit: Option<usize>) -> RepoResult<Vec<RawIdRecord>> {
        // SQLite treats a negative LIMIT as unbounded.
        let sql_limit = limit.map_or(-1, |limit| i64::try_from(limit).unwrap_or(i64::MAX));
        let mut stmt = self.conn.prepare(ID_SELECT_SQL)?;
        let mut rows = stmt.query([sql_limit])?;

        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(parse_id_row(row)?);
        }

        info!(
            "event=id_list module=repo status=ok backend=sqlite returned={}",
            records.len()
        );
        Ok(records)
    }

    fn location(&self) -> &Path {
        &self.path
    }
}

fn connect(
    mode: &str,
    open: impl FnOnce() -> rusqlite::Result<Connection>,
) -> RepoResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=repo status=start backend=sqlite mode={mode}");

    let result = open()
        .map_err(RepoError::from)
        .and_then(|conn| ensure_schema(&conn).map(|()| conn));
    match &result {
        Ok(_) => info!(
            "event=db_open module=repo status=ok backend=sqlite mode={mode} duration_ms={}",
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=db_open module=repo status=error backend=sqlite mode={mode} duration_ms={} error={}",
            started_at.elapsed().as_millis(),
            err
        ),
    }
    result
}

fn ensure_schema(conn: &Connection) -> RepoResult<()> {
    conn.busy_timeout(Duration::from_secs(5))?;
    conn.execute_batch(SCHEMA_SQL)?;

    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('ids');")?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .into_iter()
        .filter(|required| !columns.iter().any(|column| column == required))
        .collect();
    if !missing.is_empty() {
        return Err(RepoError::IncompatibleSchema(format!(
            "missing column(s) {}",
            missing.join(", ")
        )));
    }
    Ok(())
}

fn parse_id_row(row: &Row<'_>) -> rusqlite::Result<RawIdRecord> {
    Ok(RawIdRecord {
        id: row.get("id")?,
        provider: row.get("provider")?,
        timestamp: row.get("timestamp")?,
    })
}

fn is_primary_key_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(failure, _) => {
            failure.code == ErrorCode::ConstraintViolation
                && failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
        }
        _ => false,
    }
}
