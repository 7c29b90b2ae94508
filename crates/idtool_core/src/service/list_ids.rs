//! Newest-first listing use case.
//!
//! Backends disagree on order (file order vs. ascending timestamp) and on
//! how strictly they apply a limit, so both are re-applied here. A backend
//! that tail-truncates in file order before this re-sort can drop a newer
//! record written out of time order; that limitation is kept as is.

use crate::model::record::{parse_timestamp, IdRecord};
use crate::repo::{IdRepository, RepoResult};
use log::warn;

/// Lists stored records, newest first, at most `limit` of them.
///
/// Records whose timestamp cannot be parsed are dropped.
pub fn list_ids<R>(repo: &R, limit: Option<usize>) -> RepoResult<Vec<IdRecord>>
where
    R: IdRepository + ?Sized,
{
    let raw_records = repo.list(limit)?;

    let mut records: Vec<IdRecord> = raw_records
        .into_iter()
        .filter_map(|raw| match parse_timestamp(&raw.timestamp) {
            Some(timestamp) => Some(IdRecord::new(raw.id, raw.provider, timestamp)),
            None => {
                warn!(
                    "event=record_skipped module=service reason=bad_timestamp value={:?}",
                    raw.timestamp
                );
                None
            }
        })
        .collect();

    records.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
    if let Some(limit) = limit {
        records.truncate(limit);
    }

    Ok(records)
}
