//! Generate-and-persist use case.

use crate::model::record::IdRecord;
use crate::provider::IdProvider;
use crate::repo::{IdRepository, RepoResult};
use chrono::{SubsecRound, Utc};
use log::{error, info};
use std::time::Instant;

/// Generates `count` ids with `provider` and saves each one to `repo`.
///
/// The timestamp is taken here, after generation, so it reflects the save.
/// Returns the records in generation order.
///
/// # Errors
/// - Returns the first `save` failure unchanged. Records saved before the
///   failure stay persisted.
pub fn generate_ids<P, R>(provider: &P, repo: &R, count: usize) -> RepoResult<Vec<IdRecord>>
where
    P: IdProvider + ?Sized,
    R: IdRepository + ?Sized,
{
    let started_at = Instant::now();
    let mut records = Vec::with_capacity(count);

    for _ in 0..count {
        let id = provider.generate_id();
        // Stored text keeps microseconds; match it so saved and returned agree.
        let timestamp = Utc::now().trunc_subsecs(6);
        if let Err(err) = repo.save(&id, provider.name(), timestamp) {
            error!(
                "event=ids_generate module=service status=error provider={} saved={} requested={} error={}",
                provider.name(),
                records.len(),
                count,
                err
            );
            return Err(err);
        }
        records.push(IdRecord::new(id, provider.name(), timestamp));
    }

    info!(
        "event=ids_generate module=service status=ok provider={} count={} location={} duration_ms={}",
        provider.name(),
        records.len(),
        repo.location().display(),
        started_at.elapsed().as_millis()
    );
    Ok(records)
}
