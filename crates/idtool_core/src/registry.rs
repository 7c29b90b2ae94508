//! Kind-to-instance selection.
//!
//! The only place that names concrete providers and repositories; everything
//! above it works through `IdProvider` and `IdRepository`.

use crate::config::StorageConfig;
use crate::model::kind::{ProviderKind, RepositoryKind};
use crate::provider::{IdProvider, KsuidProvider, Sha256Provider, UlidProvider, Uuid4Provider};
use crate::repo::jsonl_repo::JsonlIdRepository;
use crate::repo::sqlite_repo::SqliteIdRepository;
use crate::repo::{IdRepository, RepoResult};

/// Returns the provider implementing `kind`.
pub fn make_provider(kind: ProviderKind) -> Box<dyn IdProvider> {
    match kind {
        ProviderKind::Uuid4 => Box::new(Uuid4Provider),
        ProviderKind::Ksuid => Box::new(KsuidProvider),
        ProviderKind::Sha256 => Box::new(Sha256Provider),
        ProviderKind::Ulid => Box::new(UlidProvider),
    }
}

/// Opens the repository implementing `kind` at the path `config` assigns it.
///
/// # Errors
/// - Returns a storage error when the backing file or its directory cannot
///   be prepared.
pub fn make_repository(
    kind: RepositoryKind,
    config: &StorageConfig,
) -> RepoResult<Box<dyn IdRepository>> {
    let path = config.path_for(kind).to_path_buf();
    Ok(match kind {
        RepositoryKind::Jsonl => Box::new(JsonlIdRepository::new(path)?),
        RepositoryKind::Sqlite => Box::new(SqliteIdRepository::open(path)?),
    })
}
