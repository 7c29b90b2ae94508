//! Core of the identifier tool.
//!
//! Pluggable identifier providers, pluggable record repositories, and the
//! two use cases that compose them: generate-and-save and newest-first list.

pub mod config;
pub mod logging;
pub mod model;
pub mod provider;
pub mod registry;
pub mod repo;
pub mod service;

pub use config::StorageConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::kind::{ProviderKind, RepositoryKind, SelectionError};
pub use model::record::{IdRecord, RawIdRecord};
pub use provider::{IdProvider, KsuidProvider, Sha256Provider, UlidProvider, Uuid4Provider};
pub use registry::{make_provider, make_repository};
pub use repo::jsonl_repo::JsonlIdRepository;
pub use repo::sqlite_repo::SqliteIdRepository;
pub use repo::{IdRepository, RepoError, RepoResult};
pub use service::generate_ids::generate_ids;
pub use service::list_ids::list_ids;

/// Returns the core crate version, which `idtool --version` prints.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
