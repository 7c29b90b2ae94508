//! Identifier generation algorithms.
//!
//! # Responsibility
//! - Produce fresh identifier strings, one per call.
//! - Expose a stable name that is persisted with every record.
//!
//! # Invariants
//! - Providers hold no state and never fail once entropy is available.
//! - `name()` equals the matching `ProviderKind::as_str()`.

mod ksuid;
mod sha256;
mod ulid;
mod uuid4;

pub use self::ksuid::{decode_ksuid_timestamp, KsuidProvider, KSUID_EPOCH_SECS, KSUID_LEN};
pub use self::sha256::Sha256Provider;
pub use self::ulid::UlidProvider;
pub use self::uuid4::Uuid4Provider;

/// A pluggable identifier generation algorithm.
pub trait IdProvider {
    /// Canonical algorithm name stored alongside every generated id.
    fn name(&self) -> &'static str;

    /// Produces a new identifier.
    fn generate_id(&self) -> String;
}
