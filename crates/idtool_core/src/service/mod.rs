//! Core use cases.
//!
//! # Responsibility
//! - Orchestrate provider and repository calls into generate/list flows.
//! - Depend on the `IdProvider`/`IdRepository` traits only.
//!
//! # Invariants
//! - Storage errors propagate unchanged; nothing here retries.

pub mod generate_ids;
pub mod list_ids;
