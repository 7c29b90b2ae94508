//! Domain model for generated identifiers.
//!
//! # Responsibility
//! - Define the immutable record produced by generation.
//! - Define the closed sets of provider and repository kinds.
//!
//! # Invariants
//! - Record timestamps are always UTC.
//! - Kind names are the values persisted in the `provider` column/field.

pub mod kind;
pub mod record;
