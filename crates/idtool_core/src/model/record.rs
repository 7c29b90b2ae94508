//! Identifier record model and timestamp text form.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// One generated identifier together with its origin and generation time.
///
/// Fields are read through getters only; a record never changes after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdRecord {
    id: String,
    provider: String,
    timestamp: DateTime<Utc>,
}

impl IdRecord {
    pub fn new(
        id: impl Into<String>,
        provider: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            provider: provider.into(),
            timestamp,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// A record as read back from storage, before its timestamp is parsed.
///
/// Missing fields decode to empty strings so that one odd line does not
/// decide whether the rest of a read succeeds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawIdRecord {
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub provider: String,
}

impl RawIdRecord {
    pub fn new(id: &str, provider: &str, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp: format_timestamp(timestamp),
            id: id.to_string(),
            provider: provider.to_string(),
        }
    }
}

/// Renders a timestamp as ISO-8601 with microseconds and a `+00:00` offset.
///
/// Fixed precision keeps lexicographic order equal to chronological order.
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// Parses any RFC 3339 timestamp and normalizes it to UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}
