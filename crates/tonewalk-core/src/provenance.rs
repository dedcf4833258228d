//! Provenance and schema descriptors attached to generated documents.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Semantic version describing the schema of serialized payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Major version incremented for breaking changes.
    pub major: u32,
    /// Minor version incremented for additive changes.
    pub minor: u32,
    /// Patch version incremented for fixes.
    pub patch: u32,
}

impl SchemaVersion {
    /// Creates a new schema version descriptor.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::new(1, 0, 0)
    }
}

/// Provenance recorded alongside every generated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RunProvenance {
    /// Name of the transition graph preset requested by the configuration.
    pub preset: String,
    /// Canonical hash of the transition graph used for generation.
    pub graph_hash: String,
    /// Master seed used for all randomness.
    pub seed: u64,
    /// RFC 3339 timestamp recording when the document was generated.
    pub created_at: String,
    /// Version map for the tools involved in the run.
    pub tool_versions: BTreeMap<String, String>,
}
