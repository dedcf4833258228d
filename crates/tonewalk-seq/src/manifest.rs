use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tonewalk_core::errors::ErrorInfo;
use tonewalk_core::{RunProvenance, TwError};
use tonewalk_graph::canonical_hash;

use crate::config::ExperimentConfig;
use crate::pitch::PitchTable;
use crate::session::ExperimentSession;

/// Record of how a session's stimuli were generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionManifest {
    /// Configuration used for the session.
    pub config: ExperimentConfig,
    /// Master seed all substreams derive from.
    pub master_seed: u64,
    /// Optional seed label captured from the configuration.
    pub seed_label: Option<String>,
    /// Canonical hash of the transition graph.
    pub graph_hash: String,
    /// Shuffled pitch table, in state order.
    pub pitch_table: PitchTable,
    /// Provenance block.
    pub provenance: RunProvenance,
}

impl SessionManifest {
    /// Captures the manifest for `session`, timestamped now.
    pub fn from_session(session: &ExperimentSession) -> Self {
        let config = session.config().clone();
        let graph_hash = canonical_hash(session.graph());
        let mut tool_versions = BTreeMap::new();
        tool_versions.insert(
            env!("CARGO_PKG_NAME").to_string(),
            env!("CARGO_PKG_VERSION").to_string(),
        );
        let provenance = RunProvenance {
            preset: config.preset.clone(),
            graph_hash: graph_hash.clone(),
            seed: config.seed_policy.master_seed,
            created_at: chrono::Utc::now().to_rfc3339(),
            tool_versions,
        };
        Self {
            master_seed: config.seed_policy.master_seed,
            seed_label: config.seed_policy.label.clone(),
            graph_hash,
            pitch_table: *session.pitch_table(),
            provenance,
            config,
        }
    }

    /// Writes the manifest to a JSON file.
    pub fn write(&self, path: &Path) -> Result<(), TwError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| {
                TwError::Serde(
                    ErrorInfo::new("manifest-mkdir", err.to_string())
                        .with_context("path", parent.display().to_string()),
                )
            })?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|err| {
            TwError::Serde(
                ErrorInfo::new("manifest-serialize", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        fs::write(path, json).map_err(|err| {
            TwError::Serde(
                ErrorInfo::new("manifest-write", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })
    }

    /// Loads a manifest from disk.
    pub fn load(path: &Path) -> Result<Self, TwError> {
        let contents = fs::read_to_string(path).map_err(|err| {
            TwError::Serde(
                ErrorInfo::new("manifest-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        serde_json::from_str(&contents).map_err(|err| {
            TwError::Serde(
                ErrorInfo::new("manifest-parse", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })
    }
}
