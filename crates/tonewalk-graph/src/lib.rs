#![deny(missing_docs)]

//! Fixed 16-state transition graphs defining which tone transitions are regular.

mod hash;
mod matrix;
mod presets;
mod serialization;

pub use hash::canonical_hash;
pub use matrix::{AdjacencyMatrix, TransitionGraph};
pub use presets::{build_transition_graph, GraphPreset};
pub use serialization::{graph_from_bytes, graph_from_json, graph_to_bytes, graph_to_json};

/// Schema version stamped on serialized graphs.
pub const GRAPH_SCHEMA: tonewalk_core::SchemaVersion = tonewalk_core::SchemaVersion::new(1, 0, 0);
