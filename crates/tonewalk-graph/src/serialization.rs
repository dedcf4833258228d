use serde::{Deserialize, Serialize};
use tonewalk_core::errors::{ErrorInfo, TwError};
use tonewalk_core::{SchemaVersion, StateId};

use crate::matrix::TransitionGraph;
use crate::GRAPH_SCHEMA;

/// Serializes the graph to a compact binary representation using `bincode`.
pub fn graph_to_bytes(graph: &TransitionGraph) -> Result<Vec<u8>, TwError> {
    let serializable = SerializableGraph::from_graph(graph);
    bincode::serialize(&serializable)
        .map_err(|err| TwError::Serde(ErrorInfo::new("serialize-bytes", err.to_string())))
}

/// Restores a graph from its binary representation.
pub fn graph_from_bytes(bytes: &[u8]) -> Result<TransitionGraph, TwError> {
    let serializable: SerializableGraph = bincode::deserialize(bytes)
        .map_err(|err| TwError::Serde(ErrorInfo::new("deserialize-bytes", err.to_string())))?;
    serializable.into_graph()
}

/// Serializes the graph to a JSON edge list.
pub fn graph_to_json(graph: &TransitionGraph) -> Result<String, TwError> {
    let serializable = SerializableGraph::from_graph(graph);
    serde_json::to_string_pretty(&serializable)
        .map_err(|err| TwError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
}

/// Restores a graph from a JSON edge list.
pub fn graph_from_json(json: &str) -> Result<TransitionGraph, TwError> {
    let serializable: SerializableGraph = serde_json::from_str(json)
        .map_err(|err| TwError::Serde(ErrorInfo::new("deserialize-json", err.to_string())))?;
    serializable.into_graph()
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableGraph {
    schema_version: SchemaVersion,
    edges: Vec<(StateId, StateId)>,
}

impl SerializableGraph {
    fn from_graph(graph: &TransitionGraph) -> Self {
        Self {
            schema_version: GRAPH_SCHEMA,
            edges: graph.edges(),
        }
    }

    fn into_graph(self) -> Result<TransitionGraph, TwError> {
        if self.schema_version.major != GRAPH_SCHEMA.major {
            return Err(TwError::Serde(
                ErrorInfo::new("schema-mismatch", "unsupported graph schema version")
                    .with_context("found", format!("{:?}", self.schema_version))
                    .with_context("expected", format!("{GRAPH_SCHEMA:?}")),
            ));
        }
        Ok(TransitionGraph::from_edges(&self.edges))
    }
}
