use sha2::{Digest, Sha256};

use crate::matrix::TransitionGraph;
use crate::GRAPH_SCHEMA;

/// Computes the canonical structural hash of a transition graph.
///
/// The hash covers the schema version and every matrix entry in row-major
/// order, so two graphs hash equal exactly when their edge sets match.
pub fn canonical_hash(graph: &TransitionGraph) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"tonewalk-graph");
    hasher.update(GRAPH_SCHEMA.major.to_le_bytes());
    hasher.update(GRAPH_SCHEMA.minor.to_le_bytes());
    hasher.update(GRAPH_SCHEMA.patch.to_le_bytes());
    let matrix = graph.matrix();
    hasher.update((matrix.len() as u64).to_le_bytes());
    for row in matrix.iter() {
        hasher.update(row);
    }
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_transition_graph;

    #[test]
    fn hash_distinguishes_presets() {
        let random = canonical_hash(&build_transition_graph("random"));
        let empty = canonical_hash(&build_transition_graph("missing"));
        assert_eq!(random.len(), 64);
        assert_ne!(random, empty);
        assert_eq!(random, canonical_hash(&build_transition_graph("random")));
    }
}
