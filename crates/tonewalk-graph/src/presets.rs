use std::fmt;

use tonewalk_core::NUM_STATES;

use crate::matrix::TransitionGraph;

/// Named transition graph presets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphPreset {
    /// Hand-specified 16-state graph used by the main experiment.
    Random,
    /// Any unrecognised name. Builds a graph with no edges.
    Unknown(String),
}

impl GraphPreset {
    /// Parses a preset name. Never fails; unknown names are kept verbatim.
    pub fn from_name(name: &str) -> Self {
        match name {
            "random" => GraphPreset::Random,
            other => GraphPreset::Unknown(other.to_string()),
        }
    }

    /// Returns the preset name.
    pub fn name(&self) -> &str {
        match self {
            GraphPreset::Random => "random",
            GraphPreset::Unknown(name) => name,
        }
    }
}

impl fmt::Display for GraphPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Column-wise assignment: every listed row `r` gets `matrix[r][col] = 1`.
const RANDOM_COLUMNS: [&[usize]; NUM_STATES] = [
    &[1, 2, 4, 5],
    &[0, 5, 6, 7, 10],
    &[0, 3, 9, 11],
    &[2, 7, 11],
    &[0, 8, 9],
    &[0, 1, 9, 12],
    &[1, 10, 12],
    &[1, 3, 10, 11],
    &[4, 12],
    &[2, 4, 5, 10, 14, 15],
    &[1, 6, 7, 9, 14, 15],
    &[2, 3, 7, 13],
    &[5, 6, 8, 13, 14, 15],
    &[11, 12, 15],
    &[9, 10, 12],
    &[9, 10, 12, 13],
];

/// Builds the transition graph for a named preset.
///
/// Only `"random"` is defined. Any other name silently yields a graph with
/// no edges; the first walk or violation sampled from it then fails with an
/// empty-neighbor-set error. Callers are responsible for passing a
/// recognised preset.
pub fn build_transition_graph(preset_name: &str) -> TransitionGraph {
    match GraphPreset::from_name(preset_name) {
        GraphPreset::Random => {
            let mut matrix = [[0u8; NUM_STATES]; NUM_STATES];
            for (col, rows) in RANDOM_COLUMNS.iter().enumerate() {
                for row in rows.iter() {
                    matrix[*row][col] = 1;
                }
            }
            tracing::debug!(preset = preset_name, "built transition graph");
            TransitionGraph::from_binary(matrix)
        }
        GraphPreset::Unknown(name) => {
            tracing::warn!(
                preset = %name,
                "unknown transition graph preset; graph has no edges and sampling will fail"
            );
            TransitionGraph::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_names_round_trip() {
        assert_eq!(GraphPreset::from_name("random"), GraphPreset::Random);
        let unknown = GraphPreset::from_name("lattice");
        assert_eq!(unknown, GraphPreset::Unknown("lattice".into()));
        assert_eq!(unknown.to_string(), "lattice");
    }
}
