use tonewalk_core::errors::{ErrorInfo, TwError};
use tonewalk_core::{StateId, NUM_STATES};

/// Raw binary adjacency matrix, indexed `[from][to]`.
pub type AdjacencyMatrix = [[u8; NUM_STATES]; NUM_STATES];

/// Directed transition graph over the 16 tone states.
///
/// Entry `(i, j) == 1` means state `j` may follow state `i` in a regular walk.
/// Row `i` therefore lists the outgoing neighbours of `i`. The matrix is never
/// mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionGraph {
    matrix: AdjacencyMatrix,
}

impl TransitionGraph {
    /// Returns a graph with no edges.
    pub fn empty() -> Self {
        Self {
            matrix: [[0; NUM_STATES]; NUM_STATES],
        }
    }

    /// Builds a graph from a raw matrix, rejecting entries other than 0 or 1.
    pub fn from_matrix(matrix: AdjacencyMatrix) -> Result<Self, TwError> {
        for (row, values) in matrix.iter().enumerate() {
            for (col, value) in values.iter().enumerate() {
                if *value > 1 {
                    return Err(TwError::Graph(
                        ErrorInfo::new("non-binary-entry", "adjacency entries must be 0 or 1")
                            .with_context("row", row.to_string())
                            .with_context("col", col.to_string())
                            .with_context("value", value.to_string()),
                    ));
                }
            }
        }
        Ok(Self { matrix })
    }

    // Caller guarantees every entry is 0 or 1.
    pub(crate) fn from_binary(matrix: AdjacencyMatrix) -> Self {
        Self { matrix }
    }

    /// Builds a graph from directed `(from, to)` pairs. Duplicates are ignored.
    pub fn from_edges(edges: &[(StateId, StateId)]) -> Self {
        let mut matrix = [[0; NUM_STATES]; NUM_STATES];
        for (from, to) in edges {
            matrix[from.index()][to.index()] = 1;
        }
        Self { matrix }
    }

    /// Returns the raw adjacency matrix.
    pub fn matrix(&self) -> &AdjacencyMatrix {
        &self.matrix
    }

    /// Returns `true` when `to` may directly follow `from`.
    pub fn is_edge(&self, from: StateId, to: StateId) -> bool {
        self.matrix[from.index()][to.index()] == 1
    }

    /// Outgoing neighbours of `state` in ascending order.
    pub fn neighbors(&self, state: StateId) -> Vec<StateId> {
        StateId::all().filter(|to| self.is_edge(state, *to)).collect()
    }

    /// States that may not directly follow `state`, in ascending order.
    ///
    /// Includes `state` itself unless the graph has a self loop there.
    pub fn non_neighbors(&self, state: StateId) -> Vec<StateId> {
        StateId::all().filter(|to| !self.is_edge(state, *to)).collect()
    }

    /// Number of outgoing edges of `state`.
    pub fn out_degree(&self, state: StateId) -> usize {
        self.matrix[state.index()].iter().filter(|v| **v == 1).count()
    }

    /// Total number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.matrix.iter().flatten().filter(|v| **v == 1).count()
    }

    /// Directed edges in row-major order.
    pub fn edges(&self) -> Vec<(StateId, StateId)> {
        StateId::all()
            .flat_map(|from| self.neighbors(from).into_iter().map(move |to| (from, to)))
            .collect()
    }

    /// Returns `true` if some state has no outgoing edge, so a walk could stall there.
    pub fn has_isolated_states(&self) -> bool {
        StateId::all().any(|state| self.out_degree(state) == 0)
    }

    /// Returns `true` when every edge `(i, j)` is matched by `(j, i)`.
    pub fn is_symmetric(&self) -> bool {
        (0..NUM_STATES).all(|i| (0..NUM_STATES).all(|j| self.matrix[i][j] == self.matrix[j][i]))
    }
}

impl Default for TransitionGraph {
    fn default() -> Self {
        Self::empty()
    }
}
