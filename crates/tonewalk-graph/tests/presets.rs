use std::collections::BTreeSet;

use tonewalk_core::{StateId, NUM_STATES};
use tonewalk_graph::{build_transition_graph, TransitionGraph};

fn s(index: usize) -> StateId {
    StateId::new(index).unwrap()
}

fn neighbor_set(graph: &TransitionGraph, state: usize) -> BTreeSet<usize> {
    graph.neighbors(s(state)).into_iter().map(|n| n.index()).collect()
}

#[test]
fn random_preset_reaches_every_state() {
    let graph = build_transition_graph("random");
    for state in StateId::all() {
        assert!(graph.out_degree(state) >= 1, "state {state} has no successor");
    }
    assert!(!graph.has_isolated_states());
}

#[test]
fn random_preset_matches_documented_edges() {
    let graph = build_transition_graph("random");
    assert_eq!(neighbor_set(&graph, 0), BTreeSet::from([1, 2, 4, 5]));
    assert_eq!(neighbor_set(&graph, 8), BTreeSet::from([4, 12]));
    assert_eq!(neighbor_set(&graph, 9), BTreeSet::from([2, 4, 5, 10, 14, 15]));
    assert_eq!(neighbor_set(&graph, 13), BTreeSet::from([11, 12, 15]));
    assert_eq!(graph.edge_count(), 64);
    assert!(graph.is_symmetric());
}

#[test]
fn random_preset_has_no_self_loops_and_always_admits_violations() {
    let graph = build_transition_graph("random");
    for state in StateId::all() {
        assert!(!graph.is_edge(state, state));
        let non = graph.non_neighbors(state);
        assert!(!non.is_empty());
        assert_eq!(non.len() + graph.out_degree(state), NUM_STATES);
    }
}

#[test]
fn unknown_preset_yields_all_zero_matrix() {
    let graph = build_transition_graph("small-world");
    assert_eq!(graph.edge_count(), 0);
    assert!(graph.matrix().iter().flatten().all(|v| *v == 0));
    assert_eq!(graph, TransitionGraph::empty());
    for state in StateId::all() {
        assert!(graph.neighbors(state).is_empty());
    }
}

#[test]
fn preset_names_are_case_sensitive() {
    let graph = build_transition_graph("Random");
    assert_eq!(graph.edge_count(), 0);
}
