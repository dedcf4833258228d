use proptest::prelude::*;
use tonewalk_core::{RngHandle, StateId, NUM_STATES};
use tonewalk_graph::{build_transition_graph, TransitionGraph};
use tonewalk_seq::{
    generate_labeled_trials, generate_trial_sequences, inject_violations, make_trial_definitions,
    Answer, PitchTable, TrialSet, DEFAULT_PITCHES, TRIAL_LENGTH,
};

fn complete_graph() -> TransitionGraph {
    let edges: Vec<_> = StateId::all()
        .flat_map(|a| StateId::all().map(move |b| (a, b)))
        .collect();
    TransitionGraph::from_edges(&edges)
}

#[test]
fn windows_overlap_on_one_long_walk() {
    let graph = build_transition_graph("random");
    let mut rng = RngHandle::from_seed(77);
    let sequences = generate_trial_sequences(&graph, 20, &mut rng).unwrap();
    assert_eq!(sequences.long_walk.len(), 2 + 4 * 20);
    assert_eq!(sequences.windows.len(), 20);
    for (k, window) in sequences.windows.iter().enumerate() {
        assert_eq!(window.len(), TRIAL_LENGTH);
        assert_eq!(&window[..4], &sequences.long_walk[4 * k..4 * k + 4]);
        assert_eq!(window.as_slice(), &sequences.long_walk[4 * k..4 * k + 6]);
    }
    for pair in sequences.windows.windows(2) {
        assert_eq!(pair[0][4..], pair[1][..2]);
    }
}

proptest! {
    #[test]
    fn labels_match_final_transition(seed in any::<u64>(), trials in 1usize..40) {
        let graph = build_transition_graph("random");
        let mut rng = RngHandle::from_seed(seed);
        let labeled = generate_labeled_trials(&graph, trials, &mut rng).unwrap();
        prop_assert_eq!(labeled.windows.len(), trials);
        prop_assert_eq!(labeled.answers.len(), trials);
        for (window, answer) in labeled.windows.iter().zip(&labeled.answers) {
            prop_assert_eq!(window.len(), TRIAL_LENGTH);
            for pair in window[..TRIAL_LENGTH - 1].windows(2) {
                prop_assert!(graph.is_edge(pair[0], pair[1]));
            }
            let last_is_edge = graph.is_edge(window[4], window[5]);
            match answer {
                Answer::Regular => prop_assert!(last_is_edge),
                Answer::Irregular => prop_assert!(!last_is_edge),
            }
        }
    }
}

#[test]
fn regular_windows_are_left_untouched() {
    let graph = build_transition_graph("random");
    let mut rng = RngHandle::from_seed(4);
    let sequences = generate_trial_sequences(&graph, 32, &mut rng).unwrap();
    let original = sequences.windows.clone();
    let labeled = inject_violations(sequences.windows, &graph, &mut rng).unwrap();
    for ((before, after), answer) in original.iter().zip(&labeled.windows).zip(&labeled.answers) {
        assert_eq!(before[..5], after[..5]);
        if *answer == Answer::Regular {
            assert_eq!(before, after);
        }
    }
}

#[test]
fn both_labels_occur_over_many_trials() {
    let graph = build_transition_graph("random");
    let mut rng = RngHandle::from_seed(99);
    let labeled = generate_labeled_trials(&graph, 200, &mut rng).unwrap();
    let irregular = labeled
        .answers
        .iter()
        .filter(|a| **a == Answer::Irregular)
        .count();
    assert!(irregular > 50 && irregular < 150, "irregular = {irregular}");
}

#[test]
fn fully_connected_context_cannot_be_violated() {
    let graph = complete_graph();
    let mut rng = RngHandle::from_seed(12);
    let sequences = generate_trial_sequences(&graph, 64, &mut rng).unwrap();
    let err = inject_violations(sequences.windows, &graph, &mut rng).unwrap_err();
    assert!(err.is_empty_neighbor_set());
    assert_eq!(
        err.info().context.get("operation").map(String::as_str),
        Some("inject-violations")
    );
}

#[test]
fn trial_definitions_map_states_through_the_pitch_table() {
    let graph = build_transition_graph("random");
    let mut rng = RngHandle::from_seed(31);
    let table = PitchTable::shuffled(&DEFAULT_PITCHES, &mut rng).unwrap();
    let trials = make_trial_definitions(&graph, &table, 20, &mut rng).unwrap();
    assert_eq!(trials.len(), 20);
    for (index, trial) in trials.iter().enumerate() {
        assert_eq!(trial.trial_number, index);
        assert_eq!(trial.notes, table.map_states_to_pitches(&trial.states));
        assert!(trial.states.iter().all(|s| s.index() < NUM_STATES));
    }
}

#[test]
fn trial_set_summaries_follow_the_labels() {
    let graph = build_transition_graph("random");
    let mut rng = RngHandle::from_seed(47);
    let table = PitchTable::shuffled(&DEFAULT_PITCHES, &mut rng).unwrap();
    let trials = make_trial_definitions(&graph, &table, 30, &mut rng).unwrap();
    let expected: Vec<Answer> = trials.iter().map(|trial| trial.answer).collect();
    let set = TrialSet { block: 0, trials };
    assert_eq!(set.answers(), expected);
    assert_eq!(
        set.irregular_count(),
        expected.iter().filter(|a| **a == Answer::Irregular).count()
    );
    assert!(set.irregular_count() <= set.len());
}
