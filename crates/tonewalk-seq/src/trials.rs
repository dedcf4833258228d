use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tonewalk_core::errors::ErrorInfo;
use tonewalk_core::{RngHandle, StateId, TwError};
use tonewalk_graph::TransitionGraph;

use crate::walk::random_walk;

/// Number of states in one trial.
pub const TRIAL_LENGTH: usize = 6;
/// Offset between the starts of consecutive trial windows.
pub const TRIAL_STRIDE: usize = 4;

/// Whether a trial ends on a regular transition or a deliberate violation.
///
/// Serialized as `0` (regular, expected response "No") or `1` (irregular,
/// expected response "Yes").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Answer {
    /// Every transition, including the last, is an edge of the graph.
    Regular,
    /// The final transition is not an edge of the graph.
    Irregular,
}

impl Answer {
    /// Numeric label used in exported trial definitions.
    pub fn as_u8(&self) -> u8 {
        match self {
            Answer::Regular => 0,
            Answer::Irregular => 1,
        }
    }
}

impl TryFrom<u8> for Answer {
    type Error = TwError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(Answer::Regular),
            1 => Ok(Answer::Irregular),
            other => Err(TwError::Config(
                ErrorInfo::new("invalid-answer", "answer labels must be 0 or 1")
                    .with_context("value", other.to_string()),
            )),
        }
    }
}

impl From<Answer> for u8 {
    fn from(answer: Answer) -> Self {
        answer.as_u8()
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// Overlapping trial windows cut from one continuous walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialSequences {
    /// The walk of length `2 + 4 * trial_count` the windows were cut from.
    pub long_walk: Vec<StateId>,
    /// Window `k` holds `long_walk[4k..4k + 6]`.
    pub windows: Vec<Vec<StateId>>,
}

/// Trial windows paired with their answer labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledSequences {
    /// Windows, with the final state replaced on irregular trials.
    pub windows: Vec<Vec<StateId>>,
    /// Answer label for each window, in the same order.
    pub answers: Vec<Answer>,
}

/// Cuts `trial_count` overlapping six-state windows from a single walk.
///
/// Consecutive windows share two states: window `k` spans walk indices
/// `[4k, 4k + 6)`.
pub fn generate_trial_sequences(
    graph: &TransitionGraph,
    trial_count: usize,
    rng: &mut RngHandle,
) -> Result<TrialSequences, TwError> {
    let walk_length = TRIAL_STRIDE
        .checked_mul(trial_count)
        .and_then(|n| n.checked_add(TRIAL_LENGTH - TRIAL_STRIDE))
        .ok_or_else(|| {
            TwError::Config(
                ErrorInfo::new("trial-count-overflow", "walk length for the trials overflows")
                    .with_context("trials", trial_count.to_string()),
            )
        })?;
    let long_walk = random_walk(walk_length, graph, rng)?;
    let windows = (0..trial_count)
        .map(|trial| {
            let start = trial * TRIAL_STRIDE;
            long_walk[start..start + TRIAL_LENGTH].to_vec()
        })
        .collect();
    Ok(TrialSequences { long_walk, windows })
}

/// Labels each window and corrupts the final state of the irregular ones.
///
/// All labels are drawn first, uniformly and independently. For an irregular
/// window the last state is replaced by a state drawn uniformly from the
/// non-neighbours of the second to last state. Regular windows are returned
/// untouched.
pub fn inject_violations(
    mut windows: Vec<Vec<StateId>>,
    graph: &TransitionGraph,
    rng: &mut RngHandle,
) -> Result<LabeledSequences, TwError> {
    let answers: Vec<Answer> = (0..windows.len())
        .map(|_| {
            if rng.gen_range(0..2u8) == 1 {
                Answer::Irregular
            } else {
                Answer::Regular
            }
        })
        .collect();

    for (trial, (window, answer)) in windows.iter_mut().zip(&answers).enumerate() {
        if *answer == Answer::Regular {
            continue;
        }
        let len = window.len();
        if len < 2 {
            return Err(TwError::Config(
                ErrorInfo::new("window-too-short", "violations need at least two states")
                    .with_context("trial", trial.to_string())
                    .with_context("length", len.to_string()),
            ));
        }
        let context = window[len - 2];
        let candidates = graph.non_neighbors(context);
        window[len - 1] = *candidates
            .choose(rng)
            .ok_or_else(|| TwError::empty_neighbor_set(context, "inject-violations"))?;
    }

    Ok(LabeledSequences { windows, answers })
}

/// Generates `trial_count` windows and injects violations in one call.
pub fn generate_labeled_trials(
    graph: &TransitionGraph,
    trial_count: usize,
    rng: &mut RngHandle,
) -> Result<LabeledSequences, TwError> {
    let sequences = generate_trial_sequences(graph, trial_count, rng)?;
    let labeled = inject_violations(sequences.windows, graph, rng)?;
    tracing::debug!(
        trials = trial_count,
        irregular = labeled.answers.iter().filter(|a| **a == Answer::Irregular).count(),
        "generated labelled trial windows"
    );
    Ok(labeled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonewalk_graph::build_transition_graph;

    #[test]
    fn answers_serialize_as_integers() {
        assert_eq!(serde_json::to_string(&Answer::Irregular).unwrap(), "1");
        assert_eq!(
            serde_json::from_str::<Answer>("0").unwrap(),
            Answer::Regular
        );
        assert!(serde_json::from_str::<Answer>("2").is_err());
    }

    #[test]
    fn zero_trials_still_walks_the_overhang() {
        let graph = build_transition_graph("random");
        let mut rng = RngHandle::from_seed(5);
        let sequences = generate_trial_sequences(&graph, 0, &mut rng).unwrap();
        assert_eq!(sequences.long_walk.len(), 2);
        assert!(sequences.windows.is_empty());
    }

    #[test]
    fn overflowing_trial_counts_are_config_errors() {
        let graph = build_transition_graph("random");
        let mut rng = RngHandle::from_seed(5);
        let err = generate_trial_sequences(&graph, usize::MAX / 2, &mut rng).unwrap_err();
        assert_eq!(err.info().code, "trial-count-overflow");
    }

    #[test]
    fn short_irregular_windows_are_rejected() {
        let graph = build_transition_graph("random");
        let windows = vec![vec![StateId::new(0).unwrap()]; 64];
        let mut rng = RngHandle::from_seed(3);
        let err = inject_violations(windows, &graph, &mut rng).unwrap_err();
        assert_eq!(err.info().code, "window-too-short");
    }
}
