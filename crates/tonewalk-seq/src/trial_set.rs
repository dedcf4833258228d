use serde::{Deserialize, Serialize};
use tonewalk_core::{MidiNote, RngHandle, StateId, TwError};
use tonewalk_graph::TransitionGraph;

use crate::pitch::PitchTable;
use crate::trials::{generate_labeled_trials, Answer};

/// One forced-choice trial as handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trial {
    /// Position of the trial within its block, starting at zero.
    pub trial_number: usize,
    /// Pitches to play, one per state.
    pub notes: Vec<MidiNote>,
    /// Graph states behind `notes`.
    pub states: Vec<StateId>,
    /// Expected answer.
    pub answer: Answer,
}

/// Ordered trials generated for one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialSet {
    /// Index of the block within the session.
    pub block: usize,
    /// Trials in presentation order.
    pub trials: Vec<Trial>,
}

impl TrialSet {
    /// Number of trials in the set.
    pub fn len(&self) -> usize {
        self.trials.len()
    }

    /// Returns `true` when the set has no trials.
    pub fn is_empty(&self) -> bool {
        self.trials.is_empty()
    }

    /// Answer labels in trial order.
    pub fn answers(&self) -> Vec<Answer> {
        self.trials.iter().map(|trial| trial.answer).collect()
    }

    /// Number of trials ending on a violation.
    pub fn irregular_count(&self) -> usize {
        self.trials
            .iter()
            .filter(|trial| trial.answer == Answer::Irregular)
            .count()
    }
}

/// Generates `trial_count` labelled trials and maps their states to pitches.
pub fn make_trial_definitions(
    graph: &TransitionGraph,
    pitch_table: &PitchTable,
    trial_count: usize,
    rng: &mut RngHandle,
) -> Result<Vec<Trial>, TwError> {
    let labeled = generate_labeled_trials(graph, trial_count, rng)?;
    Ok(labeled
        .windows
        .into_iter()
        .zip(labeled.answers)
        .enumerate()
        .map(|(trial_number, (states, answer))| Trial {
            trial_number,
            notes: pitch_table.map_states_to_pitches(&states),
            states,
            answer,
        })
        .collect())
}
