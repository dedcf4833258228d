#![deny(missing_docs)]

//! Markov-chain tone sequence generator for statistical-learning listening experiments.
//!
//! A [`TransitionGraph`](tonewalk_graph::TransitionGraph) defines which tone
//! transitions are regular. [`random_walk`] produces the exposure stream,
//! [`generate_trial_sequences`] slices one long walk into overlapping six-tone
//! windows and [`inject_violations`] corrupts the final tone of the trials
//! labelled irregular. [`ExperimentSession`] threads an explicit
//! [`RngHandle`](tonewalk_core::RngHandle) and a once-shuffled [`PitchTable`]
//! through all of it.

/// YAML configuration schema and defaults.
pub mod config;
/// Participant response scoring and feedback.
pub mod feedback;
/// Session manifest serialization helpers.
pub mod manifest;
/// State to pitch lookup tables.
pub mod pitch;
/// Warm-up stimuli for the practice variant.
pub mod practice;
/// Session orchestration over explicit random substreams.
pub mod session;
/// Labelled trial records handed to the presentation layer.
pub mod trial_set;
/// Trial windows and violation injection.
pub mod trials;
/// Random walks over a transition graph.
pub mod walk;

pub use config::{
    ExperimentConfig, ExposureConfig, SeedPolicy, MAX_BLOCKS, MAX_EXPOSURE_TONES,
    MAX_TRIALS_PER_BLOCK,
};
pub use feedback::{feedback_for, is_correct, score_block, BlockScore, Choice, Feedback};
pub use manifest::SessionManifest;
pub use pitch::{PitchTable, DEFAULT_PITCHES};
pub use practice::{
    arpeggio, practice_set, random_scale_sequence, ArpeggioMode, PracticeSet, PreferenceRating,
};
pub use session::{ExperimentSession, ExposureSequence, SessionPlan};
pub use trial_set::{make_trial_definitions, Trial, TrialSet};
pub use trials::{
    generate_labeled_trials, generate_trial_sequences, inject_violations, Answer,
    LabeledSequences, TrialSequences, TRIAL_LENGTH, TRIAL_STRIDE,
};
pub use walk::random_walk;
