use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tonewalk_core::errors::ErrorInfo;
use tonewalk_core::{MidiNote, RngHandle, StateId, TwError, NUM_STATES};

/// Default MIDI pitches, one per state before shuffling.
pub const DEFAULT_PITCHES: [MidiNote; NUM_STATES] = [
    60, 61, 62, 64, 66, 67, 69, 71, 72, 73, 74, 76, 78, 79, 81, 83,
];

/// Fixed state to pitch association used for a whole session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PitchTable {
    pitches: [MidiNote; NUM_STATES],
}

impl PitchTable {
    /// Builds a table mapping state `i` to `pitches[i]`.
    pub fn new(pitches: &[MidiNote]) -> Result<Self, TwError> {
        let pitches: [MidiNote; NUM_STATES] = pitches.try_into().map_err(|_| {
            TwError::Config(
                ErrorInfo::new("pitch-table-size", "pitch table needs one pitch per state")
                    .with_context("expected", NUM_STATES.to_string())
                    .with_context("found", pitches.len().to_string()),
            )
        })?;
        Ok(Self { pitches })
    }

    /// Builds a table from a shuffled copy of `pitches`.
    ///
    /// This is the only randomness involved in pitch mapping; shuffle once per
    /// session and reuse the table for every trial.
    pub fn shuffled(pitches: &[MidiNote], rng: &mut RngHandle) -> Result<Self, TwError> {
        let mut table = Self::new(pitches)?;
        table.pitches.shuffle(rng);
        Ok(table)
    }

    /// Pitch assigned to `state`.
    pub fn pitch(&self, state: StateId) -> MidiNote {
        self.pitches[state.index()]
    }

    /// Maps states to pitches, preserving length and order.
    pub fn map_states_to_pitches(&self, states: &[StateId]) -> Vec<MidiNote> {
        states.iter().map(|state| self.pitch(*state)).collect()
    }

    /// Pitches in state order.
    pub fn as_slice(&self) -> &[MidiNote] {
        &self.pitches
    }
}

impl Default for PitchTable {
    fn default() -> Self {
        Self {
            pitches: DEFAULT_PITCHES,
        }
    }
}
