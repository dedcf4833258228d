#![deny(missing_docs)]
#![doc = "Core types shared by the tonewalk crates: graph states, the error taxonomy and deterministic randomness."]

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod errors;
pub mod provenance;
pub mod rng;

pub use errors::{ErrorInfo, TwError, EMPTY_NEIGHBOR_SET};
pub use provenance::{RunProvenance, SchemaVersion};
pub use rng::{derive_substream_seed, RngHandle};

/// Number of states in every transition graph.
pub const NUM_STATES: usize = 16;

/// Identifier for one of the [`NUM_STATES`] graph states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct StateId(u8);

impl StateId {
    /// Creates a state identifier, rejecting indices outside `0..NUM_STATES`.
    pub fn new(index: usize) -> Result<Self, TwError> {
        if index >= NUM_STATES {
            return Err(TwError::Graph(
                ErrorInfo::new("state-out-of-range", "state index exceeds the graph size")
                    .with_context("index", index.to_string())
                    .with_context("num_states", NUM_STATES.to_string()),
            ));
        }
        Ok(Self(index as u8))
    }

    /// Returns the state index as a `usize` suitable for matrix lookups.
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// Iterates over every state in ascending order.
    pub fn all() -> impl Iterator<Item = StateId> {
        (0..NUM_STATES as u8).map(StateId)
    }
}

impl TryFrom<u8> for StateId {
    type Error = TwError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Self::new(raw as usize)
    }
}

impl From<StateId> for u8 {
    fn from(state: StateId) -> Self {
        state.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// MIDI note number used for pitches.
pub type MidiNote = u8;
