use rand::Rng;
use serde::{Deserialize, Serialize};
use tonewalk_core::errors::ErrorInfo;
use tonewalk_core::{MidiNote, RngHandle, TwError};

/// C major scale used for the random practice sequence.
pub const SCALE_NOTES: [MidiNote; 8] = [60, 62, 64, 65, 67, 69, 71, 72];
/// Length of the random practice sequence.
pub const PRACTICE_SEQUENCE_LENGTH: usize = 6;
/// Bounds of the preference slider.
pub const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=4;

/// Mode of the demo arpeggio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArpeggioMode {
    /// C E G.
    Major,
    /// C Eb G.
    Minor,
}

impl ArpeggioMode {
    /// Parses the button label shown to the participant.
    pub fn from_label(label: &str) -> Result<Self, TwError> {
        match label.trim() {
            "Major" => Ok(ArpeggioMode::Major),
            "Minor" => Ok(ArpeggioMode::Minor),
            other => Err(TwError::Config(
                ErrorInfo::new("invalid-mode", "arpeggio mode must be Major or Minor")
                    .with_context("label", other),
            )),
        }
    }
}

/// Ascending arpeggio rooted on middle C.
pub fn arpeggio(mode: ArpeggioMode) -> [MidiNote; 3] {
    match mode {
        ArpeggioMode::Major => [60, 64, 67],
        ArpeggioMode::Minor => [60, 63, 67],
    }
}

/// Draws `length` scale notes uniformly with replacement.
pub fn random_scale_sequence(length: usize, rng: &mut RngHandle) -> Vec<MidiNote> {
    (0..length)
        .map(|_| SCALE_NOTES[rng.gen_range(0..SCALE_NOTES.len())])
        .collect()
}

/// Preference rating on the 1 (dislike) to 4 (like) slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PreferenceRating(u8);

impl PreferenceRating {
    /// Validates a slider value.
    pub fn new(value: u8) -> Result<Self, TwError> {
        if !RATING_RANGE.contains(&value) {
            return Err(TwError::Config(
                ErrorInfo::new("rating-out-of-range", "preference ratings run from 1 to 4")
                    .with_context("value", value.to_string()),
            ));
        }
        Ok(Self(value))
    }

    /// Raw slider value.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for PreferenceRating {
    type Error = TwError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PreferenceRating> for u8 {
    fn from(rating: PreferenceRating) -> Self {
        rating.0
    }
}

/// Stimuli for the practice session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeSet {
    /// Major arpeggio demo.
    pub major: [MidiNote; 3],
    /// Minor arpeggio demo.
    pub minor: [MidiNote; 3],
    /// Random scale sequence, played and then rated.
    pub random_sequence: Vec<MidiNote>,
}

/// Builds the practice stimuli.
pub fn practice_set(rng: &mut RngHandle) -> PracticeSet {
    PracticeSet {
        major: arpeggio(ArpeggioMode::Major),
        minor: arpeggio(ArpeggioMode::Minor),
        random_sequence: random_scale_sequence(PRACTICE_SEQUENCE_LENGTH, rng),
    }
}
