use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tonewalk_core::errors::ErrorInfo;
use tonewalk_core::{MidiNote, TwError};

use crate::pitch::DEFAULT_PITCHES;

/// Upper bound on the number of tones in the exposure stream.
pub const MAX_EXPOSURE_TONES: usize = 100_000;
/// Upper bound on `n_trial`.
pub const MAX_TRIALS_PER_BLOCK: usize = 10_000;
/// Upper bound on `blocks`.
pub const MAX_BLOCKS: usize = 1_000;

/// YAML-configurable parameters of one experiment session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Transition graph preset name.
    #[serde(default = "default_preset")]
    pub preset: String,
    /// Number of trials generated per block.
    #[serde(default = "default_n_trial")]
    pub n_trial: usize,
    /// Number of trial blocks in the session.
    #[serde(default = "default_blocks")]
    pub blocks: usize,
    /// Exposure stream timing.
    #[serde(default)]
    pub exposure: ExposureConfig,
    /// Pitches assigned to states, shuffled once per session.
    #[serde(default = "default_pitches")]
    pub pitches: Vec<MidiNote>,
    /// Master seed and label.
    #[serde(default)]
    pub seed_policy: SeedPolicy,
}

fn default_preset() -> String {
    "random".to_string()
}

fn default_n_trial() -> usize {
    20
}

fn default_blocks() -> usize {
    2
}

fn default_pitches() -> Vec<MidiNote> {
    DEFAULT_PITCHES.to_vec()
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            preset: default_preset(),
            n_trial: default_n_trial(),
            blocks: default_blocks(),
            exposure: ExposureConfig::default(),
            pitches: default_pitches(),
            seed_policy: SeedPolicy::default(),
        }
    }
}

impl ExperimentConfig {
    /// Parses and validates a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, TwError> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|err| TwError::Serde(ErrorInfo::new("config-parse", err.to_string())))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a YAML file.
    pub fn load(path: &Path) -> Result<Self, TwError> {
        let contents = fs::read_to_string(path).map_err(|err| {
            TwError::Serde(
                ErrorInfo::new("config-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        Self::from_yaml_str(&contents).map_err(|err| match err {
            TwError::Serde(info) => {
                TwError::Serde(info.with_context("path", path.display().to_string()))
            }
            other => other,
        })
    }

    /// Checks values serde cannot express.
    ///
    /// The preset name is deliberately not checked here: unknown presets
    /// build an edgeless graph and fail on first use.
    pub fn validate(&self) -> Result<(), TwError> {
        if self.pitches.len() != DEFAULT_PITCHES.len() {
            return Err(TwError::Config(
                ErrorInfo::new("pitch-table-size", "pitch list needs one pitch per state")
                    .with_context("expected", DEFAULT_PITCHES.len().to_string())
                    .with_context("found", self.pitches.len().to_string()),
            ));
        }
        check_count("n_trial", self.n_trial, MAX_TRIALS_PER_BLOCK)?;
        check_count("blocks", self.blocks, MAX_BLOCKS)?;
        self.exposure.validate()
    }
}

fn check_count(field: &str, value: usize, max: usize) -> Result<(), TwError> {
    if value > max {
        return Err(TwError::Config(
            ErrorInfo::new("count-too-large", "configured count exceeds its limit")
                .with_context("field", field)
                .with_context("value", value.to_string())
                .with_context("max", max.to_string()),
        ));
    }
    Ok(())
}

/// Timing of the exposure stream, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExposureConfig {
    /// Total length of the exposure stream.
    #[serde(default = "default_duration_secs")]
    pub duration_secs: f64,
    /// Duration of a single tone.
    #[serde(default = "default_tone_secs")]
    pub tone_secs: f64,
    /// Silence after each tone.
    #[serde(default = "default_blank_secs")]
    pub blank_secs: f64,
}

fn default_duration_secs() -> f64 {
    120.0
}

fn default_tone_secs() -> f64 {
    0.23
}

fn default_blank_secs() -> f64 {
    0.2
}

impl Default for ExposureConfig {
    fn default() -> Self {
        Self {
            duration_secs: default_duration_secs(),
            tone_secs: default_tone_secs(),
            blank_secs: default_blank_secs(),
        }
    }
}

impl ExposureConfig {
    /// Number of tones that fit in the exposure stream.
    ///
    /// Floor division with the same rounding as Python's float `//`, so a
    /// remainder lost to representation error does not add an extra tone.
    /// Fails when the count is not finite or exceeds [`MAX_EXPOSURE_TONES`].
    pub fn sequence_length(&self) -> Result<usize, TwError> {
        let step = self.tone_secs + self.blank_secs;
        let remainder = self.duration_secs % step;
        let quotient = (self.duration_secs - remainder) / step;
        let mut tones = quotient.floor();
        if quotient - tones > 0.5 {
            tones += 1.0;
        }
        if !tones.is_finite() || tones < 0.0 || tones > MAX_EXPOSURE_TONES as f64 {
            return Err(TwError::Config(
                ErrorInfo::new("exposure-too-long", "exposure stream has too many tones")
                    .with_context("tones", tones.to_string())
                    .with_context("max", MAX_EXPOSURE_TONES.to_string()),
            ));
        }
        Ok(tones as usize)
    }

    fn validate(&self) -> Result<(), TwError> {
        let fields = [
            ("duration_secs", self.duration_secs, false),
            ("tone_secs", self.tone_secs, false),
            ("blank_secs", self.blank_secs, true),
        ];
        for (name, value, zero_ok) in fields {
            let bad = !value.is_finite() || value < 0.0 || (!zero_ok && value == 0.0);
            if bad {
                return Err(TwError::Config(
                    ErrorInfo::new("invalid-duration", "exposure durations must be positive")
                        .with_context("field", name)
                        .with_context("value", value.to_string()),
                ));
            }
        }
        self.sequence_length().map(|_| ())
    }
}

/// Deterministic seeding configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedPolicy {
    /// Master seed for the session.
    #[serde(default = "default_master_seed")]
    pub master_seed: u64,
    /// Optional label recorded in manifests.
    #[serde(default)]
    pub label: Option<String>,
}

fn default_master_seed() -> u64 {
    0x70E5_EED5_0F16_7A1C_u64
}

impl Default for SeedPolicy {
    fn default() -> Self {
        Self {
            master_seed: default_master_seed(),
            label: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_exposure_fits_279_tones() {
        assert_eq!(ExposureConfig::default().sequence_length().unwrap(), 279);
    }

    #[test]
    fn tone_count_rounds_like_float_floor_division() {
        let exposure = ExposureConfig {
            duration_secs: 1.0,
            tone_secs: 0.05,
            blank_secs: 0.05,
        };
        assert_eq!(exposure.sequence_length().unwrap(), 9);
    }

    #[test]
    fn unbounded_exposure_is_rejected() {
        let err = ExperimentConfig::from_yaml_str(
            "exposure: {duration_secs: 1.0e300, tone_secs: 1.0e-300, blank_secs: 0.0}\n",
        )
        .unwrap_err();
        assert_eq!(err.info().code, "exposure-too-long");
        assert!(matches!(err, TwError::Config(_)));
    }

    #[test]
    fn oversized_counts_are_rejected() {
        let err = ExperimentConfig::from_yaml_str("n_trial: 9223372036854775807\n").unwrap_err();
        assert_eq!(err.info().code, "count-too-large");
        assert_eq!(err.info().context.get("field").map(String::as_str), Some("n_trial"));
        let err = ExperimentConfig::from_yaml_str("blocks: 1000000\n").unwrap_err();
        assert_eq!(err.info().context.get("field").map(String::as_str), Some("blocks"));
        assert!(ExperimentConfig::from_yaml_str("n_trial: 10000\n").is_ok());
    }

    #[test]
    fn partial_yaml_falls_back_to_defaults() {
        let config = ExperimentConfig::from_yaml_str("n_trial: 8\nseed_policy:\n  master_seed: 7\n")
            .unwrap();
        assert_eq!(config.n_trial, 8);
        assert_eq!(config.blocks, 2);
        assert_eq!(config.preset, "random");
        assert_eq!(config.seed_policy.master_seed, 7);
        assert_eq!(config.exposure, ExposureConfig::default());
    }

    #[test]
    fn unknown_presets_pass_validation() {
        let config = ExperimentConfig::from_yaml_str("preset: ring\n").unwrap();
        assert_eq!(config.preset, "ring");
    }

    #[test]
    fn zero_tone_duration_is_rejected() {
        let err = ExperimentConfig::from_yaml_str("exposure:\n  tone_secs: 0.0\n").unwrap_err();
        assert_eq!(err.info().code, "invalid-duration");
        assert_eq!(err.info().context.get("field").map(String::as_str), Some("tone_secs"));
    }

    #[test]
    fn short_pitch_lists_are_rejected() {
        let err = ExperimentConfig::from_yaml_str("pitches: [60, 62, 64]\n").unwrap_err();
        assert!(matches!(err, TwError::Config(_)));
    }
}
