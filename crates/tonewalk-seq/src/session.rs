use serde::{Deserialize, Serialize};
use tonewalk_core::{MidiNote, RngHandle, SchemaVersion, StateId, TwError};
use tonewalk_graph::{build_transition_graph, TransitionGraph};

use crate::config::ExperimentConfig;
use crate::pitch::PitchTable;
use crate::trial_set::{make_trial_definitions, TrialSet};
use crate::walk::random_walk;

const PITCH_SUBSTREAM: u64 = 0;
const EXPOSURE_SUBSTREAM: u64 = 1;
const BLOCK_SUBSTREAM_BASE: u64 = 1 << 16;

/// Schema version stamped on session plans.
pub const PLAN_SCHEMA: SchemaVersion = SchemaVersion::new(1, 0, 0);

/// Exposure stream played before the trial blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExposureSequence {
    /// Walk states.
    pub states: Vec<StateId>,
    /// Pitches for `states`.
    pub notes: Vec<MidiNote>,
    /// Duration of each tone in seconds.
    pub tone_secs: f64,
    /// Silence after each tone in seconds.
    pub blank_secs: f64,
}

/// Everything a presentation layer needs for one participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionPlan {
    /// Plan schema version.
    pub schema_version: SchemaVersion,
    /// Exposure stream.
    pub exposure: ExposureSequence,
    /// Trial blocks in presentation order.
    pub blocks: Vec<TrialSet>,
}

/// Graph, pitch table and random source for one participant session.
///
/// Built once at session start. Each output draws from its own substream of
/// the master seed, so generating block 1 does not depend on whether the
/// exposure or block 0 were generated first, and asking for the same block
/// twice returns the same trials.
#[derive(Debug, Clone)]
pub struct ExperimentSession {
    config: ExperimentConfig,
    graph: TransitionGraph,
    pitch_table: PitchTable,
    master: RngHandle,
}

impl ExperimentSession {
    /// Validates `config`, builds the graph and shuffles the pitch table.
    pub fn new(config: ExperimentConfig) -> Result<Self, TwError> {
        config.validate()?;
        let graph = build_transition_graph(&config.preset);
        let master = RngHandle::from_seed(config.seed_policy.master_seed);
        let pitch_table =
            PitchTable::shuffled(&config.pitches, &mut master.substream(PITCH_SUBSTREAM))?;
        tracing::info!(
            preset = %config.preset,
            seed = config.seed_policy.master_seed,
            edges = graph.edge_count(),
            "experiment session initialised"
        );
        Ok(Self {
            config,
            graph,
            pitch_table,
            master,
        })
    }

    /// Configuration the session was built from.
    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// Transition graph shared by every block.
    pub fn graph(&self) -> &TransitionGraph {
        &self.graph
    }

    /// Pitch table fixed for the whole session.
    pub fn pitch_table(&self) -> &PitchTable {
        &self.pitch_table
    }

    /// Generates the exposure stream.
    pub fn exposure_sequence(&self) -> Result<ExposureSequence, TwError> {
        let exposure = &self.config.exposure;
        let mut rng = self.master.substream(EXPOSURE_SUBSTREAM);
        let states = random_walk(exposure.sequence_length()?, &self.graph, &mut rng)?;
        tracing::debug!(tones = states.len(), "generated exposure stream");
        Ok(ExposureSequence {
            notes: self.pitch_table.map_states_to_pitches(&states),
            states,
            tone_secs: exposure.tone_secs,
            blank_secs: exposure.blank_secs,
        })
    }

    /// Generates the trials of block `block`.
    pub fn trial_block(&self, block: usize) -> Result<TrialSet, TwError> {
        let mut rng = self.master.substream(BLOCK_SUBSTREAM_BASE + block as u64);
        let trials =
            make_trial_definitions(&self.graph, &self.pitch_table, self.config.n_trial, &mut rng)?;
        let set = TrialSet { block, trials };
        tracing::debug!(
            block,
            trials = set.len(),
            irregular = set.irregular_count(),
            "generated trial block"
        );
        Ok(set)
    }

    /// Generates the exposure stream and every configured block.
    pub fn plan(&self) -> Result<SessionPlan, TwError> {
        let exposure = self.exposure_sequence()?;
        let blocks = (0..self.config.blocks)
            .map(|block| self.trial_block(block))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SessionPlan {
            schema_version: PLAN_SCHEMA,
            exposure,
            blocks,
        })
    }
}
