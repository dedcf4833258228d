use std::error::Error;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Args as ClapArgs, Parser, Subcommand};
use commands::{
    practice::{self, PracticeArgs},
    score::{self, ScoreArgs},
};
use serde_json::json;
use tonewalk_core::RngHandle;
use tonewalk_graph::{build_transition_graph, canonical_hash, graph_to_json};
use tonewalk_seq::{
    random_walk, ExperimentConfig, ExperimentSession, PitchTable, SessionManifest,
    DEFAULT_PITCHES,
};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "tonewalk", about = "Markov tone sequence generator for listening experiments")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a transition graph preset as JSON.
    Graph(GraphArgs),
    /// Generate a single random walk.
    Walk(WalkArgs),
    /// Generate one block of labelled trials.
    Trials(TrialsArgs),
    /// Generate a full session plan and manifest.
    Session(SessionArgs),
    /// Generate practice stimuli.
    Practice(PracticeArgs),
    /// Score participant responses against a trial block.
    Score(ScoreArgs),
}

#[derive(ClapArgs, Debug)]
struct GraphArgs {
    /// Preset name.
    #[arg(long, default_value = "random")]
    preset: String,
    /// Output file; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
struct WalkArgs {
    /// Preset name.
    #[arg(long, default_value = "random")]
    preset: String,
    /// Number of states in the walk.
    #[arg(long)]
    length: usize,
    /// Seed for the walk.
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Also map states through a pitch table shuffled with the same seed.
    #[arg(long)]
    pitches: bool,
}

#[derive(ClapArgs, Debug)]
struct TrialsArgs {
    /// YAML configuration; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides the configured master seed.
    #[arg(long)]
    seed: Option<u64>,
    /// Block index, selecting the block's random substream.
    #[arg(long, default_value_t = 0)]
    block: usize,
    /// Output file; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
struct SessionArgs {
    /// YAML configuration; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides the configured master seed.
    #[arg(long)]
    seed: Option<u64>,
    /// Output directory for `plan.json` and `manifest.json`.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Graph(args) => run_graph(args),
        Command::Walk(args) => run_walk(args),
        Command::Trials(args) => run_trials(args),
        Command::Session(args) => run_session(args),
        Command::Practice(args) => practice::run(&args),
        Command::Score(args) => score::run(&args),
    }
}

fn run_graph(args: GraphArgs) -> Result<(), Box<dyn Error>> {
    let graph = build_transition_graph(&args.preset);
    let json = graph_to_json(&graph)?;
    tracing::info!(
        preset = %args.preset,
        edges = graph.edge_count(),
        hash = %canonical_hash(&graph),
        "built graph"
    );
    match args.out {
        Some(path) => write_text(&path, &json),
        None => print_line(&json),
    }
}

fn run_walk(args: WalkArgs) -> Result<(), Box<dyn Error>> {
    let graph = build_transition_graph(&args.preset);
    let rng = RngHandle::from_seed(args.seed);
    let states = random_walk(args.length, &graph, &mut rng.substream(1))?;
    let mut value = json!({ "seed": args.seed, "states": states });
    if args.pitches {
        let table = PitchTable::shuffled(&DEFAULT_PITCHES, &mut rng.substream(0))?;
        value["notes"] = json!(table.map_states_to_pitches(&states));
    }
    print_line(&serde_json::to_string_pretty(&value)?)
}

fn run_trials(args: TrialsArgs) -> Result<(), Box<dyn Error>> {
    let config = load_config(args.config.as_deref(), args.seed)?;
    let session = ExperimentSession::new(config)?;
    let trials = session.trial_block(args.block)?;
    let json = serde_json::to_string_pretty(&trials)?;
    match args.out {
        Some(path) => write_text(&path, &json),
        None => print_line(&json),
    }
}

fn run_session(args: SessionArgs) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(&args.out)?;
    let config = load_config(args.config.as_deref(), args.seed)?;
    let session = ExperimentSession::new(config)?;
    let plan = session.plan()?;

    write_json(args.out.join("plan.json"), &plan)?;
    SessionManifest::from_session(&session).write(&args.out.join("manifest.json"))?;

    if let Some(path) = &args.config {
        copy_config(path, &args.out);
    }
    tracing::info!(
        out = %args.out.display(),
        blocks = plan.blocks.len(),
        exposure_tones = plan.exposure.states.len(),
        "wrote session plan"
    );
    Ok(())
}

/// Copies the session config next to the outputs. A failed copy is logged,
/// not fatal: the manifest already records the full configuration.
fn copy_config(path: &Path, out: &Path) -> bool {
    match fs::copy(path, out.join("config.yaml")) {
        Ok(_) => true,
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                error = %err,
                "failed to copy config next to session outputs"
            );
            false
        }
    }
}

fn load_config(
    path: Option<&Path>,
    seed: Option<u64>,
) -> Result<ExperimentConfig, Box<dyn Error>> {
    let mut config = match path {
        Some(path) => ExperimentConfig::load(path)?,
        None => ExperimentConfig::default(),
    };
    if let Some(seed) = seed {
        config.seed_policy.master_seed = seed;
    }
    Ok(config)
}

pub(crate) fn write_json<P: AsRef<Path>, T: serde::Serialize>(
    path: P,
    value: &T,
) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(value)?;
    write_text(path.as_ref(), &json)
}

pub(crate) fn write_text(path: &Path, text: &str) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, text)?;
    Ok(())
}

pub(crate) fn print_line(text: &str) -> Result<(), Box<dyn Error>> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{text}")?;
    Ok(())
}
