use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use tonewalk_core::TwError;
use tonewalk_seq::{score_block, Choice, TrialSet};

use crate::{print_line, write_json};

#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Trial block JSON produced by `tonewalk trials`.
    #[arg(long)]
    pub trials: PathBuf,
    /// Comma separated `Yes`/`No` responses in trial order.
    #[arg(long)]
    pub responses: String,
    /// Output file; stdout when omitted.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run(args: &ScoreArgs) -> Result<(), Box<dyn Error>> {
    let trials: TrialSet = serde_json::from_str(&fs::read_to_string(&args.trials)?)?;
    let choices = parse_responses(&args.responses)?;
    let score = score_block(&trials, &choices)?;
    tracing::info!(
        block = score.block,
        correct = score.correct,
        total = score.total,
        "scored responses"
    );
    match &args.out {
        Some(path) => write_json(path, &score),
        None => print_line(&serde_json::to_string_pretty(&score)?),
    }
}

fn parse_responses(raw: &str) -> Result<Vec<Choice>, TwError> {
    raw.split(',')
        .filter(|label| !label.trim().is_empty())
        .map(Choice::from_label)
        .collect()
}
