use std::error::Error;

use clap::Args;
use serde_json::json;
use tonewalk_core::RngHandle;
use tonewalk_seq::{arpeggio, practice_set, ArpeggioMode, PreferenceRating};

use crate::print_line;

#[derive(Args, Debug)]
pub struct PracticeArgs {
    /// Seed for the random scale sequence.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
    /// Arpeggio chosen by the participant (`Major` or `Minor`).
    #[arg(long)]
    pub mode: Option<String>,
    /// Preference rating to validate and echo back (1 to 4).
    #[arg(long)]
    pub rating: Option<u8>,
}

pub fn run(args: &PracticeArgs) -> Result<(), Box<dyn Error>> {
    let mut rng = RngHandle::from_seed(args.seed);
    let set = practice_set(&mut rng);
    let mut value = serde_json::to_value(&set)?;
    if let Some(label) = &args.mode {
        let mode = ArpeggioMode::from_label(label)?;
        value["chosen"] = json!({ "mode": mode, "notes": arpeggio(mode) });
    }
    if let Some(rating) = args.rating {
        value["rating"] = json!(PreferenceRating::new(rating)?);
    }
    print_line(&serde_json::to_string_pretty(&value)?)
}
