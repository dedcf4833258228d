use std::fmt;

use serde::{Deserialize, Serialize};
use tonewalk_core::errors::ErrorInfo;
use tonewalk_core::TwError;

use crate::trial_set::TrialSet;
use crate::trials::Answer;

/// Participant response to a forced-choice trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Choice {
    /// Maps to answer label `1`.
    Yes,
    /// Maps to answer label `0`.
    No,
}

impl Choice {
    /// Parses the button label shown to the participant.
    pub fn from_label(label: &str) -> Result<Self, TwError> {
        match label.trim() {
            "Yes" => Ok(Choice::Yes),
            "No" => Ok(Choice::No),
            other => Err(TwError::Config(
                ErrorInfo::new("invalid-choice", "responses must be Yes or No")
                    .with_context("label", other),
            )),
        }
    }

    /// Answer label this choice asserts.
    pub fn as_answer(&self) -> Answer {
        match self {
            Choice::Yes => Answer::Irregular,
            Choice::No => Answer::Regular,
        }
    }
}

/// Feedback page shown after a trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feedback {
    /// The response matched the trial's answer.
    Correct,
    /// The response did not match.
    Error,
}

impl Feedback {
    /// Text shown to the participant.
    pub fn message(&self) -> &'static str {
        match self {
            Feedback::Correct => "Correct!",
            Feedback::Error => "Error!",
        }
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Returns `true` when `choice` matches `answer`.
pub fn is_correct(choice: Choice, answer: Answer) -> bool {
    choice.as_answer() == answer
}

/// Feedback for a single response.
pub fn feedback_for(choice: Choice, answer: Answer) -> Feedback {
    if is_correct(choice, answer) {
        Feedback::Correct
    } else {
        Feedback::Error
    }
}

/// Aggregate accuracy over one block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockScore {
    /// Block index the responses belong to.
    pub block: usize,
    /// Number of correct responses.
    pub correct: usize,
    /// Number of responses scored.
    pub total: usize,
    /// `correct / total`, or `0.0` for an empty block.
    pub accuracy: f64,
    /// Per-trial feedback in trial order.
    pub feedback: Vec<Feedback>,
}

/// Scores one response per trial of `trials`.
pub fn score_block(trials: &TrialSet, choices: &[Choice]) -> Result<BlockScore, TwError> {
    if choices.len() != trials.len() {
        return Err(TwError::Config(
            ErrorInfo::new("response-count", "expected one response per trial")
                .with_context("trials", trials.len().to_string())
                .with_context("responses", choices.len().to_string()),
        ));
    }
    let feedback: Vec<Feedback> = trials
        .answers()
        .into_iter()
        .zip(choices)
        .map(|(answer, choice)| feedback_for(*choice, answer))
        .collect();
    let correct = feedback.iter().filter(|f| **f == Feedback::Correct).count();
    let total = feedback.len();
    let accuracy = if total == 0 {
        0.0
    } else {
        correct as f64 / total as f64
    };
    Ok(BlockScore {
        block: trials.block,
        correct,
        total,
        accuracy,
        feedback,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trial_set::Trial;

    fn trial(number: usize, answer: Answer) -> Trial {
        Trial {
            trial_number: number,
            notes: vec![60; 6],
            states: Vec::new(),
            answer,
        }
    }

    #[test]
    fn yes_flags_violations() {
        assert!(is_correct(Choice::Yes, Answer::Irregular));
        assert!(is_correct(Choice::No, Answer::Regular));
        assert_eq!(feedback_for(Choice::Yes, Answer::Regular), Feedback::Error);
        assert_eq!(Feedback::Correct.to_string(), "Correct!");
    }

    #[test]
    fn block_score_counts_matches() {
        let set = TrialSet {
            block: 1,
            trials: vec![
                trial(0, Answer::Regular),
                trial(1, Answer::Irregular),
                trial(2, Answer::Irregular),
                trial(3, Answer::Regular),
            ],
        };
        let choices = [Choice::No, Choice::Yes, Choice::No, Choice::No];
        let score = score_block(&set, &choices).unwrap();
        assert_eq!(score.block, 1);
        assert_eq!(score.correct, 3);
        assert_eq!(score.total, 4);
        assert!((score.accuracy - 0.75).abs() < 1e-12);
        assert_eq!(score.feedback[2], Feedback::Error);
    }

    #[test]
    fn response_count_must_match() {
        let set = TrialSet {
            block: 0,
            trials: vec![trial(0, Answer::Regular)],
        };
        let err = score_block(&set, &[]).unwrap_err();
        assert_eq!(err.info().code, "response-count");
    }

    #[test]
    fn labels_parse_strictly() {
        assert_eq!(Choice::from_label(" Yes").unwrap(), Choice::Yes);
        assert!(Choice::from_label("yes").is_err());
    }
}
