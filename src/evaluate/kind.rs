use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The three named evaluations a transcript can be put through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationKind {
    Readability,
    Correctness,
    AskAi,
}

impl EvaluationKind {
    /// Display label, as shown to users
    pub fn label(&self) -> &'static str {
        match self {
            EvaluationKind::Readability => "Readability",
            EvaluationKind::Correctness => "Correctness",
            EvaluationKind::AskAi => "Ask AI",
        }
    }

    /// Message shown when this evaluation is requested with no text
    pub fn empty_input_message(&self) -> &'static str {
        match self {
            EvaluationKind::AskAi => "Please enter some text before asking AI.",
            EvaluationKind::Correctness => "Please enter some text before checking correctness.",
            EvaluationKind::Readability => "Please enter some text before assessing readability.",
        }
    }
}

/// Result of the most recent evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Which evaluation produced this result
    pub kind: EvaluationKind,

    /// Result text, ready for display
    pub text: String,
}

/// Errors from the evaluation dispatcher.
#[derive(Debug, Error)]
pub enum EvaluateError {
    /// The input was empty or whitespace-only; no evaluation ran.
    #[error("{}", .0.empty_input_message())]
    EmptyInput(EvaluationKind),

    /// The evaluation backend failed.
    #[error("evaluation failed: {0}")]
    Backend(String),
}
