use serde::{Deserialize, Serialize};

use crate::model::ids::QuestionId;
use crate::model::question::Question;

/// How a question left the active slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    Submitted,
    TimedOut,
}

/// Outcome of a single question, written once when it is resolved.
///
/// Scoring is a strict string match of the trimmed input against the
/// canonical answer, so `"07"` does not score for `"7"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_id: QuestionId,
    pub prompt: String,
    pub correct_answer: String,
    pub user_input: String,
    pub correct: bool,
    pub earned: u32,
    pub resolution: Resolution,
}

impl AnswerRecord {
    #[must_use]
    pub fn evaluate(question: &Question, raw_input: &str, resolution: Resolution) -> Self {
        let user_input = raw_input.trim().to_string();
        let correct = user_input == question.answer();
        Self {
            question_id: question.id(),
            prompt: question.prompt().to_string(),
            correct_answer: question.answer().to_string(),
            user_input,
            correct,
            earned: u32::from(correct),
            resolution,
        }
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.user_input.is_empty()
    }

    #[must_use]
    pub fn timed_out(&self) -> bool {
        self.resolution == Resolution::TimedOut
    }
}

/// Keeps only ASCII digits, the way the answer field filters keystrokes.
#[must_use]
pub fn sanitize_numeric_input(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}
