use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::ids::QuestionId;

/// Largest value either operand or the result may take.
pub const MAX_VALUE: u8 = 99;

/// Smallest minuend a subtraction question may start from.
pub const MIN_MINUEND: u8 = 10;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("operand {value} is outside 0..=99")]
    OperandOutOfRange { value: u8 },

    #[error("minuend {value} is below 10")]
    MinuendTooSmall { value: u8 },

    #[error("{left} - {right} would be negative")]
    NegativeResult { left: u8, right: u8 },

    #[error("{left} + {right} exceeds 99")]
    SumTooLarge { left: u8, right: u8 },

    #[error("question `{prompt}` does not match its operands")]
    ProblemMismatch { prompt: String },
}

//
// ─── OPERATOR ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Add,
    Subtract,
}

impl Operator {
    /// Symbol used in prompts. Subtraction uses U+2212, not a hyphen.
    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '\u{2212}',
        }
    }
}

//
// ─── PROBLEM ───────────────────────────────────────────────────────────────────
//

/// Operator and operands of a two-digit question.
///
/// Construction enforces the range rules: sums never exceed 99 and
/// differences are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProblemFields")]
pub struct Problem {
    operator: Operator,
    left: u8,
    right: u8,
}

/// Wire shape of a [`Problem`]; loading goes back through [`Problem::new`].
#[derive(Deserialize)]
struct ProblemFields {
    operator: Operator,
    left: u8,
    right: u8,
}

impl TryFrom<ProblemFields> for Problem {
    type Error = QuestionError;

    fn try_from(fields: ProblemFields) -> Result<Self, Self::Error> {
        Self::new(fields.operator, fields.left, fields.right)
    }
}

impl Problem {
    /// # Errors
    ///
    /// Returns `QuestionError` if the operands break the range rules for the operator.
    pub fn new(operator: Operator, left: u8, right: u8) -> Result<Self, QuestionError> {
        for value in [left, right] {
            if value > MAX_VALUE {
                return Err(QuestionError::OperandOutOfRange { value });
            }
        }
        match operator {
            Operator::Add => {
                if u16::from(left) + u16::from(right) > u16::from(MAX_VALUE) {
                    return Err(QuestionError::SumTooLarge { left, right });
                }
            }
            Operator::Subtract => {
                if left < MIN_MINUEND {
                    return Err(QuestionError::MinuendTooSmall { value: left });
                }
                if right > left {
                    return Err(QuestionError::NegativeResult { left, right });
                }
            }
        }
        Ok(Self {
            operator,
            left,
            right,
        })
    }

    /// Operands already drawn inside the valid ranges.
    pub(crate) fn drawn(operator: Operator, left: u8, right: u8) -> Self {
        debug_assert!(Self::new(operator, left, right).is_ok());
        Self {
            operator,
            left,
            right,
        }
    }

    #[must_use]
    pub fn operator(&self) -> Operator {
        self.operator
    }

    #[must_use]
    pub fn left(&self) -> u8 {
        self.left
    }

    #[must_use]
    pub fn right(&self) -> u8 {
        self.right
    }

    #[must_use]
    pub fn result(&self) -> u8 {
        match self.operator {
            Operator::Add => self.left + self.right,
            Operator::Subtract => self.left - self.right,
        }
    }

    #[must_use]
    pub fn prompt(&self) -> String {
        format!("{self} = ?")
    }

    #[must_use]
    pub fn answer(&self) -> String {
        self.result().to_string()
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.operator.symbol(), self.right)
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// One drill question: what is shown and the exact string that scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuestionFields")]
pub struct Question {
    id: QuestionId,
    prompt: String,
    answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    problem: Option<Problem>,
}

#[derive(Deserialize)]
struct QuestionFields {
    id: QuestionId,
    prompt: String,
    answer: String,
    #[serde(default)]
    problem: Option<Problem>,
}

/// A stored `problem` must render to the stored prompt and answer.
impl TryFrom<QuestionFields> for Question {
    type Error = QuestionError;

    fn try_from(fields: QuestionFields) -> Result<Self, Self::Error> {
        if let Some(problem) = &fields.problem {
            if problem.prompt() != fields.prompt || problem.answer() != fields.answer {
                return Err(QuestionError::ProblemMismatch {
                    prompt: fields.prompt,
                });
            }
        }
        Ok(Self {
            id: fields.id,
            prompt: fields.prompt,
            answer: fields.answer,
            problem: fields.problem,
        })
    }
}

impl Question {
    #[must_use]
    pub fn from_problem(id: QuestionId, problem: Problem) -> Self {
        Self {
            id,
            prompt: problem.prompt(),
            answer: problem.answer(),
            problem: Some(problem),
        }
    }

    /// Builds a question from display text alone, e.g. a fixed practice set.
    #[must_use]
    pub fn new(id: QuestionId, prompt: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            id,
            prompt: prompt.into(),
            answer: answer.into(),
            problem: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn problem(&self) -> Option<&Problem> {
        self.problem.as_ref()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
