use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_QUESTION_COUNT: usize = 10;
pub const DEFAULT_SECONDS_PER_QUESTION: u32 = 10;
pub const MIN_SECONDS_PER_QUESTION: u32 = 1;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("a drill needs at least one question")]
    EmptyDrill,
}

/// Per-session knobs, copied into a drill when it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ConfigFields")]
pub struct DrillConfig {
    question_count: usize,
    seconds_per_question: u32,
}

#[derive(Deserialize)]
struct ConfigFields {
    question_count: usize,
    seconds_per_question: u32,
}

impl TryFrom<ConfigFields> for DrillConfig {
    type Error = ConfigError;

    fn try_from(fields: ConfigFields) -> Result<Self, Self::Error> {
        Self::new(fields.question_count, fields.seconds_per_question)
    }
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            question_count: DEFAULT_QUESTION_COUNT,
            seconds_per_question: DEFAULT_SECONDS_PER_QUESTION,
        }
    }
}

impl DrillConfig {
    /// # Errors
    ///
    /// Returns `ConfigError::EmptyDrill` if `question_count` is zero.
    pub fn new(question_count: usize, seconds_per_question: u32) -> Result<Self, ConfigError> {
        Self::default()
            .with_seconds_per_question(seconds_per_question)
            .with_question_count(question_count)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::EmptyDrill` if `question_count` is zero.
    pub fn with_question_count(mut self, question_count: usize) -> Result<Self, ConfigError> {
        if question_count == 0 {
            return Err(ConfigError::EmptyDrill);
        }
        self.question_count = question_count;
        Ok(self)
    }

    /// Values below one second are raised to one.
    #[must_use]
    pub fn with_seconds_per_question(mut self, seconds: u32) -> Self {
        self.seconds_per_question = clamp_seconds(seconds);
        self
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.question_count
    }

    #[must_use]
    pub fn seconds_per_question(&self) -> u32 {
        self.seconds_per_question
    }
}

#[must_use]
pub fn clamp_seconds(seconds: u32) -> u32 {
    seconds.max(MIN_SECONDS_PER_QUESTION)
}
