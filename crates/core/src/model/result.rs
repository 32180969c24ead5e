use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::answer::AnswerRecord;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ResultError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("expected {total} answer records, got {len}")]
    CountMismatch { total: usize, len: usize },
}

/// Scored summary of a finished drill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResult {
    results: Vec<AnswerRecord>,
    score: u32,
    total: usize,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
}

impl SessionResult {
    /// Fold the per-question records into a result.
    ///
    /// # Errors
    ///
    /// Returns `ResultError::CountMismatch` if `records` does not hold exactly `total` entries.
    /// Returns `ResultError::InvalidTimeRange` if `completed_at` is before `started_at`.
    pub fn from_records(
        records: Vec<AnswerRecord>,
        total: usize,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, ResultError> {
        if records.len() != total {
            return Err(ResultError::CountMismatch {
                total,
                len: records.len(),
            });
        }
        if completed_at < started_at {
            return Err(ResultError::InvalidTimeRange);
        }
        Ok(Self::tally(records, started_at, completed_at))
    }

    /// Totals are taken from `records` itself, and a completion time that
    /// precedes the start (wall clock stepped back) is pinned to the start.
    pub(crate) fn tally(
        records: Vec<AnswerRecord>,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Self {
        let score = records.iter().map(|record| record.earned).sum();
        Self {
            total: records.len(),
            results: records,
            score,
            started_at,
            completed_at: completed_at.max(started_at),
        }
    }

    #[must_use]
    pub fn results(&self) -> &[AnswerRecord] {
        &self.results
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.completed_at - self.started_at
    }

    #[must_use]
    pub fn timed_out_count(&self) -> usize {
        self.results.iter().filter(|record| record.timed_out()).count()
    }
}
