//! The drill state machine.
//!
//! A [`Drill`] walks a fixed list of questions. Every change goes through
//! [`Drill::apply`] (or its by-value twin [`Drill::step`]), which returns the
//! effects the owner must carry out: re-arming or cancelling the countdown
//! timer and handing over the finished result. Nothing here touches a clock,
//! a timer or a renderer, so the whole flow is testable as plain data.

use chrono::{DateTime, Utc};

use crate::model::{
    AnswerRecord, ConfigError, DrillConfig, Question, Resolution, SessionResult,
};

//
// ─── EVENTS & EFFECTS ──────────────────────────────────────────────────────────
//

/// Inputs to the state machine.
///
/// `Submit` and `Tick` name the question they were meant for. If that
/// question is no longer active the event is stale and ignored, which is what
/// keeps a click and a timeout landing on the same question from producing
/// two records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrillEvent {
    Input(String),
    Submit { question: usize },
    Tick { question: usize },
}

/// Work the owner of a [`Drill`] has to perform after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrillEffect {
    /// Drop any running countdown and start a fresh one for `question`.
    RestartTimer { question: usize, seconds: u32 },
    /// Drop the running countdown; nothing replaces it.
    CancelTimer,
    Recorded(AnswerRecord),
    Finished(SessionResult),
}

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrillPhase {
    AwaitingAnswer {
        index: usize,
        remaining: u32,
        input: String,
    },
    Completed(SessionResult),
}

/// What a renderer needs to draw the current moment of a drill.
#[derive(Debug, Clone, PartialEq)]
pub struct DrillSnapshot {
    /// 1-based; equals `total` once the drill is complete.
    pub question_number: usize,
    pub total: usize,
    pub seconds_remaining: u32,
    pub input: String,
    /// `answered / total`, in `0.0..=1.0`.
    pub progress: f64,
    pub prompt: Option<String>,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drill {
    questions: Vec<Question>,
    seconds_per_question: u32,
    phase: DrillPhase,
    records: Vec<AnswerRecord>,
    started_at: DateTime<Utc>,
}

impl Drill {
    /// Start a drill on the first question with a full countdown.
    ///
    /// Only the countdown length is read from `config`; the caller decides
    /// which questions to ask.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::EmptyDrill` if `questions` is empty.
    pub fn new(
        questions: Vec<Question>,
        config: &DrillConfig,
        started_at: DateTime<Utc>,
    ) -> Result<Self, ConfigError> {
        if questions.is_empty() {
            return Err(ConfigError::EmptyDrill);
        }
        let seconds_per_question = config.seconds_per_question();
        let records = Vec::with_capacity(questions.len());

        Ok(Self {
            questions,
            seconds_per_question,
            phase: DrillPhase::AwaitingAnswer {
                index: 0,
                remaining: seconds_per_question,
                input: String::new(),
            },
            records,
            started_at,
        })
    }

    /// Effects owed for the initial state: the first countdown.
    #[must_use]
    pub fn initial_effects(&self) -> Vec<DrillEffect> {
        vec![DrillEffect::RestartTimer {
            question: 0,
            seconds: self.seconds_per_question,
        }]
    }

    /// Pure transition: `(state, event) -> (state, effects)`.
    #[must_use]
    pub fn step(mut self, event: DrillEvent, at: DateTime<Utc>) -> (Self, Vec<DrillEffect>) {
        let effects = self.apply(event, at);
        (self, effects)
    }

    /// In-place transition. `at` stamps the result if this event finishes the drill.
    pub fn apply(&mut self, event: DrillEvent, at: DateTime<Utc>) -> Vec<DrillEffect> {
        match event {
            DrillEvent::Input(text) => {
                if let DrillPhase::AwaitingAnswer { input, .. } = &mut self.phase {
                    *input = text;
                }
                Vec::new()
            }
            DrillEvent::Submit { question } => {
                if self.current_index() != Some(question) {
                    return Vec::new();
                }
                self.resolve(Resolution::Submitted, at)
            }
            DrillEvent::Tick { question } => {
                let DrillPhase::AwaitingAnswer {
                    index, remaining, ..
                } = &mut self.phase
                else {
                    return Vec::new();
                };
                if *index != question {
                    return Vec::new();
                }
                *remaining = remaining.saturating_sub(1);
                if *remaining > 0 {
                    return Vec::new();
                }
                self.resolve(Resolution::TimedOut, at)
            }
        }
    }

    fn resolve(&mut self, resolution: Resolution, at: DateTime<Utc>) -> Vec<DrillEffect> {
        let DrillPhase::AwaitingAnswer { index, input, .. } = &self.phase else {
            return Vec::new();
        };
        let index = *index;
        let record = AnswerRecord::evaluate(&self.questions[index], input, resolution);
        self.records.push(record.clone());

        let mut effects = vec![DrillEffect::Recorded(record)];
        let next = index + 1;
        if next < self.questions.len() {
            self.phase = DrillPhase::AwaitingAnswer {
                index: next,
                remaining: self.seconds_per_question,
                input: String::new(),
            };
            effects.push(DrillEffect::RestartTimer {
                question: next,
                seconds: self.seconds_per_question,
            });
        } else {
            let records = std::mem::take(&mut self.records);
            let result = SessionResult::tally(records, self.started_at, at);
            self.phase = DrillPhase::Completed(result.clone());
            effects.push(DrillEffect::CancelTimer);
            effects.push(DrillEffect::Finished(result));
        }
        effects
    }

    #[must_use]
    pub fn phase(&self) -> &DrillPhase {
        &self.phase
    }

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        match &self.phase {
            DrillPhase::AwaitingAnswer { index, .. } => Some(*index),
            DrillPhase::Completed(_) => None,
        }
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.current_index().map(|index| &self.questions[index])
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn seconds_per_question(&self) -> u32 {
        self.seconds_per_question
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Records written so far, in question order.
    #[must_use]
    pub fn records(&self) -> &[AnswerRecord] {
        match &self.phase {
            DrillPhase::Completed(result) => result.results(),
            DrillPhase::AwaitingAnswer { .. } => &self.records,
        }
    }

    #[must_use]
    pub fn result(&self) -> Option<&SessionResult> {
        match &self.phase {
            DrillPhase::Completed(result) => Some(result),
            DrillPhase::AwaitingAnswer { .. } => None,
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self.phase, DrillPhase::Completed(_))
    }

    #[must_use]
    pub fn snapshot(&self) -> DrillSnapshot {
        let total = self.total();
        match &self.phase {
            DrillPhase::AwaitingAnswer {
                index,
                remaining,
                input,
            } => DrillSnapshot {
                question_number: index + 1,
                total,
                seconds_remaining: *remaining,
                input: input.clone(),
                progress: ratio(*index, total),
                prompt: Some(self.questions[*index].prompt().to_string()),
                completed: false,
            },
            DrillPhase::Completed(_) => DrillSnapshot {
                question_number: total,
                total,
                seconds_remaining: 0,
                input: String::new(),
                progress: 1.0,
                prompt: None,
                completed: true,
            },
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn ratio(done: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    done as f64 / total as f64
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
