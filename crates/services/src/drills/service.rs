use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use drill_core::Clock;
use drill_core::drill::Drill;
use drill_core::generator::generate;
use drill_core::model::{DrillConfig, Question};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::controller::DrillController;
use crate::error::DrillServiceError;
use crate::timer::{TICK_PERIOD, TickReceiver, TickScheduler, TokioTicker};

/// Starts drills: generates the questions and hands back a running controller.
///
/// One random source lives for the lifetime of the service, so a seeded
/// service produces a repeatable sequence of sessions that still differ from
/// each other.
#[derive(Debug)]
pub struct DrillService {
    clock: Clock,
    rng: Mutex<StdRng>,
    tick_period: Duration,
}

impl DrillService {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            rng: Mutex::new(StdRng::from_rng(&mut rand::rng())),
            tick_period: TICK_PERIOD,
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    #[must_use]
    pub fn with_tick_period(mut self, period: Duration) -> Self {
        self.tick_period = period;
        self
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Draw a fresh batch of questions from the service's random source.
    #[must_use]
    pub fn generate_questions(&self, count: usize) -> Vec<Question> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        generate(count, &mut *rng)
    }

    /// Start a drill ticking on the tokio runtime.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// See [`start_with_questions`](Self::start_with_questions).
    pub fn start(
        &self,
        config: DrillConfig,
    ) -> Result<(DrillController<TokioTicker>, TickReceiver), DrillServiceError> {
        self.start_with(config, TokioTicker)
    }

    /// # Errors
    ///
    /// See [`start_with_questions`](Self::start_with_questions).
    pub fn start_with<S: TickScheduler>(
        &self,
        config: DrillConfig,
        scheduler: S,
    ) -> Result<(DrillController<S>, TickReceiver), DrillServiceError> {
        let questions = self.generate_questions(config.question_count());
        self.start_with_questions(questions, config, scheduler)
    }

    /// Start a drill over a caller-supplied question list.
    ///
    /// The returned receiver yields the countdown ticks; pass each one to
    /// [`DrillController::on_tick`].
    ///
    /// # Errors
    ///
    /// Returns `DrillServiceError::QuestionCountMismatch` if `questions` does not
    /// match `config.question_count()`.
    /// Returns `DrillServiceError::Config` if there are no questions.
    pub fn start_with_questions<S: TickScheduler>(
        &self,
        questions: Vec<Question>,
        config: DrillConfig,
        scheduler: S,
    ) -> Result<(DrillController<S>, TickReceiver), DrillServiceError> {
        if questions.len() != config.question_count() {
            return Err(DrillServiceError::QuestionCountMismatch {
                expected: config.question_count(),
                actual: questions.len(),
            });
        }
        let drill = Drill::new(questions, &config, self.clock.now())?;
        tracing::info!(
            questions = drill.total(),
            seconds_per_question = drill.seconds_per_question(),
            "drill started"
        );
        Ok(DrillController::start(
            drill,
            self.clock,
            scheduler,
            self.tick_period,
        ))
    }
}

impl Default for DrillService {
    fn default() -> Self {
        Self::new(Clock::default())
    }
}
