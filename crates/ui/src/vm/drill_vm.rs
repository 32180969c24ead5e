use drill_core::model::{DrillConfig, SessionResult, clamp_seconds, sanitize_numeric_input};
use services::{
    DrillController, DrillService, DrillServiceError, TickReceiver, TickScheduler, TimerTick,
    TokioTicker,
};

use crate::views::ViewError;
use crate::vm::time_fmt::format_countdown;

/// Seconds left at which the countdown is drawn as urgent.
const RUNNING_LOW_SECS: u32 = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrillIntent {
    Type(String),
    /// Carries the question the user was looking at when they pressed submit.
    Submit { question: usize },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrillOutcome {
    Continue,
    Completed(SessionResult),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrillScreenVm {
    pub question_index: usize,
    pub counter_label: String,
    pub timer_label: String,
    pub progress_pct: u32,
    pub prompt: String,
    pub input: String,
    pub running_low: bool,
    pub completed: bool,
}

pub struct DrillVm<S: TickScheduler = TokioTicker> {
    controller: DrillController<S>,
    ticks: Option<TickReceiver>,
}

impl<S: TickScheduler> DrillVm<S> {
    #[must_use]
    pub fn new(controller: DrillController<S>, ticks: TickReceiver) -> Self {
        Self {
            controller,
            ticks: Some(ticks),
        }
    }

    /// Hand the countdown stream to whoever drives the ticks. Only the first call gets it.
    pub fn take_ticks(&mut self) -> Option<TickReceiver> {
        self.ticks.take()
    }

    pub fn set_on_finish(&mut self, handler: impl FnOnce(&SessionResult) + 'static) {
        self.controller.set_on_finish(handler);
    }

    pub fn dispatch(&mut self, intent: DrillIntent) -> DrillOutcome {
        match intent {
            DrillIntent::Type(raw) => self.controller.set_input(sanitize_numeric_input(&raw)),
            DrillIntent::Submit { question } => {
                self.controller.submit_question(question);
            }
        }
        self.outcome()
    }

    pub fn on_tick(&mut self, tick: TimerTick) -> DrillOutcome {
        self.controller.on_tick(tick);
        self.outcome()
    }

    pub fn abandon(&mut self) {
        self.controller.abandon();
    }

    #[must_use]
    pub fn screen(&self) -> DrillScreenVm {
        let snapshot = self.controller.snapshot();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let progress_pct = (snapshot.progress * 100.0).round().clamp(0.0, 100.0) as u32;
        DrillScreenVm {
            question_index: snapshot.question_number.saturating_sub(1),
            counter_label: format!("Question {} / {}", snapshot.question_number, snapshot.total),
            timer_label: format_countdown(snapshot.seconds_remaining),
            progress_pct,
            prompt: snapshot.prompt.unwrap_or_default(),
            input: snapshot.input,
            running_low: !snapshot.completed && snapshot.seconds_remaining <= RUNNING_LOW_SECS,
            completed: snapshot.completed,
        }
    }

    fn outcome(&self) -> DrillOutcome {
        match self.controller.result() {
            Some(result) => DrillOutcome::Completed(result.clone()),
            None => DrillOutcome::Continue,
        }
    }
}

/// # Errors
///
/// Returns `ViewError::InvalidConfig` if the drill cannot be built from `config`.
pub fn start_drill(service: &DrillService, config: DrillConfig) -> Result<DrillVm, ViewError> {
    let (controller, ticks) = service.start(config).map_err(|err| {
        tracing::warn!(%err, "drill failed to start");
        ViewError::from(&err)
    })?;
    Ok(DrillVm::new(controller, ticks))
}

impl From<&DrillServiceError> for ViewError {
    fn from(err: &DrillServiceError) -> Self {
        match err {
            DrillServiceError::Config(_) | DrillServiceError::QuestionCountMismatch { .. } => {
                ViewError::InvalidConfig
            }
            _ => ViewError::Unknown,
        }
    }
}

/// Read the seconds-per-question field. Blank or unusable text falls back to
/// the one-second minimum; fractions are truncated.
#[must_use]
pub fn parse_seconds_input(raw: &str) -> u32 {
    let value = raw.trim().parse::<f64>().unwrap_or(0.0);
    if !value.is_finite() || value < 1.0 {
        return clamp_seconds(0);
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let seconds = value.min(f64::from(u32::MAX)) as u32;
    clamp_seconds(seconds)
}
