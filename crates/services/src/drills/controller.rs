use std::fmt;
use std::time::Duration;

use drill_core::Clock;
use drill_core::drill::{Drill, DrillEffect, DrillEvent, DrillSnapshot};
use drill_core::model::{AnswerRecord, SessionResult};
use tokio::sync::mpsc;

use crate::timer::{
    TickReceiver, TickScheduler, TickSender, TimerHandle, TimerTick, TokioTicker,
};

type FinishHandler = Box<dyn FnOnce(&SessionResult)>;

/// Runs one drill: feeds events into the state machine and carries out the
/// effects it asks for.
///
/// The controller owns the single armed countdown. It is cancelled before the
/// next one is armed, when the drill finishes, on [`abandon`](Self::abandon),
/// and when the controller is dropped.
pub struct DrillController<S: TickScheduler = TokioTicker> {
    drill: Drill,
    clock: Clock,
    scheduler: S,
    timer: Option<S::Handle>,
    ticks: Option<TickSender>,
    tick_period: Duration,
    on_finish: Option<FinishHandler>,
    abandoned: bool,
}

impl<S: TickScheduler> DrillController<S> {
    pub(crate) fn start(
        drill: Drill,
        clock: Clock,
        scheduler: S,
        tick_period: Duration,
    ) -> (Self, TickReceiver) {
        let (ticks, receiver) = mpsc::unbounded_channel();
        let mut controller = Self {
            drill,
            clock,
            scheduler,
            timer: None,
            ticks: Some(ticks),
            tick_period,
            on_finish: None,
            abandoned: false,
        };
        let effects = controller.drill.initial_effects();
        controller.perform(effects);
        (controller, receiver)
    }

    /// Register the completion callback. It runs exactly once, with the final
    /// result; if the drill is already over it runs immediately.
    pub fn set_on_finish(&mut self, handler: impl FnOnce(&SessionResult) + 'static) {
        match self.drill.result() {
            Some(result) => handler(result),
            None => self.on_finish = Some(Box::new(handler)),
        }
    }

    #[must_use]
    pub fn with_on_finish(mut self, handler: impl FnOnce(&SessionResult) + 'static) -> Self {
        self.set_on_finish(handler);
        self
    }

    /// Replace the answer being typed for the current question.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.dispatch(DrillEvent::Input(text.into()));
    }

    /// Submit the current input. Returns the record, or `None` once the drill is over.
    pub fn submit(&mut self) -> Option<AnswerRecord> {
        let question = self.drill.current_index()?;
        self.submit_question(question)
    }

    /// Submit on behalf of the question the user was looking at. If the
    /// countdown already resolved it, this is a no-op returning `None`.
    pub fn submit_question(&mut self, question: usize) -> Option<AnswerRecord> {
        self.dispatch(DrillEvent::Submit { question })
    }

    /// Apply one countdown tick. Returns the record if the tick timed the question out.
    pub fn on_tick(&mut self, tick: TimerTick) -> Option<AnswerRecord> {
        self.dispatch(DrillEvent::Tick {
            question: tick.question,
        })
    }

    /// Tear down mid-drill. No record is written, the callback never runs,
    /// and every later event is ignored.
    pub fn abandon(&mut self) {
        if !self.drill.is_complete() {
            tracing::info!(
                answered = self.drill.records().len(),
                total = self.drill.total(),
                "drill abandoned"
            );
        }
        self.cancel_timer();
        self.ticks = None;
        self.on_finish = None;
        self.abandoned = true;
    }

    #[must_use]
    pub fn snapshot(&self) -> DrillSnapshot {
        self.drill.snapshot()
    }

    #[must_use]
    pub fn drill(&self) -> &Drill {
        &self.drill
    }

    #[must_use]
    pub fn result(&self) -> Option<&SessionResult> {
        self.drill.result()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.drill.is_complete()
    }

    #[must_use]
    pub fn has_armed_timer(&self) -> bool {
        self.timer.as_ref().is_some_and(TimerHandle::is_active)
    }

    #[must_use]
    pub fn is_abandoned(&self) -> bool {
        self.abandoned
    }

    fn dispatch(&mut self, event: DrillEvent) -> Option<AnswerRecord> {
        if self.abandoned {
            return None;
        }
        let effects = self.drill.apply(event, self.clock.now());
        self.perform(effects)
    }

    fn perform(&mut self, effects: Vec<DrillEffect>) -> Option<AnswerRecord> {
        let mut recorded = None;
        for effect in effects {
            match effect {
                DrillEffect::RestartTimer { question, seconds } => {
                    self.cancel_timer();
                    if let Some(ticks) = &self.ticks {
                        tracing::trace!(question, seconds, "starting countdown");
                        self.timer =
                            Some(self.scheduler.arm(question, self.tick_period, ticks.clone()));
                    }
                }
                DrillEffect::CancelTimer => self.cancel_timer(),
                DrillEffect::Recorded(record) => {
                    tracing::debug!(
                        prompt = %record.prompt,
                        correct = record.correct,
                        resolution = ?record.resolution,
                        "answer recorded"
                    );
                    recorded = Some(record);
                }
                DrillEffect::Finished(result) => {
                    tracing::info!(
                        score = result.score(),
                        total = result.total(),
                        timed_out = result.timed_out_count(),
                        "drill finished"
                    );
                    self.ticks = None;
                    if let Some(handler) = self.on_finish.take() {
                        handler(&result);
                    }
                }
            }
        }
        recorded
    }

    fn cancel_timer(&mut self) {
        if let Some(mut timer) = self.timer.take() {
            timer.cancel();
        }
    }
}

impl<S: TickScheduler> Drop for DrillController<S> {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}

impl<S: TickScheduler> fmt::Debug for DrillController<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrillController")
            .field("current", &self.drill.current_index())
            .field("total", &self.drill.total())
            .field("records_len", &self.drill.records().len())
            .field("timer_armed", &self.has_armed_timer())
            .field("on_finish", &self.on_finish.is_some())
            .field("abandoned", &self.abandoned)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
