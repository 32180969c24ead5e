//! Countdown tick sources.
//!
//! A drill owns at most one armed timer. Arming returns a [`TimerHandle`];
//! cancelling or dropping the handle stops the ticks for good, so a timer
//! armed for one question can never reach the next.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

/// Real-time spacing between countdown ticks.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// One elapsed period of the countdown armed for `question`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerTick {
    pub question: usize,
}

pub type TickSender = mpsc::UnboundedSender<TimerTick>;
pub type TickReceiver = mpsc::UnboundedReceiver<TimerTick>;

pub trait TimerHandle {
    /// Stop delivering ticks. Calling it twice is harmless.
    fn cancel(&mut self);

    fn is_active(&self) -> bool;
}

pub trait TickScheduler {
    type Handle: TimerHandle;

    /// Start sending a [`TimerTick`] for `question` every `period`, the first
    /// one a full period from now.
    fn arm(&mut self, question: usize, period: Duration, ticks: TickSender) -> Self::Handle;
}

//
// ─── TOKIO ─────────────────────────────────────────────────────────────────────
//

/// Spawns one tokio task per armed countdown.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTicker;

#[derive(Debug)]
pub struct TokioTimer {
    question: usize,
    task: Option<JoinHandle<()>>,
}

impl TickScheduler for TokioTicker {
    type Handle = TokioTimer;

    fn arm(&mut self, question: usize, period: Duration, ticks: TickSender) -> TokioTimer {
        let task = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if ticks.send(TimerTick { question }).is_err() {
                    break;
                }
            }
        });
        tracing::trace!(question, "countdown armed");
        TokioTimer {
            question,
            task: Some(task),
        }
    }
}

impl TimerHandle for TokioTimer {
    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::trace!(question = self.question, "countdown cancelled");
        }
    }

    fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for TokioTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

//
// ─── MANUAL ────────────────────────────────────────────────────────────────────
//

/// Arm/cancel history kept by [`ManualTicker`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimerLog {
    pub armed: Vec<usize>,
    pub cancelled: Vec<usize>,
}

/// Scheduler that never ticks on its own. Callers feed ticks by hand and
/// inspect the [`TimerLog`] to see what was armed and cancelled.
#[derive(Debug, Clone, Default)]
pub struct ManualTicker {
    log: Rc<RefCell<TimerLog>>,
}

impl ManualTicker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn log(&self) -> TimerLog {
        self.log.borrow().clone()
    }

    /// Questions whose countdown was armed and not yet cancelled.
    #[must_use]
    pub fn active(&self) -> Vec<usize> {
        let log = self.log.borrow();
        let mut cancelled = log.cancelled.clone();
        log.armed
            .iter()
            .copied()
            .filter(|question| {
                if let Some(pos) = cancelled.iter().position(|c| c == question) {
                    cancelled.swap_remove(pos);
                    false
                } else {
                    true
                }
            })
            .collect()
    }
}

#[derive(Debug)]
pub struct ManualTimer {
    question: usize,
    active: bool,
    log: Rc<RefCell<TimerLog>>,
}

impl TickScheduler for ManualTicker {
    type Handle = ManualTimer;

    fn arm(&mut self, question: usize, _period: Duration, _ticks: TickSender) -> ManualTimer {
        self.log.borrow_mut().armed.push(question);
        ManualTimer {
            question,
            active: true,
            log: Rc::clone(&self.log),
        }
    }
}

impl TimerHandle for ManualTimer {
    fn cancel(&mut self) {
        if self.active {
            self.active = false;
            self.log.borrow_mut().cancelled.push(self.question);
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

impl Drop for ManualTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_timer_cancels_once() {
        let mut ticker = ManualTicker::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut timer = ticker.arm(0, TICK_PERIOD, tx);
        assert!(timer.is_active());
        timer.cancel();
        timer.cancel();
        drop(timer);
        assert_eq!(
            ticker.log(),
            TimerLog {
                armed: vec![0],
                cancelled: vec![0],
            }
        );
        assert!(ticker.active().is_empty());
    }

    #[test]
    fn dropping_manual_timer_cancels_it() {
        let mut ticker = ManualTicker::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        let kept = ticker.arm(1, TICK_PERIOD, tx.clone());
        drop(ticker.arm(2, TICK_PERIOD, tx));
        assert_eq!(ticker.active(), vec![1]);
        drop(kept);
        assert!(ticker.active().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_timer_ticks_after_each_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timer = TokioTicker.arm(3, TICK_PERIOD, tx);

        let started = Instant::now();
        assert_eq!(rx.recv().await, Some(TimerTick { question: 3 }));
        assert_eq!(started.elapsed(), TICK_PERIOD);
        assert_eq!(rx.recv().await, Some(TimerTick { question: 3 }));
        assert_eq!(started.elapsed(), TICK_PERIOD * 2);

        timer.cancel();
        assert!(!timer.is_active());
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_tokio_timer_closes_the_channel() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let timer = TokioTicker.arm(0, TICK_PERIOD, tx);
        drop(timer);
        assert_eq!(rx.recv().await, None);
    }
}
