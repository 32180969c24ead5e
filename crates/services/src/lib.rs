#![forbid(unsafe_code)]

pub mod drills;
pub mod error;
pub mod timer;

pub use drill_core::Clock;

pub use drills::{DrillController, DrillService};
pub use error::DrillServiceError;
pub use timer::{
    ManualTicker, TICK_PERIOD, TickReceiver, TickScheduler, TimerHandle, TimerLog, TimerTick,
    TokioTicker,
};
