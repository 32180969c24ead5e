mod drill_vm;
mod review_vm;
mod time_fmt;

pub use drill_vm::{
    DrillIntent, DrillOutcome, DrillScreenVm, DrillVm, parse_seconds_input, start_drill,
};
pub use review_vm::{ReviewRowVm, ReviewVm};
pub use time_fmt::{format_countdown, format_elapsed};
