use chrono::Duration;

/// `m:ss`, negative durations read as zero.
#[must_use]
pub fn format_elapsed(value: Duration) -> String {
    let total = value.num_seconds().max(0);
    let minutes = total / 60;
    let seconds = total % 60;
    format!("{minutes}:{seconds:02}")
}

#[must_use]
pub fn format_countdown(seconds: u32) -> String {
    format!("Time: {seconds}s")
}
