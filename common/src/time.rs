// Time types and system clock helpers.
//
// Escrow operations never read the clock themselves: `now` is always an
// explicit parameter so outcomes stay reproducible under test. The helper
// below exists for callers (CLI, logging) that need a real wall-clock value
// to pass in.

use std::time::{SystemTime, UNIX_EPOCH};

// Seconds timestamps used to determine it using its type
pub type TimestampSeconds = u64;

// Return the system clock as seconds since the Unix epoch
#[inline]
pub fn get_current_time_in_seconds() -> TimestampSeconds {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock is before the Unix epoch")
        .as_secs()
}
