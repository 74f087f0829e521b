//! Coarse relative timestamps for job cards.

use crate::types::Timestamp;

const SECS_PER_MINUTE: i64 = 60;
const MINUTES_PER_HOUR: i64 = 60;
const HOURS_PER_DAY: i64 = 24;

/// Format the time elapsed between `then` and `now`.
///
/// Uses the coarsest unit whose threshold is not exceeded: `"42s ago"`,
/// `"5m ago"`, `"3h ago"`, `"2d ago"`. Values are floored. A `then` in the
/// future counts as zero elapsed.
pub fn time_ago(then: Timestamp, now: Timestamp) -> String {
    let seconds = (now - then).num_seconds().max(0);
    if seconds < SECS_PER_MINUTE {
        return format!("{seconds}s ago");
    }
    let minutes = seconds / SECS_PER_MINUTE;
    if minutes < MINUTES_PER_HOUR {
        return format!("{minutes}m ago");
    }
    let hours = minutes / MINUTES_PER_HOUR;
    if hours < HOURS_PER_DAY {
        return format!("{hours}h ago");
    }
    format!("{}d ago", hours / HOURS_PER_DAY)
}
