//! Small shared utilities
//!
//! All timestamps cross the repository boundary as `i64` Unix milliseconds;
//! conversion to calendar types happens at the presentation edge.

use chrono::Utc;

/// Current wall-clock time as Unix milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
