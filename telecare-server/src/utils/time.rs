//! Timestamp helpers

use chrono::Utc;

/// Current wall-clock time as unix milliseconds (the storage and wire unit)
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
