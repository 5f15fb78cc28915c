//! Epoch-millisecond clock helpers.

use jiff::Timestamp;

/// Returns the current wall-clock time as milliseconds since the Unix epoch.
///
/// Execution records carry `startedAt`/`finishedAt` in this representation
/// on the wire and in snapshots.
pub fn epoch_millis_now() -> i64 {
    Timestamp::now().as_millisecond()
}
