//! Opaque record id generation.

use uuid::Uuid;

/// Returns a fresh opaque id for a stored record.
///
/// Ids are unique random strings; callers must not rely on their shape
/// beyond equality comparison.
pub fn new_record_id() -> String {
    Uuid::new_v4().simple().to_string()
}
