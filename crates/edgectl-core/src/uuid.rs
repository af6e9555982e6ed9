//! Identity helpers shared by every persisted model.

use ::uuid::Uuid;

/// Generates a fresh random (v4) identity in hyphenated form.
pub fn new() -> String {
    Uuid::new_v4().to_string()
}

/// Returns true if `id` is a hyphenated UUID.
pub fn is_valid(id: &str) -> bool {
    id.len() == 36 && Uuid::parse_str(id).is_ok()
}
