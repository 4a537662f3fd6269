use chrono::{Duration, NaiveDateTime};
use rand::Rng;

/// Draw a fresh 4-digit one-time password.
pub fn generate() -> String {
    rand::rng().random_range(1000..10000).to_string()
}

/// An OTP issued at `issued_at` is valid up to and including
/// `issued_at + validity_minutes`.
pub fn is_expired(issued_at: NaiveDateTime, now: NaiveDateTime, validity_minutes: i64) -> bool {
    now > issued_at + Duration::minutes(validity_minutes)
}

/// Compare a submitted code with the stored one, ignoring case and
/// surrounding whitespace.
pub fn matches(stored: &str, submitted: &str) -> bool {
    stored.trim().eq_ignore_ascii_case(submitted.trim())
}
