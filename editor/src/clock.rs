//! `HH:MM` clock strings
//!
//! User-facing time entry. Unlike the lenient stored-field decoding in
//! [`crate::trigger`], a malformed clock string is rejected.

use crate::config::SECONDS_PER_DAY;
use crate::error::{AppError, Result};
use chrono::NaiveTime;

/// Parse `HH:MM` into seconds since midnight.
///
/// Each part is one or two digits (`8:5` is 08:05); hours must be below 24
/// and minutes below 60.
pub fn parse_clock(input: &str) -> Result<u32> {
    let invalid = || AppError::InvalidInput(format!("time must be HH:MM, got {:?}", input));

    let (hours, minutes) = input.trim().split_once(':').ok_or_else(invalid)?;
    let hours = parse_part(hours).ok_or_else(invalid)?;
    let minutes = parse_part(minutes).ok_or_else(invalid)?;

    if hours >= 24 || minutes >= 60 {
        return Err(invalid());
    }

    Ok(hours * 3600 + minutes * 60)
}

fn parse_part(part: &str) -> Option<u32> {
    let part = part.trim();
    if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Render seconds since midnight as zero-padded `HH:MM`
pub fn format_clock(seconds: u32) -> String {
    if seconds < SECONDS_PER_DAY {
        if let Some(time) = NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0) {
            return time.format("%H:%M").to_string();
        }
    }

    // Out-of-range stored values still get a readable rendering
    format!("{:02}:{:02}", seconds / 3600, (seconds % 3600) / 60)
}
