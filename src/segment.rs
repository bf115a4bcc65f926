/// Data structures for saved video segments
use crate::canonical::with_timestamp;
use crate::error::{Result, SegmentError};
use crate::format::format_duration;
use serde::{Deserialize, Serialize};

/// Longest accepted segment name, in characters
pub const MAX_NAME_LEN: usize = 100;

/// A named time range of a video
///
/// Serialized with the field names the extension has always stored:
/// `{"name", "url", "startMs", "endMs"}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub name: String,
    /// Canonical URL, no `t`/`start` parameter
    pub url: String,
    pub start_ms: i64,
    pub end_ms: i64,
}

impl Segment {
    pub fn new(name: String, url: String, start_ms: i64, end_ms: i64) -> Segment {
        Segment {
            name,
            url,
            start_ms,
            end_ms,
        }
    }

    /// Length in whole seconds; negative when the end was set before the start
    pub fn duration_seconds(&self) -> i64 {
        (self.end_ms - self.start_ms) / 1000
    }

    /// `[M:SS]` label shown next to the segment name
    pub fn duration_label(&self) -> String {
        let seconds = self.duration_seconds();
        if seconds < 0 {
            format!("[-{}]", format_duration(seconds.unsigned_abs()))
        } else {
            format!("[{}]", format_duration(seconds as u64))
        }
    }

    /// Link that opens the video at the start of this segment
    pub fn start_link(&self) -> Result<String> {
        let seconds = (self.start_ms.max(0) / 1000) as u64;
        with_timestamp(&self.url, seconds)
    }
}

/// Trim a user-supplied name and check it is 1..=100 characters
pub fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(SegmentError::EmptyName);
    }

    let len = trimmed.chars().count();
    if len > MAX_NAME_LEN {
        return Err(SegmentError::NameTooLong(len));
    }

    Ok(trimmed.to_string())
}

/// Milliseconds of a new segment's start or length
///
/// Must be finite, non-negative and small enough that the millisecond count
/// fits in an `i64`.
pub fn offset_ms(seconds: f64) -> Result<i64> {
    let ms = (seconds * 1000.0).floor();
    if !seconds.is_finite() || seconds < 0.0 || ms >= i64::MAX as f64 {
        return Err(SegmentError::InvalidTime(seconds));
    }
    Ok(ms as i64)
}

/// Convert fractional seconds to whole milliseconds, rounding down
pub fn seconds_to_ms(seconds: f64) -> i64 {
    if seconds.is_finite() {
        (seconds * 1000.0).floor() as i64
    } else {
        0
    }
}
