use crate::foundation::error::{CuetrackError, CuetrackResult};

pub use kurbo::{Affine, Rect, Vec2};

/// Half-open frame range `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    /// First frame in the range.
    pub start: i64,
    /// First frame past the range.
    pub end: i64, // exclusive
}

impl FrameRange {
    /// Build a range, rejecting `start > end`.
    pub fn new(start: i64, end: i64) -> CuetrackResult<Self> {
        if start > end {
            return Err(CuetrackError::validation("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Number of frames covered.
    pub fn len_frames(self) -> u64 {
        self.end.saturating_sub(self.start).max(0) as u64
    }

    /// `true` when the range covers no frames.
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// `true` when `f` lies inside `[start, end)`.
    pub fn contains(self, f: i64) -> bool {
        self.start <= f && f < self.end
    }

    /// `true` when `other` lies entirely inside this range.
    pub fn covers(self, other: FrameRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Iterate every frame in the range.
    pub fn frames(self) -> std::ops::Range<i64> {
        self.start..self.end
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
