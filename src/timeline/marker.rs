use crate::timing::timecode::to_frames;

/// Marker as it appears in the editor export (seconds).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RawMarker {
    pub start: f64,
    pub end: f64,
}

/// Frame-range annotation. A marker that covers a clip forces a line break there.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Marker {
    pub start: i64,
    pub end: i64,
}

impl Marker {
    pub fn from_raw(raw: &RawMarker, fps: f64) -> Self {
        Self {
            start: to_frames(raw.start, fps),
            end: to_frames(raw.end, fps),
        }
    }

    /// `true` when `[start, end)` lies entirely inside the marker.
    pub fn covers(self, start: i64, end: i64) -> bool {
        self.start <= start && end <= self.end
    }
}
