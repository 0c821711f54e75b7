//! Seconds to frame conversion for editor exports.

/// Frame count the editor adds to every timestamp of a sequence that starts at
/// `01:00:00:00` (one hour at 23.976 fps). Frame values at or beyond it are shifted back.
///
/// This is a quirk of the upstream export format and is only ever subtracted once.
pub const VIDEO_OFFSET: i64 = 86_313;

/// Convert editor seconds into an integer frame index at `fps`.
pub fn to_frames(seconds: f64, fps: f64) -> i64 {
    let frames = (seconds * fps).round() as i64;
    if frames >= VIDEO_OFFSET {
        frames - VIDEO_OFFSET
    } else {
        frames
    }
}

/// Convert a frame index back into seconds at `fps`. No offset is applied.
pub fn to_seconds(frames: i64, fps: f64) -> f64 {
    frames as f64 / fps
}

#[cfg(test)]
#[path = "../../tests/unit/timing/timecode.rs"]
mod tests;
