use crate::{
    animation::{
        looping::{Easing, fold},
        time::AnimationTime,
    },
    foundation::core::FrameRange,
    foundation::error::{CuetrackError, CuetrackResult},
};

/// Global frame duration, frame rate, keyframe storyboard and active work-ranges.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Timeline {
    pub fps: f64,
    /// Total frames; always `round(duration)` of the value given at construction.
    pub duration: i64,
    /// Sorted, deduplicated, never empty.
    pub storyboard: Vec<i64>,
    pub workareas: Vec<FrameRange>,
}

impl Default for Timeline {
    fn default() -> Self {
        Self {
            fps: 30.0,
            duration: 1,
            storyboard: vec![0],
            workareas: Vec::new(),
        }
    }
}

impl Timeline {
    /// Build a timeline of `duration` frames with the default `[0]` storyboard.
    pub fn new(duration: f64, fps: f64) -> CuetrackResult<Self> {
        Self::with_parts(duration, fps, Vec::new(), Vec::new())
    }

    pub fn with_parts(
        duration: f64,
        fps: f64,
        storyboard: Vec<i64>,
        workareas: Vec<FrameRange>,
    ) -> CuetrackResult<Self> {
        if !(fps.is_finite() && fps > 0.0) {
            return Err(CuetrackError::validation("fps must be finite and > 0"));
        }
        if !duration.is_finite() || duration < 0.0 {
            return Err(CuetrackError::validation(
                "duration must be finite and >= 0",
            ));
        }
        let mut storyboard = storyboard;
        storyboard.sort_unstable();
        storyboard.dedup();
        if storyboard.is_empty() {
            storyboard.push(0);
        }
        Ok(Self {
            fps,
            duration: duration.round() as i64,
            storyboard,
            workareas,
        })
    }

    pub fn start(&self) -> i64 {
        0
    }

    /// First frame past the timeline.
    pub fn end(&self) -> i64 {
        self.duration
    }

    pub fn contains(&self, frame: i64) -> bool {
        (0..self.duration).contains(&frame)
    }

    pub fn is_storyboard(&self, frame: i64) -> bool {
        self.storyboard.binary_search(&frame).is_ok()
    }

    /// Every frame inside a work-range, or the whole timeline when there are none.
    pub fn workarea_frames(&self) -> Vec<i64> {
        if self.workareas.is_empty() {
            return (0..self.duration).collect();
        }
        let mut frames: Vec<i64> = self
            .workareas
            .iter()
            .flat_map(|r| r.frames())
            .filter(|f| self.contains(*f))
            .collect();
        frames.sort_unstable();
        frames.dedup();
        frames
    }

    /// Progress of `frame` through the timeline, optionally folded `loops` times.
    pub fn progress(
        &self,
        frame: i64,
        loops: u32,
        cyclic: bool,
        easing: Easing,
    ) -> CuetrackResult<AnimationTime> {
        easing.validate()?;
        if self.duration <= 0 {
            return Err(CuetrackError::validation(
                "progress requires a timeline with duration > 0",
            ));
        }
        let t = frame as f64 / self.duration as f64;
        if loops == 0 {
            return Ok(AnimationTime::new(t, t, 0, easing));
        }
        let (loop_t, loop_index) = fold(t, loops, cyclic);
        Ok(AnimationTime::new(t, loop_t, loop_index, easing))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/model.rs"]
mod tests;
