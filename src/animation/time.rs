use crate::{
    animation::{ease::EasingRegistry, looping::Easing},
    foundation::error::CuetrackResult,
};

/// Progress of one frame through a timeline: raw, folded, and which half-cycle it is in.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct AnimationTime {
    /// Linear progress `frame / duration`.
    pub t: f64,
    /// Progress after looping; equals `t` when no loops were requested.
    pub loop_t: f64,
    /// Half-cycle index (0 when not looping).
    pub loop_index: u64,
    pub easing: Easing,
}

impl AnimationTime {
    pub fn new(t: f64, loop_t: f64, loop_index: u64, easing: Easing) -> Self {
        Self {
            t,
            loop_t,
            loop_index,
            easing,
        }
    }

    /// The folded progress passed through the easing chosen for this half-cycle.
    pub fn eased(&self, registry: &EasingRegistry) -> CuetrackResult<f64> {
        self.easing.apply(registry, self.loop_index, self.loop_t)
    }

    /// Interpolate from `a` to `b` using [`AnimationTime::eased`].
    pub fn lerp(&self, registry: &EasingRegistry, a: f64, b: f64) -> CuetrackResult<f64> {
        let e = self.eased(registry)?;
        Ok(a + (b - a) * e)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/time.rs"]
mod tests;
