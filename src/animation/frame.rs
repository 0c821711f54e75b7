use std::{collections::BTreeMap, path::PathBuf};

use crate::{
    animation::{looping::Easing, time::AnimationTime},
    foundation::core::Rect,
    foundation::error::{CuetrackError, CuetrackResult},
    timeline::model::Timeline,
};

/// A renderable animation: output rectangle, timeline and named layers.
#[derive(Clone, Debug)]
pub struct Animation {
    pub rect: Rect,
    pub timeline: Timeline,
    /// Layer names, rendered in order.
    pub layers: Vec<String>,
}

impl Default for Animation {
    fn default() -> Self {
        Self {
            rect: Rect::new(0.0, 0.0, 1080.0, 1080.0),
            timeline: Timeline::default(),
            layers: vec!["main".to_string()],
        }
    }
}

impl Animation {
    pub fn new(rect: Rect, timeline: Timeline) -> Self {
        Self {
            rect,
            timeline,
            ..Self::default()
        }
    }

    pub fn with_layers<I, S>(mut self, layers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.layers = layers.into_iter().map(Into::into).collect();
        self
    }

    /// See [`Timeline::progress`].
    pub fn progress(
        &self,
        frame: i64,
        loops: u32,
        cyclic: bool,
        easing: Easing,
    ) -> CuetrackResult<AnimationTime> {
        self.timeline.progress(frame, loops, cyclic, easing)
    }

    /// Start a frame value for `index`, with one empty artifact slot per layer.
    pub fn frame<A>(&self, index: i64) -> CuetrackResult<AnimationFrame<'_, A>> {
        if !self.timeline.contains(index) {
            return Err(CuetrackError::validation(format!(
                "frame {index} is outside the timeline (0..{})",
                self.timeline.duration
            )));
        }
        Ok(AnimationFrame {
            index,
            animation: self,
            layers: self
                .layers
                .iter()
                .map(|name| (name.clone(), Vec::new()))
                .collect(),
            filepaths: BTreeMap::new(),
        })
    }
}

/// One rendered frame. Produced per frame and dropped after use.
#[derive(Debug)]
pub struct AnimationFrame<'a, A> {
    pub index: i64,
    pub animation: &'a Animation,
    /// Artifacts per layer name.
    pub layers: BTreeMap<String, Vec<A>>,
    /// Output paths keyed by layer name; consulted by callers deciding what to re-render.
    pub filepaths: BTreeMap<String, PathBuf>,
}

impl<A> AnimationFrame<'_, A> {
    /// Progress of this frame; see [`Timeline::progress`].
    pub fn progress(
        &self,
        loops: u32,
        cyclic: bool,
        easing: Easing,
    ) -> CuetrackResult<AnimationTime> {
        self.animation.progress(self.index, loops, cyclic, easing)
    }

    /// Append artifacts to a layer. Unknown layers are rejected.
    pub fn push(
        &mut self,
        layer: &str,
        artifacts: impl IntoIterator<Item = A>,
    ) -> CuetrackResult<()> {
        let slot = self
            .layers
            .get_mut(layer)
            .ok_or_else(|| CuetrackError::validation(format!("unknown layer '{layer}'")))?;
        slot.extend(artifacts);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/frame.rs"]
mod tests;
