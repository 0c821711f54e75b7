//! cuetrack turns an externally authored timeline into per-frame animation state.
//!
//! Two kinds of input are supported: a non-linear editor's clip/marker export (JSON) and a
//! MIDI performance. Both are reduced to integer frame ranges so a renderer can ask, one
//! frame at a time, what should be on screen.
//!
//! # Pipeline overview
//!
//! 1. **Load**: `TimelineExport -> EditTimeline` parses clip names into typed clips and
//!    groups them per track between clear-screen breaks.
//! 2. **Query**: [`EditTimeline::group_at`] positions the active [`ClipGroup`] for a frame
//!    (before/current/after, join chains, style overlays).
//! 3. **Lay out**: [`ClipGroup::pens`] renders clips through a caller callback and places
//!    the results line by line, optionally memoized in a [`PenCache`].
//! 4. **Remap time**: [`Timeline::progress`] and [`loop_progress`] turn a frame index into
//!    looped, eased progress.
//!
//! MIDI input goes through [`extract_notes`] / [`MidiFile`] to frame-ranged [`MidiNote`]s.
//!
//! All queries are synchronous. Group queries mutate clip state in place and need external
//! synchronization if shared across threads.
#![forbid(unsafe_code)]

mod animation;
mod foundation;
mod layout;
mod midi;
mod timeline;
mod timing;

pub use animation::ease::{Ease, EaseFn, EasingRegistry, ease};
pub use animation::frame::{Animation, AnimationFrame};
pub use animation::looping::{Easing, fold, loop_progress};
pub use animation::time::AnimationTime;
pub use foundation::core::{Affine, FrameRange, Rect, Vec2};
pub use foundation::error::{CuetrackError, CuetrackResult};
pub use layout::cache::{GroupPens, PenCache};
pub use layout::paragraph::{AlignX, AlignY, ParagraphStyle, Pen, PlacedClip, layout_paragraph};
pub use midi::extract::{LoopSpec, MidiEvent, MidiMessage, MidiNote, extract_notes};
pub use midi::track::{MidiFile, MidiTrack};
pub use timeline::clip::{
    Clip, ClipFlag, ClipType, ClipWarning, DEFAULT_FADE_FRAMES, Position, RawClip,
    TRANSFORM_DELIMITER, Transform, TransformValue, classify, parse_transform,
};
pub use timeline::export::{
    EditTimeline, ExportMetadata, ExportTrack, StoryboardEntry, TimelineExport, Track,
};
pub use timeline::group::{ClipGroup, Lines, group_clips};
pub use timeline::marker::{Marker, RawMarker};
pub use timeline::model::Timeline;
pub use timing::timecode::{VIDEO_OFFSET, to_frames, to_seconds};
