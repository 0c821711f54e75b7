use std::path::Path;

use anyhow::Context as _;

use crate::{
    foundation::core::FrameRange,
    foundation::error::{CuetrackError, CuetrackResult},
    timeline::{
        clip::{Clip, RawClip},
        group::{ClipGroup, group_clips},
        marker::{Marker, RawMarker},
        model::Timeline,
    },
    timing::timecode::to_frames,
};

/// Editor export document, as written by the timeline exporter.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimelineExport {
    pub metadata: ExportMetadata,
    #[serde(default)]
    pub storyboard: Vec<StoryboardEntry>,
    #[serde(default)]
    pub tracks: Vec<ExportTrack>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    /// Seconds per frame.
    pub frame_rate: f64,
    pub duration: f64,
    pub timebase: f64,
    #[serde(default)]
    pub in_point: Option<f64>,
    #[serde(default)]
    pub out_point: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StoryboardEntry {
    pub start: f64,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ExportTrack {
    #[serde(default)]
    pub markers: Vec<RawMarker>,
    #[serde(default)]
    pub clips: Vec<RawClip>,
}

/// One lane of the loaded timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Track {
    pub index: usize,
    pub markers: Vec<Marker>,
    pub groups: Vec<ClipGroup>,
}

impl Track {
    /// Index of the group that contains `frame`; with `hold`, the last group already started.
    pub fn group_index_at(&self, frame: i64, hold: bool) -> Option<usize> {
        if hold {
            self.groups.iter().rposition(|g| g.start() <= frame)
        } else {
            self.groups
                .iter()
                .position(|g| g.start() <= frame && frame < g.end())
        }
    }
}

/// A loaded editor export: global timeline plus grouped clips per track.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct EditTimeline {
    pub timeline: Timeline,
    pub tracks: Vec<Track>,
}

impl EditTimeline {
    pub fn from_path(path: impl AsRef<Path>) -> CuetrackResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read timeline export '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> CuetrackResult<Self> {
        let export: TimelineExport =
            serde_json::from_str(text).map_err(|e| CuetrackError::serde(e.to_string()))?;
        Self::from_export(&export)
    }

    /// Build the timeline and group every track. Any malformed clip fails the load.
    #[tracing::instrument(skip(export), fields(tracks = export.tracks.len()))]
    pub fn from_export(export: &TimelineExport) -> CuetrackResult<Self> {
        let meta = &export.metadata;
        if !(meta.frame_rate.is_finite() && meta.frame_rate > 0.0) {
            return Err(CuetrackError::validation(
                "metadata.frameRate must be a positive number of seconds",
            ));
        }
        if !(meta.timebase.is_finite() && meta.timebase > 0.0) {
            return Err(CuetrackError::validation("metadata.timebase must be > 0"));
        }
        let fps = 1.0 / meta.frame_rate;
        let duration = (meta.duration / meta.timebase).round();

        let storyboard = export
            .storyboard
            .iter()
            .map(|s| to_frames(s.start, fps))
            .collect();
        let workareas = match (meta.in_point, meta.out_point) {
            (Some(i), Some(o)) => vec![FrameRange::new(to_frames(i, fps), to_frames(o, fps))?],
            _ => Vec::new(),
        };
        let timeline = Timeline::with_parts(duration, fps, storyboard, workareas)?;

        let mut tracks = Vec::with_capacity(export.tracks.len());
        for (index, raw) in export.tracks.iter().enumerate() {
            let markers: Vec<Marker> = raw
                .markers
                .iter()
                .map(|m| Marker::from_raw(m, fps))
                .collect();
            let clips = raw
                .clips
                .iter()
                .map(|c| Clip::parse(c, fps, &markers, index))
                .collect::<CuetrackResult<Vec<_>>>()?;
            tracks.push(Track {
                index,
                markers,
                groups: group_clips(clips, index),
            });
        }

        Ok(Self { timeline, tracks })
    }

    pub fn track(&self, index: usize) -> CuetrackResult<&Track> {
        self.tracks.get(index).ok_or_else(|| {
            CuetrackError::validation(format!(
                "track {index} out of range ({} tracks)",
                self.tracks.len()
            ))
        })
    }

    /// Position the group of `track` active at `frame` and return it.
    ///
    /// Groups on `style_tracks` act as style overlays. With `hold` the most recently
    /// started group stays active after it ends.
    #[tracing::instrument(skip(self))]
    pub fn group_at(
        &mut self,
        track: usize,
        frame: i64,
        style_tracks: &[usize],
        hold: bool,
    ) -> CuetrackResult<Option<&ClipGroup>> {
        if track >= self.tracks.len() {
            return Err(CuetrackError::validation(format!(
                "track {track} out of range ({} tracks)",
                self.tracks.len()
            )));
        }
        if let Some(bad) = style_tracks.iter().find(|t| **t >= self.tracks.len()) {
            return Err(CuetrackError::validation(format!(
                "style track {bad} out of range ({} tracks)",
                self.tracks.len()
            )));
        }

        let (before, rest) = self.tracks.split_at_mut(track);
        let Some((target, after)) = rest.split_first_mut() else {
            return Ok(None);
        };
        let overlays: Vec<&ClipGroup> = style_tracks
            .iter()
            .filter_map(|&t| match t.cmp(&track) {
                std::cmp::Ordering::Less => before.get(t),
                std::cmp::Ordering::Greater => after.get(t - track - 1),
                std::cmp::Ordering::Equal => None,
            })
            .flat_map(|t| t.groups.iter())
            .collect();

        let Some(gi) = target.group_index_at(frame, hold) else {
            return Ok(None);
        };
        let group = &mut target.groups[gi];
        group.position(frame, &overlays);
        Ok(Some(group))
    }

    /// Every clip warning on every track, with its track and group.
    pub fn warnings(&self) -> impl Iterator<Item = (&Track, &ClipGroup, &Clip)> {
        self.tracks.iter().flat_map(|t| {
            t.groups.iter().flat_map(move |g| {
                g.clips
                    .iter()
                    .filter(|c| !c.warnings.is_empty())
                    .map(move |c| (t, g, c))
            })
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/export.rs"]
mod tests;
