use std::path::Path;

use anyhow::Context as _;

use crate::{
    foundation::error::{CuetrackError, CuetrackResult},
    midi::extract::{LoopSpec, MidiEvent, MidiMessage, MidiNote, extract_notes},
};

/// Note events of a Standard MIDI File, one event list per track.
#[derive(Clone, Debug, PartialEq)]
pub struct MidiFile {
    pub ticks_per_beat: u16,
    pub tracks: Vec<Vec<MidiEvent>>,
    /// First tempo meta event in the file, in microseconds per beat.
    pub tempo_us_per_beat: Option<u32>,
}

impl MidiFile {
    pub fn from_path(path: impl AsRef<Path>) -> CuetrackResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).with_context(|| format!("read midi '{}'", path.display()))?;
        Self::parse(&bytes)
    }

    /// Parse a metrical-time Standard MIDI File.
    pub fn parse(bytes: &[u8]) -> CuetrackResult<Self> {
        let smf = midly::Smf::parse(bytes).map_err(|e| CuetrackError::midi(e.to_string()))?;
        let ticks_per_beat = match smf.header.timing {
            midly::Timing::Metrical(tpb) => tpb.as_int(),
            midly::Timing::Timecode(..) => {
                return Err(CuetrackError::midi("SMPTE timecode timing is not supported"));
            }
        };

        let mut tempo_us_per_beat = None;
        let tracks = smf
            .tracks
            .iter()
            .map(|track| {
                track
                    .iter()
                    .map(|ev| {
                        let message = match ev.kind {
                            midly::TrackEventKind::Midi {
                                message: midly::MidiMessage::NoteOn { key, vel },
                                ..
                            } => MidiMessage::NoteOn {
                                note: key.as_int(),
                                velocity: vel.as_int(),
                            },
                            midly::TrackEventKind::Midi {
                                message: midly::MidiMessage::NoteOff { key, vel },
                                ..
                            } => MidiMessage::NoteOff {
                                note: key.as_int(),
                                velocity: vel.as_int(),
                            },
                            midly::TrackEventKind::Meta(midly::MetaMessage::Tempo(t)) => {
                                tempo_us_per_beat.get_or_insert(t.as_int());
                                MidiMessage::Other
                            }
                            _ => MidiMessage::Other,
                        };
                        MidiEvent {
                            delta_ticks: ev.delta.as_int(),
                            message,
                        }
                    })
                    .collect()
            })
            .collect();

        Ok(Self {
            ticks_per_beat,
            tracks,
            tempo_us_per_beat,
        })
    }

    /// Tempo from the file, if it declares one.
    pub fn tempo_bpm(&self) -> Option<f64> {
        self.tempo_us_per_beat
            .filter(|us| *us > 0)
            .map(|us| 60_000_000.0 / f64::from(us))
    }

    /// Extract the notes of track `index`.
    pub fn track(
        &self,
        index: usize,
        bpm: f64,
        fps: f64,
        looping: Option<LoopSpec>,
    ) -> CuetrackResult<MidiTrack> {
        let events = self.tracks.get(index).ok_or_else(|| {
            CuetrackError::validation(format!(
                "midi track {index} out of range ({} tracks)",
                self.tracks.len()
            ))
        })?;
        Ok(MidiTrack::new(extract_notes(
            events,
            self.ticks_per_beat,
            bpm,
            fps,
            looping,
        )?))
    }
}

/// Frame-ranged notes of one performance.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct MidiTrack {
    pub notes: Vec<MidiNote>,
}

impl MidiTrack {
    pub fn new(notes: Vec<MidiNote>) -> Self {
        Self { notes }
    }

    /// Notes sounding at `frame`.
    pub fn notes_at(&self, frame: i64) -> Vec<&MidiNote> {
        self.notes
            .iter()
            .filter(|n| n.start <= frame && frame < n.end)
            .collect()
    }

    pub fn active(&self, frame: i64, note: u8) -> Option<&MidiNote> {
        self.notes
            .iter()
            .find(|n| n.note == note && n.start <= frame && frame < n.end)
    }

    /// 0..1 envelope over the notes accepted by `filter`.
    ///
    /// Ramps up over `attack` frames before a note starts, holds at 1 while it sounds and
    /// decays over `release` frames after it ends. Overlapping notes take the maximum.
    pub fn envelope<F>(&self, frame: i64, filter: F, attack: u32, release: u32) -> f64
    where
        F: Fn(&MidiNote) -> bool,
    {
        self.notes
            .iter()
            .filter(|n| filter(n))
            .map(|n| {
                if n.start <= frame && frame < n.end {
                    1.0
                } else if frame < n.start {
                    let until = (n.start - frame) as f64;
                    if attack == 0 {
                        0.0
                    } else {
                        1.0 - until / f64::from(attack)
                    }
                } else {
                    let since = (frame - n.end) as f64;
                    if release == 0 {
                        0.0
                    } else {
                        1.0 - since / f64::from(release)
                    }
                }
            })
            .fold(0.0, f64::max)
            .clamp(0.0, 1.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/midi/track.rs"]
mod tests;
