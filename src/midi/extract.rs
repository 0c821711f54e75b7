use std::collections::HashMap;

use crate::{
    foundation::error::{CuetrackError, CuetrackResult},
    timing::timecode::to_frames,
};

/// Channel message relevant to note extraction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum MidiMessage {
    NoteOn { note: u8, velocity: u8 },
    NoteOff { note: u8, velocity: u8 },
    /// Anything else; only its delta time matters.
    Other,
}

/// A message and the ticks elapsed since the previous one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MidiEvent {
    pub delta_ticks: u32,
    pub message: MidiMessage,
}

impl MidiEvent {
    pub fn note_on(delta_ticks: u32, note: u8, velocity: u8) -> Self {
        Self {
            delta_ticks,
            message: MidiMessage::NoteOn { note, velocity },
        }
    }

    pub fn note_off(delta_ticks: u32, note: u8) -> Self {
        Self {
            delta_ticks,
            message: MidiMessage::NoteOff { note, velocity: 0 },
        }
    }
}

/// A sounded note as a frame range `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct MidiNote {
    pub note: u8,
    pub velocity: u8,
    pub start: i64,
    pub end: i64,
}

impl MidiNote {
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }
}

/// Replicate extracted notes to fill a longer loop. Both lengths are in beats.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LoopSpec {
    /// Length of the performance.
    pub length: f64,
    /// Total length to fill; `floor(loop_length / length)` copies including the original.
    pub loop_length: f64,
}

/// Pair note-on/note-off messages into frame-ranged notes.
///
/// A later note-on for the same number replaces an open one; a note-off with nothing open
/// is ignored, as is a note-on that is never closed. A note-on with velocity 0 closes.
#[tracing::instrument(skip(events), fields(events = events.len()))]
pub fn extract_notes(
    events: &[MidiEvent],
    ticks_per_beat: u16,
    bpm: f64,
    fps: f64,
    looping: Option<LoopSpec>,
) -> CuetrackResult<Vec<MidiNote>> {
    if ticks_per_beat == 0 {
        return Err(CuetrackError::validation("ticks_per_beat must be > 0"));
    }
    if !(bpm.is_finite() && bpm > 0.0) {
        return Err(CuetrackError::validation("bpm must be finite and > 0"));
    }
    if !(fps.is_finite() && fps > 0.0) {
        return Err(CuetrackError::validation("fps must be finite and > 0"));
    }

    let seconds_per_beat = 60.0 / bpm;
    let seconds_per_tick = seconds_per_beat / f64::from(ticks_per_beat);

    let mut elapsed = 0.0;
    let mut open = HashMap::<u8, (f64, u8)>::new();
    let mut notes = Vec::new();
    for event in events {
        elapsed += f64::from(event.delta_ticks) * seconds_per_tick;
        match event.message {
            MidiMessage::NoteOn { note, velocity } if velocity > 0 => {
                open.insert(note, (elapsed, velocity));
            }
            MidiMessage::NoteOn { note, .. } | MidiMessage::NoteOff { note, .. } => {
                if let Some((start, velocity)) = open.remove(&note) {
                    notes.push(MidiNote {
                        note,
                        velocity,
                        start: to_frames(start, fps),
                        end: to_frames(elapsed, fps),
                    });
                }
            }
            MidiMessage::Other => {}
        }
    }
    if !open.is_empty() {
        tracing::trace!(unclosed = open.len(), "dropping notes without note-off");
    }

    if let Some(spec) = looping {
        if !(spec.length > 0.0 && spec.length.is_finite() && spec.loop_length.is_finite()) {
            return Err(CuetrackError::validation(
                "loop length must be finite and > 0",
            ));
        }
        let copies = (spec.loop_length / spec.length).floor().max(0.0) as u32;
        let originals = notes.len();
        for rep in 1..copies {
            let offset = (seconds_per_beat * fps * f64::from(rep) * spec.length).round() as i64;
            for i in 0..originals {
                let n = notes[i];
                notes.push(MidiNote {
                    start: n.start + offset,
                    end: n.end + offset,
                    ..n
                });
            }
        }
    }

    Ok(notes)
}

#[cfg(test)]
#[path = "../../tests/unit/midi/extract.rs"]
mod tests;
