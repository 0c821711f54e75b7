use super::*;

fn smf_bytes() -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"MThd");
    bytes.extend_from_slice(&[0, 0, 0, 6, 0, 0, 0, 1, 0x01, 0xE0]);
    let track: &[u8] = &[
        0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20, // tempo 500000 us/beat
        0x00, 0x90, 0x3C, 0x64, // note on 60
        0x83, 0x60, 0x80, 0x3C, 0x00, // +480 ticks, note off 60
        0x00, 0xFF, 0x2F, 0x00, // end of track
    ];
    bytes.extend_from_slice(b"MTrk");
    bytes.extend_from_slice(&(track.len() as u32).to_be_bytes());
    bytes.extend_from_slice(track);
    bytes
}

#[test]
fn parses_standard_midi_file() {
    let file = MidiFile::parse(&smf_bytes()).unwrap();
    assert_eq!(file.ticks_per_beat, 480);
    assert_eq!(file.tracks.len(), 1);
    assert_eq!(file.tempo_bpm(), Some(120.0));

    let track = file.track(0, 120.0, 30.0, None).unwrap();
    assert_eq!(track.notes.len(), 1);
    assert_eq!(
        (track.notes[0].note, track.notes[0].start, track.notes[0].end),
        (60, 0, 15)
    );
    assert!(file.track(1, 120.0, 30.0, None).is_err());
}

#[test]
fn garbage_is_a_midi_error() {
    let err = MidiFile::parse(b"not a midi file").unwrap_err();
    assert!(matches!(err, CuetrackError::Midi(_)));
}

fn sample_track() -> MidiTrack {
    MidiTrack::new(vec![
        MidiNote {
            note: 36,
            velocity: 100,
            start: 10,
            end: 20,
        },
        MidiNote {
            note: 38,
            velocity: 100,
            start: 15,
            end: 25,
        },
    ])
}

#[test]
fn notes_at_and_active() {
    let t = sample_track();
    assert_eq!(t.notes_at(12).len(), 1);
    assert_eq!(t.notes_at(16).len(), 2);
    assert!(t.notes_at(25).is_empty());
    assert_eq!(t.active(19, 36).unwrap().start, 10);
    assert!(t.active(20, 36).is_none());
}

#[test]
fn envelope_attack_hold_release() {
    let t = sample_track();
    let kick = |n: &MidiNote| n.note == 36;
    assert_eq!(t.envelope(0, kick, 5, 10), 0.0);
    assert_eq!(t.envelope(8, kick, 4, 10), 0.5);
    assert_eq!(t.envelope(12, kick, 4, 10), 1.0);
    assert_eq!(t.envelope(25, kick, 4, 10), 0.5);
    assert_eq!(t.envelope(40, kick, 4, 10), 0.0);
    assert_eq!(t.envelope(22, |_| true, 0, 0), 1.0);
}
