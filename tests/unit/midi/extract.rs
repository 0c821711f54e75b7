use super::*;

#[test]
fn half_second_note_at_thirty_fps() {
    // 120 bpm, 480 ticks per beat: 480 ticks == 0.5 s
    let events = [MidiEvent::note_on(0, 60, 100), MidiEvent::note_off(480, 60)];
    let notes = extract_notes(&events, 480, 120.0, 30.0, None).unwrap();
    assert_eq!(
        notes,
        vec![MidiNote {
            note: 60,
            velocity: 100,
            start: 0,
            end: 15
        }]
    );
    assert_eq!(notes[0].duration(), 15);
}

#[test]
fn deltas_accumulate_across_other_messages() {
    let events = [
        MidiEvent {
            delta_ticks: 240,
            message: MidiMessage::Other,
        },
        MidiEvent::note_on(240, 62, 90),
        MidiEvent::note_off(960, 62),
    ];
    let notes = extract_notes(&events, 480, 120.0, 30.0, None).unwrap();
    assert_eq!((notes[0].start, notes[0].end), (15, 45));
}

#[test]
fn last_note_on_wins() {
    let events = [
        MidiEvent::note_on(0, 60, 10),
        MidiEvent::note_on(480, 60, 20),
        MidiEvent::note_off(480, 60),
    ];
    let notes = extract_notes(&events, 480, 120.0, 30.0, None).unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!((notes[0].start, notes[0].end, notes[0].velocity), (15, 30, 20));
}

#[test]
fn unmatched_messages_are_tolerated() {
    let events = [
        MidiEvent::note_off(0, 64),
        MidiEvent::note_on(0, 65, 80),
        MidiEvent::note_on(480, 67, 80),
        MidiEvent::note_on(480, 67, 0),
    ];
    let notes = extract_notes(&events, 480, 120.0, 30.0, None).unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].note, 67);
    assert_eq!((notes[0].start, notes[0].end), (15, 30));
}

#[test]
fn loop_replicas_are_appended() {
    let events = [MidiEvent::note_on(0, 60, 100), MidiEvent::note_off(480, 60)];
    // 2-beat performance filling 8 beats: 4 copies, each 2 beats (1 s = 30 frames) apart
    let spec = LoopSpec {
        length: 2.0,
        loop_length: 8.0,
    };
    let notes = extract_notes(&events, 480, 120.0, 30.0, Some(spec)).unwrap();
    let starts: Vec<i64> = notes.iter().map(|n| n.start).collect();
    assert_eq!(starts, vec![0, 30, 60, 90]);
    assert!(notes.iter().all(|n| n.duration() == 15 && n.note == 60));
}

#[test]
fn rejects_invalid_parameters() {
    assert!(extract_notes(&[], 0, 120.0, 30.0, None).is_err());
    assert!(extract_notes(&[], 480, 0.0, 30.0, None).is_err());
    assert!(extract_notes(&[], 480, 120.0, -1.0, None).is_err());
    let bad = LoopSpec {
        length: 0.0,
        loop_length: 4.0,
    };
    assert!(extract_notes(&[], 480, 120.0, 30.0, Some(bad)).is_err());
}
