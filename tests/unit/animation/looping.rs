use super::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn lin(t: f64, times: u32) -> f64 {
    loop_progress(&EasingRegistry::new(), t, times, &Easing::default()).unwrap()
}

#[test]
fn single_loop_is_a_triangle_wave() {
    assert!(close(lin(0.0, 1), 0.0));
    assert!(close(lin(0.25, 1), 0.5));
    assert!(close(lin(0.5, 1), 1.0));
    assert!(close(lin(0.75, 1), 0.5));
    assert!(close(lin(1.0, 1), 0.0));
}

#[test]
fn advancing_then_returning() {
    assert!(close(lin(0.1, 1), 0.2));
    assert!(close(lin(0.6, 1), 0.8));
}

#[test]
fn more_loops_repeat_the_wave() {
    assert!(close(lin(0.125, 2), 0.5));
    assert!(close(lin(0.25, 2), 1.0));
    assert!(close(lin(0.5, 2), 0.0));
    assert!(close(lin(0.625, 2), 0.5));
}

#[test]
fn named_easing_is_applied_after_remap() {
    let reg = EasingRegistry::new();
    let v = loop_progress(&reg, 0.25, 1, &Easing::named("qei")).unwrap();
    assert!(close(v, 0.25));
}

#[test]
fn unknown_easing_propagates() {
    let reg = EasingRegistry::new();
    let err = loop_progress(&reg, 0.25, 1, &Easing::named("zzz")).unwrap_err();
    assert!(matches!(err, CuetrackError::UnknownEasing(_)));
}

#[test]
fn indexed_pair_alternates_by_half_cycle() {
    let eas = Easing::indexed(vec!["qei".into(), "qeo".into()]).unwrap();
    assert_eq!(eas.resolve(0).unwrap(), "qei");
    assert_eq!(eas.resolve(1).unwrap(), "qeo");
    assert_eq!(eas.resolve(2).unwrap(), "qei");
    assert_eq!(eas.resolve(7).unwrap(), "qeo");
}

#[test]
fn indexed_single_entry_always_applies() {
    let eas = Easing::indexed(vec!["seio".into()]).unwrap();
    for i in 0..5 {
        assert_eq!(eas.resolve(i).unwrap(), "seio");
    }
}

#[test]
fn indexed_long_sequence_indexes_directly_then_wraps() {
    let eas = Easing::indexed(vec!["cei".into(), "ceo".into(), "ceio".into()]).unwrap();
    assert_eq!(eas.resolve(0).unwrap(), "cei");
    assert_eq!(eas.resolve(2).unwrap(), "ceio");
    assert_eq!(eas.resolve(4).unwrap(), "ceo");
}

#[test]
fn empty_sequences_rejected_at_construction() {
    assert!(Easing::indexed(vec![]).is_err());
    assert!(Easing::indexed(vec![Easing::Indexed(vec![])]).is_err());
    assert!(Easing::named("").validate().is_err());
}

#[test]
fn easing_deserializes_from_name_or_list() {
    let a: Easing = serde_json::from_str("\"qeio\"").unwrap();
    assert_eq!(a, Easing::named("qeio"));
    let b: Easing = serde_json::from_str("[\"qei\", \"qeo\"]").unwrap();
    assert_eq!(b, Easing::Indexed(vec!["qei".into(), "qeo".into()]));
}

#[test]
fn cyclic_fold_mirrors_odd_half_cycles() {
    let (v, c) = fold(0.25, 1, true);
    assert!(close(v, 0.5));
    assert_eq!(c, 0);
    let (v, c) = fold(0.6, 1, true);
    assert!(close(v, 0.8));
    assert_eq!(c, 1);
    let (v, c) = fold(0.6, 1, false);
    assert!(close(v, 0.2));
    assert_eq!(c, 1);
}
