use super::*;

fn clip(name: &str, start: f64, end: f64) -> Clip {
    Clip::parse(&RawClip::new(name, start, end, start, end), 30.0, &[], 0).unwrap()
}

#[test]
fn clear_screen_sigil_is_stripped() {
    let c = clip("*Hello", 0.0, 1.0);
    assert_eq!(c.kind, ClipType::ClearScreen);
    assert_eq!(c.text, "Hello");
    assert_eq!((c.start, c.end, c.duration), (0, 30, 30));
    assert!(c.flags.is_empty());
}

#[test]
fn type_sigils_map_to_types() {
    assert_eq!(clip("≈next", 0.0, 1.0).kind, ClipType::NewLine);
    assert_eq!(clip("≈next", 0.0, 1.0).text, "next");
    assert_eq!(clip("+world", 0.0, 1.0).kind, ClipType::JoinPrev);
    assert_eq!(clip("+world", 0.0, 1.0).text, "world");
    assert_eq!(clip("plain", 0.0, 1.0).kind, ClipType::Isolated);
    assert_eq!(clip("pl*ain", 0.0, 1.0).kind, ClipType::Isolated);
}

#[test]
fn only_the_first_type_sigil_counts() {
    let c = clip("+*odd", 0.0, 1.0);
    assert_eq!(c.kind, ClipType::JoinPrev);
    assert_eq!(c.text, "*odd");
}

#[test]
fn fade_sigils_set_flags() {
    let c = clip("ƒHi", 0.0, 1.0);
    assert_eq!(c.fade_in(), Some(DEFAULT_FADE_FRAMES));
    assert_eq!(c.text, "Hi");

    let c = clip("*ƒ12Hi", 0.0, 1.0);
    assert_eq!(c.kind, ClipType::ClearScreen);
    assert_eq!(c.fade_in(), Some(12));
    assert_eq!(c.text, "Hi");

    let c = clip("byeƒ", 0.0, 1.0);
    assert_eq!(c.fade_out(), Some(3));
    assert_eq!(c.fade_in(), None);
    assert_eq!(c.text, "bye");

    let c = clip("ƒ5bothƒ", 0.0, 1.0);
    assert_eq!(
        c.flags,
        vec![ClipFlag::FadeIn { frames: 5 }, ClipFlag::FadeOut { frames: 3 }]
    );
    assert_eq!(c.text, "both");
}

#[test]
fn oversized_fade_count_saturates() {
    let c = clip("ƒ99999999999Hi", 0.0, 1.0);
    assert_eq!(c.fade_in(), Some(u32::MAX));
    assert_eq!(c.text, "Hi");
}

#[test]
fn transform_is_split_from_text() {
    let c = clip("*Big|||scale=1.5,rotate=-10,font=Mono", 0.0, 1.0);
    assert_eq!(c.text, "Big");
    assert_eq!(c.kind, ClipType::ClearScreen);
    assert_eq!(c.transform["scale"], TransformValue::Float(1.5));
    assert_eq!(c.transform["rotate"], TransformValue::Int(-10));
    assert_eq!(c.transform["font"].as_str(), Some("Mono"));
    assert!(c.warnings.is_empty());
}

#[test]
fn bad_transform_is_a_warning_not_an_error() {
    let c = clip("word|||__import__('os')", 0.0, 1.0);
    assert_eq!(c.text, "word");
    assert!(c.transform.is_empty());
    assert_eq!(c.warnings.len(), 1);
    assert!(matches!(c.warnings[0], ClipWarning::TransformParse { .. }));
}

#[test]
fn transform_parser_accepts_quotes_and_rejects_expressions() {
    let t = parse_transform(" a = 'x y' , b=\"z\", c=2e3 ").unwrap();
    assert_eq!(t["a"], TransformValue::Str("x y".to_string()));
    assert_eq!(t["b"], TransformValue::Str("z".to_string()));
    assert_eq!(t["c"], TransformValue::Float(2000.0));

    assert!(parse_transform("").unwrap().is_empty());
    assert!(parse_transform("a").is_err());
    assert!(parse_transform("a=1,a=2").is_err());
    assert!(parse_transform("1a=1").is_err());
    assert!(parse_transform("a=(1+2)").is_err());
    assert!(parse_transform("a=1,,b=2").is_err());
    assert!(parse_transform("a=").is_err());
    assert!(parse_transform("a=1.2.3").is_err());
}

#[test]
fn covering_marker_forces_new_line() {
    let markers = [Marker { start: 0, end: 60 }];
    let raw = RawClip::new("*Hello", 0.0, 1.0, 0.5, 1.5);
    let c = Clip::parse(&raw, 30.0, &markers, 2).unwrap();
    assert_eq!(c.kind, ClipType::NewLine);
    assert_eq!(c.text, "Hello");
    assert_eq!(c.track, 2);

    let partial = [Marker { start: 20, end: 60 }];
    let c = Clip::parse(&raw, 30.0, &partial, 2).unwrap();
    assert_eq!(c.kind, ClipType::ClearScreen);
}

#[test]
fn classification_is_deterministic() {
    let a = clip("+ƒ4wordƒ|||x=1", 1.0, 2.0);
    let b = clip("+ƒ4wordƒ|||x=1", 1.0, 2.0);
    assert_eq!((a.kind, &a.text, &a.flags), (b.kind, &b.text, &b.flags));
}

#[test]
fn missing_timing_is_malformed() {
    let mut raw = RawClip::new("x", 0.0, 1.0, 0.0, 1.0);
    raw.in_point = None;
    let err = Clip::parse(&raw, 30.0, &[], 0).unwrap_err();
    assert!(matches!(err, CuetrackError::MalformedClip(_)));

    let mut raw = RawClip::new("x", 0.0, 1.0, 0.0, 1.0);
    raw.end = Some(serde_json::Value::Bool(true));
    assert!(matches!(
        Clip::parse(&raw, 30.0, &[], 0).unwrap_err(),
        CuetrackError::MalformedClip(_)
    ));

    let mut raw = RawClip::new("x", 0.0, 1.0, 0.0, 1.0);
    raw.name = None;
    assert!(Clip::parse(&raw, 30.0, &[], 0).is_err());
}

#[test]
fn numeric_strings_are_accepted_for_timing() {
    let raw = RawClip {
        name: Some("x".to_string()),
        start: Some("0.5".into()),
        end: Some(1.into()),
        in_point: Some(0.into()),
        out_point: Some(1.into()),
    };
    let c = Clip::parse(&raw, 30.0, &[], 0).unwrap();
    assert_eq!((c.start, c.end), (15, 30));
}

#[test]
fn position_discriminants() {
    assert_eq!(Position::Before.as_i8(), -1);
    assert_eq!(Position::Current.as_i8(), 0);
    assert_eq!(Position::After.as_i8(), 1);
}

#[test]
fn parsed_clips_start_unqueried() {
    let c = clip("fresh", 0.0, 1.0);
    assert_eq!(c.position, Position::After);
    assert_eq!(Position::default(), Position::After);
}
