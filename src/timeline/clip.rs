use std::collections::BTreeMap;

use crate::{
    foundation::error::{CuetrackError, CuetrackResult},
    timeline::marker::Marker,
    timing::timecode::to_frames,
};

/// Separates the clip text from its trailing `key=value` list.
pub const TRANSFORM_DELIMITER: &str = "|||";

/// Fade length used when a fade sigil carries no explicit frame count.
pub const DEFAULT_FADE_FRAMES: u32 = 3;

const CLEAR_SCREEN: char = '*';
const NEW_LINE: char = '≈';
const JOIN_PREV: char = '+';
const FADE: char = 'ƒ';

/// Clip as it appears in the editor export. Times are seconds.
///
/// Timing values are kept loosely typed so a missing or non-numeric field surfaces as
/// [`CuetrackError::MalformedClip`] instead of failing the whole document.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawClip {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub start: Option<serde_json::Value>,
    #[serde(default)]
    pub end: Option<serde_json::Value>,
    #[serde(default)]
    pub in_point: Option<serde_json::Value>,
    #[serde(default)]
    pub out_point: Option<serde_json::Value>,
}

impl RawClip {
    /// Convenience constructor for fully specified clips.
    pub fn new(name: &str, start: f64, end: f64, in_point: f64, out_point: f64) -> Self {
        Self {
            name: Some(name.to_string()),
            start: Some(start.into()),
            end: Some(end.into()),
            in_point: Some(in_point.into()),
            out_point: Some(out_point.into()),
        }
    }
}

/// Structural role of a clip within its group, decided once from the name sigils.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ClipType {
    /// Hard break: always starts a new group.
    ClearScreen,
    /// Soft break: starts a new line within the group.
    NewLine,
    Isolated,
    /// Continues the previous clip as one spoken unit.
    JoinPrev,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ClipFlag {
    FadeIn { frames: u32 },
    FadeOut { frames: u32 },
}

/// Where a clip sits relative to the queried frame.
///
/// Clips that were never queried count as `After`, so an unqueried group has no current clip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Position {
    Before = -1,
    Current = 0,
    #[default]
    After = 1,
}

impl Position {
    pub fn as_i8(self) -> i8 {
        self as i8
    }
}

/// Typed value of one `key=value` transform entry.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum TransformValue {
    Int(i64),
    Float(f64),
    Str(String),
}

impl TransformValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::Str(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

pub type Transform = BTreeMap<String, TransformValue>;

/// Non-fatal problem recorded while parsing a clip.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub enum ClipWarning {
    TransformParse { raw: String, reason: String },
}

/// One authored segment of a timeline track.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Clip {
    /// Position within the owning group; assigned at grouping time.
    pub idx: usize,
    pub track: usize,
    pub start: i64,
    pub end: i64,
    pub inpoint: i64,
    pub outpoint: i64,
    pub duration: i64,
    pub text: String,
    pub transform: Transform,
    #[serde(rename = "type")]
    pub kind: ClipType,
    pub flags: Vec<ClipFlag>,
    pub position: Position,
    pub joined: bool,
    /// Index of the previous clip in the same join chain.
    pub join_prev: Option<usize>,
    /// Index of the next clip in the same join chain.
    pub join_next: Option<usize>,
    /// Texts of overlay clips covering this clip at the last query.
    pub styles: Vec<String>,
    /// Index of the owning group on this clip's track.
    pub group: Option<usize>,
    pub warnings: Vec<ClipWarning>,
}

impl Clip {
    /// Parse an exported clip. Only timing and name are required; a bad transform
    /// list is recorded as a warning.
    pub fn parse(
        raw: &RawClip,
        fps: f64,
        markers: &[Marker],
        track: usize,
    ) -> CuetrackResult<Self> {
        let name = raw.name.as_deref().ok_or_else(|| {
            CuetrackError::malformed_clip(format!("track {track}: clip has no name"))
        })?;
        let seconds = |field: &str, v: &Option<serde_json::Value>| -> CuetrackResult<f64> {
            let v = v.as_ref().ok_or_else(|| {
                CuetrackError::malformed_clip(format!(
                    "track {track}: clip '{name}' has no {field}"
                ))
            })?;
            value_seconds(v).ok_or_else(|| {
                CuetrackError::malformed_clip(format!(
                    "track {track}: clip '{name}' has non-numeric {field}: {v}"
                ))
            })
        };
        let start = to_frames(seconds("start", &raw.start)?, fps);
        let end = to_frames(seconds("end", &raw.end)?, fps);
        let inpoint = to_frames(seconds("inPoint", &raw.in_point)?, fps);
        let outpoint = to_frames(seconds("outPoint", &raw.out_point)?, fps);

        let mut warnings = Vec::new();
        let (text, transform) = match name.split_once(TRANSFORM_DELIMITER) {
            Some((text, spec)) => match parse_transform(spec) {
                Ok(t) => (text, t),
                Err(reason) => {
                    tracing::warn!(track, clip = name, %reason, "ignoring clip transform");
                    warnings.push(ClipWarning::TransformParse {
                        raw: spec.to_string(),
                        reason,
                    });
                    (text, Transform::new())
                }
            },
            None => (name, Transform::new()),
        };

        let (mut kind, text, flags) = classify(text);
        if markers.iter().any(|m| m.covers(inpoint, outpoint)) {
            kind = ClipType::NewLine;
        }

        Ok(Self {
            idx: 0,
            track,
            start,
            end,
            inpoint,
            outpoint,
            duration: end - start,
            text,
            transform,
            kind,
            flags,
            position: Position::default(),
            joined: false,
            join_prev: None,
            join_next: None,
            styles: Vec::new(),
            group: None,
            warnings,
        })
    }

    pub fn fade_in(&self) -> Option<u32> {
        self.flags.iter().find_map(|f| match f {
            ClipFlag::FadeIn { frames } => Some(*frames),
            _ => None,
        })
    }

    pub fn fade_out(&self) -> Option<u32> {
        self.flags.iter().find_map(|f| match f {
            ClipFlag::FadeOut { frames } => Some(*frames),
            _ => None,
        })
    }

    /// `true` when `[self.start, self.end)` lies inside `[start, end)`.
    pub fn covered_by(&self, start: i64, end: i64) -> bool {
        start <= self.start && self.end <= end
    }
}

fn value_seconds(v: &serde_json::Value) -> Option<f64> {
    let secs = match v {
        serde_json::Value::Number(n) => n.as_f64()?,
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    secs.is_finite().then_some(secs)
}

/// Strip the type and fade sigils from clip text.
///
/// Type sigils (`*`, `≈`, `+`) come first; then a leading `ƒ` with an optional frame count
/// and a trailing `ƒ`.
pub fn classify(text: &str) -> (ClipType, String, Vec<ClipFlag>) {
    let (kind, mut rest) = match text.chars().next() {
        Some(CLEAR_SCREEN) => (ClipType::ClearScreen, &text[CLEAR_SCREEN.len_utf8()..]),
        Some(NEW_LINE) => (ClipType::NewLine, &text[NEW_LINE.len_utf8()..]),
        Some(JOIN_PREV) => (ClipType::JoinPrev, &text[JOIN_PREV.len_utf8()..]),
        _ => (ClipType::Isolated, text),
    };

    let mut flags = Vec::new();
    if let Some(after) = rest.strip_prefix(FADE) {
        let digits = after.len() - after.trim_start_matches(|c: char| c.is_ascii_digit()).len();
        // all-digit runs only fail to parse on overflow
        let frames = match digits {
            0 => DEFAULT_FADE_FRAMES,
            _ => after[..digits].parse().unwrap_or(u32::MAX),
        };
        flags.push(ClipFlag::FadeIn { frames });
        rest = &after[digits..];
    }
    if let Some(before) = rest.strip_suffix(FADE) {
        flags.push(ClipFlag::FadeOut {
            frames: DEFAULT_FADE_FRAMES,
        });
        rest = before;
    }

    (kind, rest.to_string(), flags)
}

/// Parse a comma-separated `key=value` list into a typed map.
///
/// Values are integers, floats, quoted strings, or bare words made of letters, digits and
/// `_ - . #`. Anything else is rejected; nothing is evaluated.
pub fn parse_transform(spec: &str) -> Result<Transform, String> {
    let mut out = Transform::new();
    if spec.trim().is_empty() {
        return Ok(out);
    }
    for item in spec.split(',') {
        let item = item.trim();
        if item.is_empty() {
            return Err("empty entry".to_string());
        }
        let (key, value) = item
            .split_once('=')
            .ok_or_else(|| format!("expected key=value, got '{item}'"))?;
        let key = key.trim();
        if !is_identifier(key) {
            return Err(format!("invalid key '{key}'"));
        }
        let value = parse_value(value.trim())?;
        if out.insert(key.to_string(), value).is_some() {
            return Err(format!("duplicate key '{key}'"));
        }
    }
    Ok(out)
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn parse_value(v: &str) -> Result<TransformValue, String> {
    if v.is_empty() {
        return Err("empty value".to_string());
    }
    if let Ok(i) = v.parse::<i64>() {
        return Ok(TransformValue::Int(i));
    }
    let numeric_chars = v
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if numeric_chars && v.chars().any(|c| c.is_ascii_digit()) {
        return v
            .parse::<f64>()
            .map(TransformValue::Float)
            .map_err(|_| format!("invalid number '{v}'"));
    }
    for q in ['"', '\''] {
        if let Some(inner) = v.strip_prefix(q).and_then(|s| s.strip_suffix(q)) {
            if v.len() < 2 || inner.contains(q) {
                return Err(format!("unbalanced quotes in '{v}'"));
            }
            return Ok(TransformValue::Str(inner.to_string()));
        }
    }
    if v
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '#'))
    {
        return Ok(TransformValue::Str(v.to_string()));
    }
    Err(format!("unsupported value '{v}'"))
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/clip.rs"]
mod tests;
