/// Convenience result type used across cuetrack.
pub type CuetrackResult<T> = Result<T, CuetrackError>;

/// Top-level error taxonomy used by the timeline, animation and MIDI APIs.
#[derive(thiserror::Error, Debug)]
pub enum CuetrackError {
    /// A clip is missing a structurally required field.
    #[error("malformed clip: {0}")]
    MalformedClip(String),

    /// An easing mnemonic is not present in the registry.
    #[error("unknown easing: {0}")]
    UnknownEasing(String),

    /// Invalid programmatic input.
    #[error("validation error: {0}")]
    Validation(String),

    /// A MIDI stream could not be read.
    #[error("midi error: {0}")]
    Midi(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CuetrackError {
    /// Build a [`CuetrackError::MalformedClip`] value.
    pub fn malformed_clip(msg: impl Into<String>) -> Self {
        Self::MalformedClip(msg.into())
    }

    /// Build a [`CuetrackError::UnknownEasing`] value.
    pub fn unknown_easing(name: impl Into<String>) -> Self {
        Self::UnknownEasing(name.into())
    }

    /// Build a [`CuetrackError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CuetrackError::Midi`] value.
    pub fn midi(msg: impl Into<String>) -> Self {
        Self::Midi(msg.into())
    }

    /// Build a [`CuetrackError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
