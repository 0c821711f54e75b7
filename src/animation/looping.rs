use crate::{
    animation::ease::EasingRegistry,
    foundation::error::{CuetrackError, CuetrackResult},
};

/// Easing argument for looped progress: one named curve, or a sequence picked per half-cycle.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Easing {
    /// A registry mnemonic such as `"linear"` or `"qeio"`.
    Named(String),
    /// Curves selected by half-cycle index (see [`Easing::resolve`]).
    Indexed(Vec<Easing>),
}

impl Default for Easing {
    fn default() -> Self {
        Self::Named("linear".to_string())
    }
}

impl From<&str> for Easing {
    fn from(value: &str) -> Self {
        Self::Named(value.to_string())
    }
}

impl Easing {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Build an indexed easing. Empty sequences are rejected here rather than at use.
    pub fn indexed(items: Vec<Easing>) -> CuetrackResult<Self> {
        let eas = Self::Indexed(items);
        eas.validate()?;
        Ok(eas)
    }

    /// Reject empty sequences anywhere in the tree.
    pub fn validate(&self) -> CuetrackResult<()> {
        match self {
            Self::Named(name) if name.is_empty() => {
                Err(CuetrackError::validation("easing name must be non-empty"))
            }
            Self::Named(_) => Ok(()),
            Self::Indexed(items) if items.is_empty() => Err(CuetrackError::validation(
                "indexed easing needs at least one entry",
            )),
            Self::Indexed(items) => items.iter().try_for_each(Easing::validate),
        }
    }

    /// Pick the curve name for half-cycle `index`.
    ///
    /// Sequences long enough are indexed directly; a pair alternates; a single entry always
    /// applies; longer sequences wrap around.
    pub fn resolve(&self, index: u64) -> CuetrackResult<&str> {
        match self {
            Self::Named(name) => Ok(name),
            Self::Indexed(items) => {
                let len = items.len() as u64;
                let pick = if index < len {
                    index
                } else {
                    match len {
                        0 => {
                            return Err(CuetrackError::validation(
                                "indexed easing needs at least one entry",
                            ));
                        }
                        1 => 0,
                        2 => index % 2,
                        _ => index % len,
                    }
                };
                items[pick as usize].resolve(index)
            }
        }
    }

    /// Apply the curve chosen for half-cycle `index` to `x`.
    pub fn apply(&self, registry: &EasingRegistry, index: u64, x: f64) -> CuetrackResult<f64> {
        registry.ease(self.resolve(index)?, x)
    }
}

/// Map linear progress `t` onto `times` forward-then-back oscillations and ease the result.
///
/// `loop_progress(0.25, 1, "linear") == 0.5`, `loop_progress(0.5, 1, "linear") == 1.0`.
pub fn loop_progress(
    registry: &EasingRegistry,
    t: f64,
    times: u32,
    easing: &Easing,
) -> CuetrackResult<f64> {
    let lt = t * f64::from(times) * 2.0;
    let ltf = lt.floor();
    let ltc = lt.ceil();
    let lt = if (ltc as i64) % 2 != 0 {
        1.0 - (ltc - lt)
    } else {
        ltc - lt
    };
    easing.apply(registry, ltf.max(0.0) as u64, lt)
}

/// Symmetric fold used by timeline progress: returns the folded value and the half-cycle index.
///
/// When `cyclic` is set, odd half-cycles run backward.
pub fn fold(t: f64, times: u32, cyclic: bool) -> (f64, u64) {
    let lt = t * f64::from(times) * 2.0;
    let ltf = lt.floor();
    let mut folded = lt - ltf;
    let cycle = ltf.max(0.0) as u64;
    if cyclic && cycle % 2 == 1 {
        folded = 1.0 - folded;
    }
    (folded, cycle)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/looping.rs"]
mod tests;
