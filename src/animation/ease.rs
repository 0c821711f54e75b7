use std::{collections::BTreeMap, f64::consts::PI, sync::Arc};

use crate::foundation::error::{CuetrackError, CuetrackResult};

/// Builtin easing curves over the unit interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    InExpo,
    OutExpo,
    InOutExpo,
    InSine,
    OutSine,
    InOutSine,
    InBounce,
    OutBounce,
    InOutBounce,
    InElastic,
    OutElastic,
    InOutElastic,
}

const MNEMONICS: &[(&str, Ease)] = &[
    ("linear", Ease::Linear),
    ("qei", Ease::InQuad),
    ("qeo", Ease::OutQuad),
    ("qeio", Ease::InOutQuad),
    ("cei", Ease::InCubic),
    ("ceo", Ease::OutCubic),
    ("ceio", Ease::InOutCubic),
    ("eei", Ease::InExpo),
    ("eeo", Ease::OutExpo),
    ("eeio", Ease::InOutExpo),
    ("sei", Ease::InSine),
    ("seo", Ease::OutSine),
    ("seio", Ease::InOutSine),
    ("bei", Ease::InBounce),
    ("beo", Ease::OutBounce),
    ("beio", Ease::InOutBounce),
    ("elei", Ease::InElastic),
    ("eleo", Ease::OutElastic),
    ("elieo", Ease::InOutElastic),
];

impl Ease {
    /// Every builtin curve, in mnemonic table order.
    pub fn all() -> impl Iterator<Item = Ease> {
        MNEMONICS.iter().map(|(_, e)| *e)
    }

    /// Look up a builtin curve by its short name (`"qeio"`, `"eleo"`, `"linear"`, ...).
    pub fn from_mnemonic(name: &str) -> Option<Ease> {
        MNEMONICS
            .iter()
            .find(|(m, _)| *m == name)
            .map(|(_, e)| *e)
    }

    pub fn mnemonic(self) -> &'static str {
        MNEMONICS
            .iter()
            .find(|(_, e)| *e == self)
            .map(|(m, _)| *m)
            .unwrap_or("linear")
    }

    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => -(t * (t - 2.0)),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    (-2.0 * t * t) + (4.0 * t) - 1.0
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => (t - 1.0).powi(3) + 1.0,
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let p = 2.0 * t - 2.0;
                    0.5 * p * p * p + 1.0
                }
            }
            Self::InExpo => {
                if t == 0.0 {
                    0.0
                } else {
                    2f64.powf(10.0 * (t - 1.0))
                }
            }
            Self::OutExpo => {
                if t == 1.0 {
                    1.0
                } else {
                    1.0 - 2f64.powf(-10.0 * t)
                }
            }
            Self::InOutExpo => {
                if t == 0.0 || t == 1.0 {
                    t
                } else if t < 0.5 {
                    0.5 * 2f64.powf(20.0 * t - 10.0)
                } else {
                    -0.5 * 2f64.powf(-20.0 * t + 10.0) + 1.0
                }
            }
            Self::InSine => ((t - 1.0) * PI / 2.0).sin() + 1.0,
            Self::OutSine => (t * PI / 2.0).sin(),
            Self::InOutSine => 0.5 * (1.0 - (t * PI).cos()),
            Self::InBounce => 1.0 - bounce_out(1.0 - t),
            Self::OutBounce => bounce_out(t),
            Self::InOutBounce => {
                if t < 0.5 {
                    0.5 * (1.0 - bounce_out(1.0 - t * 2.0))
                } else {
                    0.5 * bounce_out(t * 2.0 - 1.0) + 0.5
                }
            }
            Self::InElastic => {
                if t == 0.0 || t == 1.0 {
                    t
                } else {
                    (13.0 * PI / 2.0 * t).sin() * 2f64.powf(10.0 * (t - 1.0))
                }
            }
            Self::OutElastic => {
                if t == 0.0 || t == 1.0 {
                    t
                } else {
                    (-13.0 * PI / 2.0 * (t + 1.0)).sin() * 2f64.powf(-10.0 * t) + 1.0
                }
            }
            Self::InOutElastic => {
                if t == 0.0 || t == 1.0 {
                    t
                } else if t < 0.5 {
                    0.5 * (13.0 * PI / 2.0 * (2.0 * t)).sin() * 2f64.powf(10.0 * (2.0 * t - 1.0))
                } else {
                    0.5 * ((-13.0 * PI / 2.0 * (2.0 * t)).sin() * 2f64.powf(-10.0 * (2.0 * t - 1.0))
                        + 2.0)
                }
            }
        }
    }
}

fn bounce_out(t: f64) -> f64 {
    if t < 4.0 / 11.0 {
        121.0 * t * t / 16.0
    } else if t < 8.0 / 11.0 {
        (363.0 / 40.0 * t * t) - (99.0 / 10.0 * t) + 17.0 / 5.0
    } else if t < 9.0 / 10.0 {
        (4356.0 / 361.0 * t * t) - (35442.0 / 1805.0 * t) + 16061.0 / 1805.0
    } else {
        (54.0 / 5.0 * t * t) - (513.0 / 25.0 * t) + 268.0 / 25.0
    }
}

/// A user-supplied curve stored in an [`EasingRegistry`].
pub type EaseFn = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// Named easing lookup: the builtin mnemonics plus any registered custom curves.
///
/// Custom names shadow builtins. `"linear"` always resolves to the identity.
#[derive(Clone, Default)]
pub struct EasingRegistry {
    custom: BTreeMap<String, EaseFn>,
}

impl std::fmt::Debug for EasingRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EasingRegistry")
            .field("custom", &self.custom.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl EasingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a custom curve under `name`.
    pub fn register<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        self.custom.insert(name.into(), Arc::new(f));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        name == "linear" || self.custom.contains_key(name) || Ease::from_mnemonic(name).is_some()
    }

    /// Evaluate the curve registered as `name` at `x`.
    pub fn ease(&self, name: &str, x: f64) -> CuetrackResult<f64> {
        if name == "linear" {
            return Ok(x);
        }
        if let Some(f) = self.custom.get(name) {
            return Ok(f(x));
        }
        Ease::from_mnemonic(name)
            .map(|e| e.apply(x))
            .ok_or_else(|| CuetrackError::unknown_easing(name))
    }
}

/// Evaluate a builtin easing by mnemonic. `"linear"` is the identity.
pub fn ease(name: &str, x: f64) -> CuetrackResult<f64> {
    EasingRegistry::default().ease(name, x)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
