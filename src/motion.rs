use std::fmt;

use crate::environment::Environment;

/// Whether the host asked for reduced motion.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum MotionPreference {
    #[default]
    NoPreference,
    Reduce,
}

impl MotionPreference {
    /// Headless hosts never ask for reduced motion.
    pub fn resolve(env: &Environment) -> Self {
        match env {
            Environment::Interactive(caps) if caps.system.prefers_reduced_motion() => Self::Reduce,
            _ => Self::NoPreference,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoPreference => "no-preference",
            Self::Reduce => "reduce",
        }
    }

    pub fn is_reduced(self) -> bool {
        self == Self::Reduce
    }
}

impl fmt::Display for MotionPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
