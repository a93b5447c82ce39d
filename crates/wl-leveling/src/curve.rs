use std::fmt;

use serde::{Deserialize, Serialize};

/// Shape of the XP progression curve.
///
/// Deserialization rejects unknown kinds outright: a typo in project
/// configuration is a hard error, never a silent fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveKind {
    /// `base_xp * level^exponent * level_multiplier`; levels get harder.
    Exponential,
    /// `base_xp * level * level_multiplier`; constant increase.
    Linear,
    /// `base_xp * ln(level + 1) * level * level_multiplier`; flattens out.
    Logarithmic,
}

impl fmt::Display for CurveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exponential => write!(f, "exponential"),
            Self::Linear => write!(f, "linear"),
            Self::Logarithmic => write!(f, "logarithmic"),
        }
    }
}

/// XP curve configuration. Immutable; build once, pass at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XpCurve {
    /// The curve shape.
    pub kind: CurveKind,
    /// Base XP cost scaled by the curve.
    pub base_xp: u32,
    /// Exponent for the exponential shape; ignored by the others.
    pub exponent: f64,
    /// Global multiplier applied to every level's cost.
    pub level_multiplier: f64,
}

impl Default for XpCurve {
    fn default() -> Self {
        Self {
            kind: CurveKind::Exponential,
            base_xp: 100,
            exponent: 1.5,
            level_multiplier: 1.0,
        }
    }
}

impl XpCurve {
    /// Set the curve shape.
    pub fn with_kind(mut self, kind: CurveKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the base XP cost.
    pub fn with_base_xp(mut self, base_xp: u32) -> Self {
        self.base_xp = base_xp;
        self
    }

    /// Set the exponential shape's exponent.
    pub fn with_exponent(mut self, exponent: f64) -> Self {
        self.exponent = exponent;
        self
    }

    /// Set the global level multiplier.
    pub fn with_level_multiplier(mut self, multiplier: f64) -> Self {
        self.level_multiplier = multiplier;
        self
    }

    /// XP required to clear the given level, truncated to whole points.
    pub fn xp_for_level(&self, level: u32) -> u64 {
        let base = f64::from(self.base_xp);
        let l = f64::from(level);
        let raw = match self.kind {
            CurveKind::Exponential => base * l.powf(self.exponent) * self.level_multiplier,
            CurveKind::Linear => base * l * self.level_multiplier,
            CurveKind::Logarithmic => base * (l + 1.0).ln() * l * self.level_multiplier,
        };
        raw as u64
    }
}
