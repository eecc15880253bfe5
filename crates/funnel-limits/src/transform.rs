//! Display-scale transformations
//!
//! Every plotted value (observed ratio, target, alt-target and each limit
//! boundary) goes through the same [`Transform`] so relative positions are
//! preserved. The multiplier is applied first, then the transformation:
//! `apply(x) = f(x * multiplier)`.

use funnel_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Transformation applied to the (multiplied) value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformKind {
    /// Values plotted unchanged
    #[serde(rename = "none", alias = "identity")]
    Identity,
    /// Natural logarithm, defined on (0, inf)
    Ln,
    /// `ln(p / (1 - p))`, defined on (0, 1)
    Logit,
}

impl TransformKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Identity => "none",
            Self::Ln => "ln",
            Self::Logit => "logit",
        }
    }

    /// Apply the bare transformation
    pub fn transform(&self, value: f64) -> Result<f64> {
        let out = match self {
            Self::Identity => return Ok(value),
            Self::Ln if value > 0.0 => value.ln(),
            Self::Logit if value > 0.0 && value < 1.0 => (value / (1.0 - value)).ln(),
            _ => f64::NAN,
        };
        if out.is_finite() {
            Ok(out)
        } else {
            Err(Error::TransformDomain {
                kind: self.name(),
                value,
            })
        }
    }
}

impl Default for TransformKind {
    fn default() -> Self {
        Self::Identity
    }
}

impl FromStr for TransformKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" | "identity" => Ok(Self::Identity),
            "ln" => Ok(Self::Ln),
            "logit" => Ok(Self::Logit),
            other => Err(Error::unknown_kind("transformation", other)),
        }
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Count of values that fell back to their untransformed scale in a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformFallbacks {
    count: usize,
}

impl TransformFallbacks {
    pub fn record(&mut self) {
        self.count += 1;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Multiplier plus transformation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    kind: TransformKind,
    multiplier: f64,
}

impl Transform {
    pub fn new(kind: TransformKind, multiplier: f64) -> Result<Self> {
        if !(multiplier.is_finite() && multiplier > 0.0) {
            return Err(Error::Configuration(format!(
                "multiplier must be positive and finite, got {multiplier}"
            )));
        }
        Ok(Self { kind, multiplier })
    }

    /// Identity transform with multiplier 1
    pub fn identity() -> Self {
        Self {
            kind: TransformKind::Identity,
            multiplier: 1.0,
        }
    }

    pub fn kind(&self) -> TransformKind {
        self.kind
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Scale then transform; fails outside the transformation's domain
    pub fn apply(&self, value: f64) -> Result<f64> {
        self.kind.transform(value * self.multiplier)
    }

    /// Scaled value without the transformation
    pub fn scale(&self, value: f64) -> f64 {
        value * self.multiplier
    }

    /// Like [`apply`](Self::apply), but falls back to the scaled,
    /// untransformed value and records the fallback
    pub fn apply_or_raw(&self, value: f64, fallbacks: &mut TransformFallbacks) -> f64 {
        match self.apply(value) {
            Ok(v) => v,
            Err(_) => {
                fallbacks.record();
                self.scale(value)
            }
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
