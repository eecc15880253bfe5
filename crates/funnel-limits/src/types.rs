//! Common types for control limits

use funnel_core::math::distributions::normal;
use funnel_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Two-sided coverage of a control band, e.g. 0.95
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ControlLevel(f64);

impl ControlLevel {
    /// Create a new control level in (0, 1)
    pub fn new(level: f64) -> Result<Self> {
        if !(level > 0.0 && level < 1.0) {
            return Err(Error::Configuration(format!(
                "control level must be in (0, 1), got {level}"
            )));
        }
        Ok(Self(level))
    }

    /// Get the control level value
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Get the alpha level (1 - control level)
    pub fn alpha(&self) -> f64 {
        1.0 - self.0
    }

    /// Standard normal critical value for this two-sided level
    pub fn z(&self) -> Result<f64> {
        normal::two_sided_critical_value(self.0)
    }

    /// Conventional inner (two-sigma) band
    pub const NINETY_FIVE: Self = Self(0.95);
    /// Conventional outer (three-sigma) band
    pub const NINETY_NINE_POINT_EIGHT: Self = Self(0.998);
}

impl TryFrom<f64> for ControlLevel {
    type Error = Error;

    fn try_from(level: f64) -> Result<Self> {
        Self::new(level)
    }
}

impl From<ControlLevel> for f64 {
    fn from(level: ControlLevel) -> Self {
        level.0
    }
}

impl fmt::Display for ControlLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0 * 100.0)
    }
}

/// Control boundaries for a single denominator
///
/// A `None` bound means the limit is undefined at this denominator and
/// must be rendered as a gap, never as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitRecord {
    pub denominator: f64,
    pub ll99: Option<f64>,
    pub ll95: Option<f64>,
    pub ul95: Option<f64>,
    pub ul99: Option<f64>,
    pub target: f64,
    pub alt_target: Option<f64>,
    pub phi: f64,
}

impl LimitRecord {
    /// Both outer bounds are defined
    pub fn has_outer_limits(&self) -> bool {
        self.ll99.is_some() && self.ul99.is_some()
    }

    /// Width of the outer band, when both outer bounds are defined
    pub fn outer_width(&self) -> Option<f64> {
        Some(self.ul99? - self.ll99?)
    }

    /// Width of the inner band, when both inner bounds are defined
    pub fn inner_width(&self) -> Option<f64> {
        Some(self.ul95? - self.ll95?)
    }
}
