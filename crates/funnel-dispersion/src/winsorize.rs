//! Winsorization of standardised residuals
//!
//! Two clipping rules are supported:
//!
//! - [`Winsorization::Fixed`]: clip every z-score to `[-c, c]`
//! - [`Winsorization::Quantile`]: replace the `floor(n * p)` smallest and
//!   largest z-scores by the nearest retained order statistic (the 10%
//!   rule of Spiegelhalter, 2005)

use funnel_core::{Error, Result};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Default symmetric bound for fixed winsorization
pub const DEFAULT_WINSOR_BOUND: f64 = 3.0;

/// Default tail proportion for quantile winsorization
pub const DEFAULT_WINSOR_PROPORTION: f64 = 0.1;

/// Rule used to bound the influence of extreme residuals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum Winsorization {
    /// Clip to `[-bound, bound]`
    Fixed { bound: f64 },
    /// Clip each tail at its `proportion` order statistic
    Quantile { proportion: f64 },
    /// Use raw z-scores
    None,
}

impl Default for Winsorization {
    fn default() -> Self {
        Self::Fixed {
            bound: DEFAULT_WINSOR_BOUND,
        }
    }
}

impl Winsorization {
    /// Ten-percent quantile winsorization
    pub fn quantile_default() -> Self {
        Self::Quantile {
            proportion: DEFAULT_WINSOR_PROPORTION,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::Fixed { bound } if !(bound.is_finite() && bound > 0.0) => Err(
                Error::Configuration(format!("winsorization bound must be positive, got {bound}")),
            ),
            Self::Quantile { proportion } if !(0.0..0.5).contains(&proportion) => {
                Err(Error::Configuration(format!(
                    "winsorization proportion must be in [0, 0.5), got {proportion}"
                )))
            }
            _ => Ok(()),
        }
    }

    /// Clip the z-scores in place, preserving their order
    pub fn apply(&self, z_scores: &mut [f64]) -> Result<()> {
        self.validate()?;
        match *self {
            Self::Fixed { bound } => {
                for z in z_scores.iter_mut() {
                    *z = z.clamp(-bound, bound);
                }
            }
            Self::Quantile { proportion } => {
                let n = z_scores.len();
                let winsor_count = (n as f64 * proportion).floor() as usize;
                if winsor_count == 0 {
                    return Ok(());
                }

                let mut sorted: Vec<OrderedFloat<f64>> =
                    z_scores.iter().copied().map(OrderedFloat).collect();
                sorted.sort_unstable();
                let lower_value = sorted[winsor_count].0;
                let upper_value = sorted[n - winsor_count - 1].0;

                for z in z_scores.iter_mut() {
                    *z = z.clamp(lower_value, upper_value);
                }
            }
            Self::None => {}
        }
        Ok(())
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Fixed { .. } => "fixed",
            Self::Quantile { .. } => "quantile",
            Self::None => "none",
        }
    }
}
