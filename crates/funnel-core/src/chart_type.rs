//! Chart types and their variance models
//!
//! Each indicator kind fixes how the expected ratio and its sampling
//! variance depend on the denominator and the target:
//!
//! | Kind | Denominator | Variance of the ratio |
//! |------|-------------|-----------------------|
//! | Proportion (PR) | sample size `n` | `t(1 - t) / n` |
//! | Standardised ratio (SR) | expected count `E` | `t / E` |
//! | Rate (RC) | exposure `x` | `t / x` |
//!
//! # References
//!
//! - Spiegelhalter, D.J. (2005). Funnel plots for comparing institutional
//!   performance. *Statistics in Medicine*, 24(8), 1185-1202.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Variance model used by the dispersion and limit calculations
pub trait VarianceModel {
    /// Expected ratio under the null for a group of the given denominator
    fn expected(&self, denominator: f64, target: f64) -> f64;

    /// Sampling variance of the observed ratio under the null
    fn variance(&self, denominator: f64, target: f64) -> f64;

    /// Smallest and (if bounded) largest value the ratio can take
    fn valid_range(&self) -> (f64, Option<f64>);

    /// Standard error `sqrt(variance)`
    #[inline]
    fn standard_error(&self, denominator: f64, target: f64) -> f64 {
        self.variance(denominator, target).sqrt()
    }
}

/// Indicator kind plotted on the funnel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartTypeKind {
    /// Binomial proportion of events per sample
    #[serde(rename = "PR", alias = "proportion")]
    Proportion,
    /// Observed / expected counts under indirect standardisation
    #[serde(rename = "SR", alias = "standardised_ratio")]
    StandardisedRatio,
    /// Poisson count per unit of exposure
    #[serde(rename = "RC", alias = "rate")]
    Rate,
}

impl ChartTypeKind {
    /// Short code used in settings ("PR", "SR", "RC")
    pub fn code(&self) -> &'static str {
        match self {
            Self::Proportion => "PR",
            Self::StandardisedRatio => "SR",
            Self::Rate => "RC",
        }
    }

    /// Human-readable label of the plotted value
    pub fn label(&self) -> &'static str {
        match self {
            Self::Proportion => "Proportion",
            Self::StandardisedRatio => "Standardised Ratio",
            Self::Rate => "Rate",
        }
    }
}

impl Default for ChartTypeKind {
    fn default() -> Self {
        Self::Proportion
    }
}

impl VarianceModel for ChartTypeKind {
    #[inline]
    fn expected(&self, _denominator: f64, target: f64) -> f64 {
        target
    }

    fn variance(&self, denominator: f64, target: f64) -> f64 {
        match self {
            Self::Proportion => target * (1.0 - target) / denominator,
            // Denominator is the expected count E
            Self::StandardisedRatio => target / denominator,
            Self::Rate => target / denominator,
        }
    }

    fn valid_range(&self) -> (f64, Option<f64>) {
        match self {
            Self::Proportion => (0.0, Some(1.0)),
            Self::StandardisedRatio | Self::Rate => (0.0, None),
        }
    }
}

impl FromStr for ChartTypeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "PR" | "proportion" => Ok(Self::Proportion),
            "SR" | "standardised_ratio" => Ok(Self::StandardisedRatio),
            "RC" | "rate" => Ok(Self::Rate),
            other => Err(Error::unknown_kind("chart type", other)),
        }
    }
}

impl fmt::Display for ChartTypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
