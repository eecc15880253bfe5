//! Mathematical utilities for control limit construction
//!
//! Thin wrappers over `statrs` for the standard normal quantiles the
//! control bands are built from.

/// Distribution-related mathematical functions
pub mod distributions {
    /// Normal distribution utilities
    pub mod normal {
        use crate::error::{Error, Result};
        use statrs::distribution::{ContinuousCDF, Normal};

        fn standard() -> Result<Normal> {
            Normal::new(0.0, 1.0).map_err(|e| {
                Error::Computation(format!("Failed to create normal distribution: {}", e))
            })
        }

        /// Cumulative distribution function of the standard normal
        pub fn cdf(x: f64) -> Result<f64> {
            Ok(standard()?.cdf(x))
        }

        /// Quantile function (inverse CDF) of the standard normal
        pub fn ppf(p: f64) -> Result<f64> {
            if !(p > 0.0 && p < 1.0) {
                return Err(Error::InvalidParameter(format!(
                    "Probability {p} must be in (0, 1)"
                )));
            }
            Ok(standard()?.inverse_cdf(p))
        }

        /// Critical value `z` such that `P(|Z| <= z) = confidence`
        pub fn two_sided_critical_value(confidence: f64) -> Result<f64> {
            if !(confidence > 0.0 && confidence < 1.0) {
                return Err(Error::InvalidParameter(format!(
                    "Confidence level {confidence} must be in (0, 1)"
                )));
            }
            ppf(1.0 - (1.0 - confidence) / 2.0)
        }

    }
}
