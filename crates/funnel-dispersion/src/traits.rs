//! Core traits for target and dispersion estimation

use crate::mode::DispersionMode;
use funnel_core::{Observation, Result, VarianceModel};

/// Estimator of the pooled centerline all groups are compared against
pub trait TargetEstimator {
    /// Estimate the target from the current (validated) observation set
    fn estimate(&self, observations: &[Observation]) -> Result<f64>;

    /// Get the name of this target estimator
    fn name(&self) -> &str;
}

/// Intrinsic properties of a dispersion estimator
pub trait DispersionEstimatorProperties {
    /// Get the name of this dispersion estimator
    fn name(&self) -> &str;

    /// Check if extreme residuals have bounded influence on the estimate
    fn is_robust(&self) -> bool;
}

/// Estimator of the overdispersion ratio φ
///
/// Implementations return a value that is already clamped to `>= 1`:
/// underdispersion never narrows the limits below nominal sampling width.
pub trait DispersionEstimator: DispersionEstimatorProperties {
    /// Estimate φ from the observations, their pooled target and the variance model
    fn estimate<M: VarianceModel>(
        &self,
        observations: &[Observation],
        target: f64,
        model: &M,
    ) -> Result<f64>;

    /// Estimate φ honouring the configured mode
    ///
    /// In manual mode the observations are not inspected; the configured
    /// value is used directly (and clamped to `>= 1`).
    fn estimate_with_mode<M: VarianceModel>(
        &self,
        observations: &[Observation],
        target: f64,
        model: &M,
        mode: DispersionMode,
    ) -> Result<f64> {
        match mode {
            DispersionMode::Auto => self.estimate(observations, target, model),
            DispersionMode::Manual(phi) => {
                mode.validate()?;
                Ok(clamp_phi(phi))
            }
        }
    }
}

/// Clamp a dispersion ratio to `max(phi, 1)`, mapping NaN to 1
#[inline]
pub fn clamp_phi(phi: f64) -> f64 {
    if phi.is_nan() {
        1.0
    } else {
        phi.max(1.0)
    }
}
