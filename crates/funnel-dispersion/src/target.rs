//! Pooled target estimation

use crate::traits::TargetEstimator;
use funnel_core::{Error, Observation, Result};
use tracing::debug;

/// Precision-weighted pooled ratio `sum(numerator) / sum(denominator)`
///
/// Pooling (rather than averaging per-group ratios) stops small groups
/// from dominating the centerline.
#[derive(Debug, Clone, Copy, Default)]
pub struct PooledTarget;

impl PooledTarget {
    pub fn new() -> Self {
        Self
    }
}

impl TargetEstimator for PooledTarget {
    fn estimate(&self, observations: &[Observation]) -> Result<f64> {
        if observations.is_empty() {
            return Err(Error::empty_input());
        }

        let (numerator, denominator) = observations
            .iter()
            .fold((0.0, 0.0), |(n, d), obs| (n + obs.numerator, d + obs.denominator));

        if !(denominator > 0.0) || !numerator.is_finite() || !denominator.is_finite() {
            return Err(Error::non_finite("pooled numerator/denominator"));
        }

        let target = numerator / denominator;
        debug!(target, n = observations.len(), "pooled target");
        Ok(target)
    }

    fn name(&self) -> &str {
        "Pooled Ratio"
    }
}
