//! Overdispersion ratio from winsorized z-scores

use crate::traits::{clamp_phi, DispersionEstimator, DispersionEstimatorProperties};
use crate::winsorize::Winsorization;
use funnel_core::{Observation, Result, VarianceModel};
use tracing::debug;

/// Dispersion ratio `φ = mean(winsorized z²)`
///
/// For each group the residual `z = (ratio - expected) / sqrt(variance)` is
/// computed under the chosen variance model, the residuals are winsorized,
/// and φ is the mean of their squares. Under a correctly specified model
/// with no extra variation φ converges to 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct WinsorizedDispersion {
    winsorization: Winsorization,
}

impl WinsorizedDispersion {
    pub fn new(winsorization: Winsorization) -> Self {
        Self { winsorization }
    }

    pub fn winsorization(&self) -> Winsorization {
        self.winsorization
    }

    /// Raw standardised residuals, in observation order
    ///
    /// A group whose null variance is zero or undefined (e.g. a pooled
    /// proportion of exactly 0 or 1) contributes a residual of 0.
    pub fn z_scores<M: VarianceModel>(
        &self,
        observations: &[Observation],
        target: f64,
        model: &M,
    ) -> Vec<f64> {
        observations
            .iter()
            .map(|obs| {
                let expected = model.expected(obs.denominator, target);
                let se = model.standard_error(obs.denominator, target);
                let z = (obs.ratio() - expected) / se;
                if se > 0.0 && z.is_finite() {
                    z
                } else {
                    0.0
                }
            })
            .collect()
    }

    /// Unclamped mean of squared winsorized residuals
    ///
    /// Returns 1 when fewer than two observations are available.
    pub fn raw_ratio<M: VarianceModel>(
        &self,
        observations: &[Observation],
        target: f64,
        model: &M,
    ) -> Result<f64> {
        if observations.len() < 2 {
            return Ok(1.0);
        }

        let mut z = self.z_scores(observations, target, model);
        self.winsorization.apply(&mut z)?;

        let phi = z.iter().map(|z| z * z).sum::<f64>() / z.len() as f64;
        Ok(phi)
    }
}

impl DispersionEstimatorProperties for WinsorizedDispersion {
    fn name(&self) -> &str {
        "Winsorized z-score Dispersion"
    }

    fn is_robust(&self) -> bool {
        !matches!(self.winsorization, Winsorization::None)
    }
}

impl DispersionEstimator for WinsorizedDispersion {
    fn estimate<M: VarianceModel>(
        &self,
        observations: &[Observation],
        target: f64,
        model: &M,
    ) -> Result<f64> {
        let raw = self.raw_ratio(observations, target, model)?;
        let phi = clamp_phi(raw);
        debug!(
            raw_phi = raw,
            phi,
            winsorization = self.winsorization.name(),
            "dispersion ratio"
        );
        Ok(phi)
    }
}
