//! Full recomputation of a funnel chart
//!
//! [`FunnelEngine`] holds only its validated configuration. Each call to
//! [`compute`](FunnelEngine::compute) runs the whole chain from raw rows to
//! plot-ready output and either returns a complete [`FunnelResult`] or an
//! error, never a partial result.

use crate::config::{EngineParameters, FunnelConfig};
use crate::result::{FunnelResult, PlotPoint};
use crate::tooltip::TooltipBuilder;
use funnel_core::{Error, Observation, ObservationBatch, Result};
use funnel_dispersion::{DispersionEstimator, PooledTarget, TargetEstimator};
use funnel_limits::{denominator_grid, find_limits, LimitSeriesBuilder, TransformFallbacks};
use tracing::{debug, instrument, warn};

#[derive(Debug, Clone)]
pub struct FunnelEngine {
    config: FunnelConfig,
    params: EngineParameters,
}

impl FunnelEngine {
    /// Create an engine, rejecting invalid configuration up front
    pub fn new(config: FunnelConfig) -> Result<Self> {
        let params = config.validate()?;
        Ok(Self { config, params })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::new(FunnelConfig::from_json(json)?)
    }

    pub fn config(&self) -> &FunnelConfig {
        &self.config
    }

    pub fn parameters(&self) -> &EngineParameters {
        &self.params
    }

    /// Replace the configuration; on error the current one is kept
    pub fn reconfigure(&mut self, config: FunnelConfig) -> Result<()> {
        let params = config.validate()?;
        self.config = config;
        self.params = params;
        Ok(())
    }

    /// Run the pipeline over one batch of observations
    ///
    /// Invalid rows are excluded and reported in
    /// [`FunnelResult::warnings`]. Fails with
    /// [`Error::InsufficientData`] when no row is valid.
    #[instrument(
        skip(self, observations),
        fields(n_observations = observations.len(), chart_type = %self.params.model)
    )]
    pub fn compute(&self, observations: &[Observation]) -> Result<FunnelResult> {
        let p = &self.params;

        let (valid, warnings) =
            ObservationBatch::partition(observations.iter().cloned()).into_parts();
        if !warnings.is_empty() {
            warn!(rejected = warnings.len(), "excluded invalid observations");
        }
        if valid.is_empty() {
            return Err(Error::empty_input());
        }

        let target = PooledTarget.estimate(&valid)?;
        let phi = p
            .estimator
            .estimate_with_mode(&valid, target, &p.model, p.dispersion)?;
        debug!(target, phi, dispersion = %p.dispersion, "estimated centerline and dispersion");

        let denominators: Vec<f64> = valid.iter().map(|obs| obs.denominator).collect();
        let grid = denominator_grid(&denominators, p.grid_points);
        let limits = p
            .calculator
            .limits_for_all(&grid, target, p.alt_target, phi, &p.model);

        let mut fallbacks = TransformFallbacks::default();
        let tooltips = TooltipBuilder::new(p.model, p.transform, p.sig_figs);

        let points = valid
            .into_iter()
            .map(|obs| {
                let ratio = obs.ratio();
                let record = find_limits(&limits, obs.denominator);
                let flags = p.classifier.classify(ratio, record);
                let display_value = p.transform.apply_or_raw(ratio, &mut fallbacks);
                let tooltip = tooltips.build(&obs, display_value, target, record, flags);
                PlotPoint {
                    id: obs.id,
                    category: obs.category,
                    numerator: obs.numerator,
                    denominator: obs.denominator,
                    ratio,
                    display_value,
                    flags,
                    tooltip,
                }
            })
            .collect::<Vec<_>>();

        let series =
            LimitSeriesBuilder::new(p.transform, p.axis).build_counting(&limits, &mut fallbacks);

        if !fallbacks.is_empty() {
            warn!(
                count = fallbacks.count(),
                transformation = %p.transform.kind(),
                "values outside the transformation's domain shown untransformed"
            );
        }

        Ok(FunnelResult {
            target,
            phi,
            limits,
            series,
            points,
            warnings,
            transform_fallbacks: fallbacks.count(),
        })
    }
}
