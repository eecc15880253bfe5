//! Per-denominator control limit calculation
//!
//! Each boundary is `expected ± z * sqrt(phi * variance)`, evaluated at a
//! single denominator. Evaluating it at every distinct denominator traces
//! out the funnel: the band narrows as the denominator grows.

use crate::types::{ControlLevel, LimitRecord};
use funnel_core::{Error, Result, VarianceModel};
use ordered_float::OrderedFloat;
use std::collections::BTreeSet;
use tracing::debug;

/// Calculator for the inner (95%) and outer (99.8%) funnel bands
#[derive(Debug, Clone, Copy)]
pub struct LimitCalculator {
    inner: ControlLevel,
    outer: ControlLevel,
    z_inner: f64,
    z_outer: f64,
}

impl LimitCalculator {
    /// Create a calculator for the given bands; the outer band must be wider
    pub fn new(inner: ControlLevel, outer: ControlLevel) -> Result<Self> {
        if inner.value() >= outer.value() {
            return Err(Error::Configuration(format!(
                "inner control level {inner} must be below outer level {outer}"
            )));
        }
        Ok(Self {
            inner,
            outer,
            z_inner: inner.z()?,
            z_outer: outer.z()?,
        })
    }

    /// Conventional 95% / 99.8% funnel limits
    pub fn funnel() -> Result<Self> {
        Self::new(ControlLevel::NINETY_FIVE, ControlLevel::NINETY_NINE_POINT_EIGHT)
    }

    pub fn inner_level(&self) -> ControlLevel {
        self.inner
    }

    pub fn outer_level(&self) -> ControlLevel {
        self.outer
    }

    pub fn z_inner(&self) -> f64 {
        self.z_inner
    }

    pub fn z_outer(&self) -> f64 {
        self.z_outer
    }

    /// Control limits at a single denominator
    pub fn limits_for<M: VarianceModel>(
        &self,
        denominator: f64,
        target: f64,
        alt_target: Option<f64>,
        phi: f64,
        model: &M,
    ) -> LimitRecord {
        let expected = model.expected(denominator, target);
        let se = (phi * model.variance(denominator, target)).sqrt();
        let range = model.valid_range();

        let (ll95, ul95) = band(expected, self.z_inner, se, range);
        let (ll99, ul99) = band(expected, self.z_outer, se, range);

        LimitRecord {
            denominator,
            ll99,
            ll95,
            ul95,
            ul99,
            target,
            alt_target,
            phi,
        }
    }

    /// One record per distinct denominator, sorted ascending
    pub fn limits_for_all<M: VarianceModel>(
        &self,
        denominators: &[f64],
        target: f64,
        alt_target: Option<f64>,
        phi: f64,
        model: &M,
    ) -> Vec<LimitRecord> {
        let records: Vec<LimitRecord> = distinct_denominators(denominators.iter().copied())
            .into_iter()
            .map(|d| self.limits_for(d, target, alt_target, phi, model))
            .collect();
        debug!(records = records.len(), phi, "computed control limits");
        records
    }
}

/// Lower and upper boundary at critical value `z`
///
/// Upper bounds are clipped to the indicator's maximum; lower bounds below
/// the indicator's minimum are undefined rather than clipped.
fn band(expected: f64, z: f64, se: f64, (min, max): (f64, Option<f64>)) -> (Option<f64>, Option<f64>) {
    if !se.is_finite() || !expected.is_finite() {
        return (None, None);
    }

    let lower = expected - z * se;
    let upper = expected + z * se;

    let lower = (lower >= min).then_some(lower);
    let upper = match max {
        Some(max) => upper.min(max),
        None => upper,
    };
    (lower, Some(upper))
}

/// Distinct positive finite denominators in ascending order
pub fn distinct_denominators<I>(denominators: I) -> Vec<f64>
where
    I: IntoIterator<Item = f64>,
{
    denominators
        .into_iter()
        .filter(|d| d.is_finite() && *d > 0.0)
        .map(OrderedFloat)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(|d| d.0)
        .collect()
}

/// Observed denominators plus `grid_points` evenly spaced denominators
/// spanning the observed range, deduplicated and sorted
pub fn denominator_grid(denominators: &[f64], grid_points: usize) -> Vec<f64> {
    let observed = distinct_denominators(denominators.iter().copied());
    let (Some(&min), Some(&max)) = (observed.first(), observed.last()) else {
        return observed;
    };
    if grid_points < 2 || max <= min {
        return observed;
    }

    let step = (max - min) / (grid_points - 1) as f64;
    let grid = (0..grid_points).map(|i| min + step * i as f64);
    distinct_denominators(observed.into_iter().chain(grid))
}
