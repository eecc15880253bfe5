//! Output of a single funnel computation

use crate::tooltip::TooltipItem;
use funnel_core::ObservationWarning;
use funnel_limits::{LimitRecord, LineSeriesGroup, OutlierFlags};
use serde::Serialize;

/// One plotted observation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotPoint {
    pub id: usize,
    pub category: String,
    pub numerator: f64,
    pub denominator: f64,
    /// Raw `numerator / denominator`
    pub ratio: f64,
    /// Ratio on the display scale
    pub display_value: f64,
    pub flags: OutlierFlags,
    pub tooltip: Vec<TooltipItem>,
}

/// Self-consistent results of one update
///
/// Built fresh by every [`FunnelEngine::compute`](crate::FunnelEngine::compute)
/// call; nothing in it refers to a previous run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunnelResult {
    pub target: f64,
    pub phi: f64,
    /// Sorted ascending by denominator
    pub limits: Vec<LimitRecord>,
    pub series: LineSeriesGroup,
    /// Valid observations in input order
    pub points: Vec<PlotPoint>,
    /// Rows excluded from every estimate
    pub warnings: Vec<ObservationWarning>,
    /// Plotted values shown untransformed because the transformation was
    /// undefined there
    pub transform_fallbacks: usize,
}

impl FunnelResult {
    pub fn two_sigma_outliers(&self) -> impl Iterator<Item = &PlotPoint> {
        self.points.iter().filter(|p| p.flags.two_sigma)
    }

    pub fn three_sigma_outliers(&self) -> impl Iterator<Item = &PlotPoint> {
        self.points.iter().filter(|p| p.flags.three_sigma)
    }

    pub fn to_json(&self) -> funnel_core::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
