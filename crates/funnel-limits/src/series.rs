//! Regrouping limit records into renderable line series
//!
//! Limit records are indexed by denominator; a chart draws one continuous
//! curve per boundary label. [`LimitSeriesBuilder`] pivots the records into
//! label-indexed series on the display scale, sorted by denominator, with
//! each point carrying a [`PointStatus`] so the renderer can leave gaps.

use crate::transform::{Transform, TransformFallbacks};
use crate::types::LimitRecord;
use funnel_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Boundary label, one per rendered curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitLabel {
    Ll99,
    Ll95,
    Ul95,
    Ul99,
    Target,
    AltTarget,
}

impl LimitLabel {
    pub const ALL: [LimitLabel; 6] = [
        Self::Ll99,
        Self::Ll95,
        Self::Ul95,
        Self::Ul99,
        Self::Target,
        Self::AltTarget,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ll99 => "ll99",
            Self::Ll95 => "ll95",
            Self::Ul95 => "ul95",
            Self::Ul99 => "ul99",
            Self::Target => "target",
            Self::AltTarget => "alt_target",
        }
    }

    /// Raw value of this boundary in a record
    pub fn value_in(&self, record: &LimitRecord) -> Option<f64> {
        match self {
            Self::Ll99 => record.ll99,
            Self::Ll95 => record.ll95,
            Self::Ul95 => record.ul95,
            Self::Ul99 => record.ul99,
            Self::Target => Some(record.target),
            Self::AltTarget => record.alt_target,
        }
    }
}

impl fmt::Display for LimitLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render state of a single series point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointStatus {
    Valid,
    /// No limit exists at this denominator
    Undefined,
    /// Computed, but outside the displayed axis range
    OutsideAxis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub denominator: f64,
    pub value: Option<f64>,
    pub status: PointStatus,
}

impl SeriesPoint {
    pub fn is_renderable(&self) -> bool {
        self.status == PointStatus::Valid
    }
}

/// Optional display-scale bounds of the value axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisRange {
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}

impl AxisRange {
    pub fn new(lower: Option<f64>, upper: Option<f64>) -> Result<Self> {
        let range = Self { lower, upper };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<()> {
        for bound in [self.lower, self.upper].into_iter().flatten() {
            if !bound.is_finite() {
                return Err(Error::Configuration(format!(
                    "axis bounds must be finite, got {bound}"
                )));
            }
        }
        if let (Some(lo), Some(hi)) = (self.lower, self.upper) {
            if lo >= hi {
                return Err(Error::Configuration(format!(
                    "axis lower bound {lo} must be below upper bound {hi}"
                )));
            }
        }
        Ok(())
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lower.map_or(true, |lo| value >= lo) && self.upper.map_or(true, |hi| value <= hi)
    }
}

/// Label-indexed limit curves
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineSeriesGroup {
    series: BTreeMap<LimitLabel, Vec<SeriesPoint>>,
}

impl LineSeriesGroup {
    pub fn get(&self, label: LimitLabel) -> Option<&[SeriesPoint]> {
        self.series.get(&label).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (LimitLabel, &[SeriesPoint])> {
        self.series.iter().map(|(label, points)| (*label, points.as_slice()))
    }

    pub fn labels(&self) -> impl Iterator<Item = LimitLabel> + '_ {
        self.series.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Points of one curve that should actually be drawn
    pub fn renderable(&self, label: LimitLabel) -> Vec<(f64, f64)> {
        self.get(label)
            .unwrap_or_default()
            .iter()
            .filter(|p| p.is_renderable())
            .filter_map(|p| Some((p.denominator, p.value?)))
            .collect()
    }
}

/// Builds [`LineSeriesGroup`]s from limit records
#[derive(Debug, Clone, Copy, Default)]
pub struct LimitSeriesBuilder {
    transform: Transform,
    axis: AxisRange,
}

impl LimitSeriesBuilder {
    pub fn new(transform: Transform, axis: AxisRange) -> Self {
        Self { transform, axis }
    }

    pub fn build(&self, records: &[LimitRecord]) -> LineSeriesGroup {
        let mut fallbacks = TransformFallbacks::default();
        self.build_counting(records, &mut fallbacks)
    }

    /// As [`build`](Self::build), recording transform-domain fallbacks
    ///
    /// The alt-target curve is only emitted when some record carries one.
    pub fn build_counting(
        &self,
        records: &[LimitRecord],
        fallbacks: &mut TransformFallbacks,
    ) -> LineSeriesGroup {
        let mut sorted: Vec<&LimitRecord> = records.iter().collect();
        sorted.sort_by(|a, b| a.denominator.total_cmp(&b.denominator));

        let has_alt = sorted.iter().any(|r| r.alt_target.is_some());
        let mut series = BTreeMap::new();

        for label in LimitLabel::ALL {
            if label == LimitLabel::AltTarget && !has_alt {
                continue;
            }
            let points = sorted
                .iter()
                .map(|record| self.point(label, record, fallbacks))
                .collect();
            series.insert(label, points);
        }

        LineSeriesGroup { series }
    }

    fn point(
        &self,
        label: LimitLabel,
        record: &LimitRecord,
        fallbacks: &mut TransformFallbacks,
    ) -> SeriesPoint {
        let denominator = record.denominator;
        let Some(raw) = label.value_in(record) else {
            return SeriesPoint {
                denominator,
                value: None,
                status: PointStatus::Undefined,
            };
        };

        let value = self.transform.apply_or_raw(raw, fallbacks);
        let status = if self.axis.contains(value) {
            PointStatus::Valid
        } else {
            PointStatus::OutsideAxis
        };
        SeriesPoint {
            denominator,
            value: Some(value),
            status,
        }
    }
}
