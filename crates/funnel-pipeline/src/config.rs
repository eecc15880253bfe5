//! Configuration for funnel computations

use funnel_core::{ChartTypeKind, Error, Result};
use funnel_dispersion::{DispersionMode, Winsorization, WinsorizedDispersion};
use funnel_limits::{
    AxisRange, ControlLevel, LimitCalculator, OutlierClassifier, OutlierDirection, Transform,
    TransformKind,
};
use serde::{Deserialize, Serialize};

/// How φ is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispersionSetting {
    Auto,
    Manual,
}

impl Default for DispersionSetting {
    fn default() -> Self {
        Self::Auto
    }
}

/// Inner and outer band coverage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlLevels {
    pub inner: ControlLevel,
    pub outer: ControlLevel,
}

impl Default for ControlLevels {
    fn default() -> Self {
        Self {
            inner: ControlLevel::NINETY_FIVE,
            outer: ControlLevel::NINETY_NINE_POINT_EIGHT,
        }
    }
}

/// User-facing settings for a funnel chart
///
/// Every field has a default, so a partial JSON object is accepted.
/// Unknown enumerated values (chart type, transformation, direction) fail
/// at parse time; cross-field rules are checked by [`validate`](Self::validate).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FunnelConfig {
    pub chart_type: ChartTypeKind,
    pub dispersion_mode: DispersionSetting,
    /// Required when `dispersion_mode` is manual
    pub manual_phi: Option<f64>,
    pub winsorization: Winsorization,
    /// Optional reference line drawn alongside the pooled target
    pub alt_target: Option<f64>,
    pub transformation: TransformKind,
    /// Display scale factor, e.g. 100 for percentages
    pub multiplier: f64,
    pub outlier_direction: OutlierDirection,
    pub flag_two_sigma: bool,
    pub flag_three_sigma: bool,
    /// Decimal places in tooltips
    pub sig_figs: usize,
    pub control_levels: ControlLevels,
    pub axis: AxisRange,
    /// Extra evenly spaced denominators for smooth limit curves
    pub grid_points: usize,
}

impl Default for FunnelConfig {
    fn default() -> Self {
        Self {
            chart_type: ChartTypeKind::Proportion,
            dispersion_mode: DispersionSetting::Auto,
            manual_phi: None,
            winsorization: Winsorization::default(),
            alt_target: None,
            transformation: TransformKind::Identity,
            multiplier: 1.0,
            outlier_direction: OutlierDirection::Both,
            flag_two_sigma: true,
            flag_three_sigma: true,
            sig_figs: 2,
            control_levels: ControlLevels::default(),
            axis: AxisRange::default(),
            grid_points: 0,
        }
    }
}

impl FunnelConfig {
    /// Parse a (possibly partial) JSON settings object
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Resolved dispersion mode
    pub fn dispersion(&self) -> Result<DispersionMode> {
        let mode = match self.dispersion_mode {
            DispersionSetting::Auto => DispersionMode::Auto,
            DispersionSetting::Manual => {
                let phi = self.manual_phi.ok_or_else(|| {
                    Error::Configuration("manual dispersion mode requires manual_phi".to_string())
                })?;
                DispersionMode::Manual(phi)
            }
        };
        mode.validate()?;
        Ok(mode)
    }

    /// Check cross-field rules and build the engine's working parameters
    pub fn validate(&self) -> Result<EngineParameters> {
        let dispersion = self.dispersion()?;
        self.winsorization.validate()?;
        self.axis.validate()?;

        if let Some(alt) = self.alt_target {
            if !alt.is_finite() {
                return Err(Error::Configuration(format!(
                    "alt_target must be finite, got {alt}"
                )));
            }
        }

        let calculator =
            LimitCalculator::new(self.control_levels.inner, self.control_levels.outer)?;
        let transform = Transform::new(self.transformation, self.multiplier)?;

        Ok(EngineParameters {
            model: self.chart_type,
            dispersion,
            estimator: WinsorizedDispersion::new(self.winsorization),
            calculator,
            classifier: OutlierClassifier::new(
                self.outlier_direction,
                self.flag_two_sigma,
                self.flag_three_sigma,
            ),
            transform,
            axis: self.axis,
            alt_target: self.alt_target,
            grid_points: self.grid_points,
            sig_figs: self.sig_figs,
        })
    }
}

/// Validated, ready-to-run form of a [`FunnelConfig`]
#[derive(Debug, Clone, Copy)]
pub struct EngineParameters {
    pub model: ChartTypeKind,
    pub dispersion: DispersionMode,
    pub estimator: WinsorizedDispersion,
    pub calculator: LimitCalculator,
    pub classifier: OutlierClassifier,
    pub transform: Transform,
    pub axis: AxisRange,
    pub alt_target: Option<f64>,
    pub grid_points: usize,
    pub sig_figs: usize,
}
