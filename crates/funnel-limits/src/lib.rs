//! Funnel control limits, outlier flags and display series
//!
//! Given a target, a dispersion ratio φ and a variance model, this crate
//! computes the inner and outer control boundaries at each denominator,
//! flags groups lying outside them, and turns the boundaries into
//! label-indexed curves on the display scale.
//!
//! # Examples
//!
//! ```rust
//! use funnel_core::ChartTypeKind;
//! use funnel_limits::{LimitCalculator, LimitLabel, LimitSeriesBuilder, OutlierClassifier};
//!
//! let calc = LimitCalculator::funnel().unwrap();
//! let records = calc.limits_for_all(&[50.0, 100.0, 400.0], 0.1, None, 1.0, &ChartTypeKind::Proportion);
//! assert_eq!(records.len(), 3);
//!
//! let flags = OutlierClassifier::default().classify_observation(0.3, 100.0, &records);
//! assert!(flags.three_sigma);
//!
//! let series = LimitSeriesBuilder::default().build(&records);
//! assert_eq!(series.renderable(LimitLabel::Target).len(), 3);
//! ```

pub mod calculator;
pub mod outliers;
pub mod series;
pub mod transform;
pub mod types;

pub use calculator::{denominator_grid, distinct_denominators, LimitCalculator};
pub use outliers::{find_limits, OutlierClassifier, OutlierDirection, OutlierFlags};
pub use series::{AxisRange, LimitLabel, LimitSeriesBuilder, LineSeriesGroup, PointStatus, SeriesPoint};
pub use transform::{Transform, TransformFallbacks, TransformKind};
pub use types::{ControlLevel, LimitRecord};
