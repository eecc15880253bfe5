//! Funnel plot control limits with overdispersion adjustment
//!
//! Facade over the workspace crates:
//!
//! - [`funnel_core`]: observations, chart types and variance models, errors
//! - [`funnel_dispersion`]: pooled target and winsorized dispersion ratio
//! - [`funnel_limits`]: control limits, outlier flags, display transforms, series
//! - [`funnel_pipeline`]: configuration and the full recomputation engine
//!
//! # Example
//!
//! ```rust
//! use funnel_stats::prelude::*;
//!
//! let engine = FunnelEngine::new(FunnelConfig::default()).unwrap();
//! let result = engine
//!     .compute(&[
//!         Observation::new(0, 10.0, 100.0, "A"),
//!         Observation::new(1, 20.0, 200.0, "B"),
//!     ])
//!     .unwrap();
//! assert_eq!(result.phi, 1.0);
//! ```

pub use funnel_core;
pub use funnel_dispersion;
pub use funnel_limits;
pub use funnel_pipeline;

pub use funnel_core::{ChartTypeKind, Error, Observation, Result};
pub use funnel_pipeline::{FunnelConfig, FunnelEngine, FunnelResult};

pub mod prelude {
    pub use funnel_core::prelude::*;
    pub use funnel_dispersion::{
        DispersionEstimator, DispersionMode, PooledTarget, TargetEstimator, Winsorization,
        WinsorizedDispersion,
    };
    pub use funnel_limits::{
        AxisRange, ControlLevel, LimitCalculator, LimitLabel, LimitRecord, LimitSeriesBuilder,
        OutlierClassifier, OutlierDirection, OutlierFlags, Transform, TransformKind,
    };
    pub use funnel_pipeline::{FunnelConfig, FunnelEngine, FunnelResult, PlotPoint};
}
