//! End-to-end funnel plot computation
//!
//! Wires the estimators and limit calculations into a single
//! [`FunnelEngine`] driven by a serde-backed [`FunnelConfig`].
//!
//! # Example
//!
//! ```rust
//! use funnel_core::Observation;
//! use funnel_pipeline::FunnelEngine;
//!
//! let engine = FunnelEngine::from_json(r#"{ "chart_type": "PR", "multiplier": 100 }"#).unwrap();
//! let result = engine
//!     .compute(&[
//!         Observation::new(0, 10.0, 100.0, "A"),
//!         Observation::new(1, 20.0, 200.0, "B"),
//!         Observation::new(2, 5.0, 50.0, "C"),
//!     ])
//!     .unwrap();
//!
//! assert!((result.target - 0.1).abs() < 1e-12);
//! assert!((result.points[0].display_value - 10.0).abs() < 1e-9);
//! ```

pub mod config;
pub mod engine;
pub mod result;
pub mod tooltip;

pub use config::{ControlLevels, DispersionSetting, EngineParameters, FunnelConfig};
pub use engine::FunnelEngine;
pub use result::{FunnelResult, PlotPoint};
pub use tooltip::{TooltipBuilder, TooltipItem};
