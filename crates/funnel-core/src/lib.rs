//! Core types and traits for funnel plot analysis
//!
//! This crate provides the building blocks shared by the estimator,
//! limit and pipeline crates:
//!
//! - [`Observation`] rows and their validation into an [`ObservationBatch`]
//! - [`ChartTypeKind`], the closed set of indicator kinds, and the
//!   [`VarianceModel`] trait it implements
//! - The unified [`Error`] type
//! - Normal quantile helpers in [`math`]
//!
//! # Example
//!
//! ```rust
//! use funnel_core::{ChartTypeKind, Observation, ObservationBatch, VarianceModel};
//!
//! let batch = ObservationBatch::partition(vec![
//!     Observation::new(0, 10.0, 100.0, "A"),
//!     Observation::new(1, 4.0, 0.0, "B"), // rejected, zero denominator
//! ]);
//! assert_eq!(batch.len(), 1);
//! assert_eq!(batch.warnings().len(), 1);
//!
//! let model = ChartTypeKind::Proportion;
//! let se = model.standard_error(100.0, 0.1);
//! assert!((se - 0.03).abs() < 1e-12);
//! ```

pub mod chart_type;
pub mod error;
pub mod math;
pub mod observation;

// Re-export core types
pub use chart_type::{ChartTypeKind, VarianceModel};
pub use error::{Error, InvalidReason, Result};
pub use observation::{Observation, ObservationBatch, ObservationWarning};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ChartTypeKind, Error, Observation, ObservationBatch, ObservationWarning, Result,
        VarianceModel,
    };
}
