//! Target and overdispersion estimation for funnel plots
//!
//! This crate provides the two estimates every set of control limits is
//! built from:
//!
//! - **Target**: the pooled centerline `sum(numerator) / sum(denominator)`
//! - **Dispersion ratio (φ)**: the mean squared winsorized z-score, a
//!   multiplicative inflation of the nominal sampling variance
//!
//! # Overview
//!
//! Groups compared on a funnel plot often vary more than the binomial or
//! Poisson model predicts. Without an adjustment the limits are too narrow
//! and too many groups are flagged. φ measures that excess, while
//! winsorization keeps a handful of genuine outliers from inflating it.
//!
//! | Winsorization | Residuals clipped at | Use When |
//! |---------------|----------------------|----------|
//! | Fixed | `±c` (default 3) | Simple, sample-size independent |
//! | Quantile | 10% / 90% order statistics | Following Spiegelhalter (2005) |
//! | None | never | Diagnostics only |
//!
//! # Examples
//!
//! ```rust
//! use funnel_core::{ChartTypeKind, Observation};
//! use funnel_dispersion::{
//!     DispersionEstimator, DispersionMode, PooledTarget, TargetEstimator, WinsorizedDispersion,
//! };
//!
//! let data = vec![
//!     Observation::new(0, 10.0, 100.0, "A"),
//!     Observation::new(1, 20.0, 200.0, "B"),
//!     Observation::new(2, 5.0, 50.0, "C"),
//! ];
//! let model = ChartTypeKind::Proportion;
//!
//! let target = PooledTarget.estimate(&data).unwrap();
//! assert!((target - 0.1).abs() < 1e-12);
//!
//! let phi = WinsorizedDispersion::default()
//!     .estimate_with_mode(&data, target, &model, DispersionMode::Auto)
//!     .unwrap();
//! assert_eq!(phi, 1.0);
//! ```

pub mod dispersion;
pub mod mode;
pub mod target;
pub mod traits;
pub mod winsorize;

// Re-exports
pub use dispersion::WinsorizedDispersion;
pub use mode::DispersionMode;
pub use target::PooledTarget;
pub use traits::{clamp_phi, DispersionEstimator, DispersionEstimatorProperties, TargetEstimator};
pub use winsorize::{Winsorization, DEFAULT_WINSOR_BOUND, DEFAULT_WINSOR_PROPORTION};
