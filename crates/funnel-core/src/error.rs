//! Error types for funnel plot analysis
//!
//! Provides a unified error type for all funnel-stats crates.

use serde::Serialize;
use thiserror::Error;

/// Reason an observation was rejected during validation
#[derive(Error, Debug, Clone, Copy, PartialEq, Serialize)]
pub enum InvalidReason {
    /// Denominator is zero or negative
    #[error("denominator must be strictly positive, got {0}")]
    NonPositiveDenominator(f64),

    /// Numerator is negative
    #[error("numerator must be non-negative, got {0}")]
    NegativeNumerator(f64),

    /// Numerator or denominator is NaN or infinite
    #[error("numerator and denominator must be finite")]
    NonFinite,
}

/// Core error type for funnel plot computations
#[derive(Error, Debug)]
pub enum Error {
    /// Unknown chart type, transformation, or otherwise unusable settings
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Not enough valid observations for the requested operation
    #[error("Insufficient data: expected at least {expected} valid observations, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// A single observation failed structural validation
    #[error("Invalid observation {id}: {reason}")]
    InvalidObservation { id: usize, reason: InvalidReason },

    /// A display transformation is undefined for the given value
    #[error("Transform domain error: {kind} is undefined at {value}")]
    TransformDomain { kind: &'static str, value: f64 },

    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// Malformed JSON configuration
    #[error("Configuration error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for an empty observation set
    pub fn empty_input() -> Self {
        Self::InsufficientData {
            expected: 1,
            actual: 0,
        }
    }

    /// Create an error for an unrecognised enumerated setting
    pub fn unknown_kind(setting: &str, value: &str) -> Self {
        Self::Configuration(format!("unknown {setting} '{value}'"))
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::Computation(format!("{context} contains NaN or infinite values"))
    }

    /// Whether this error means "nothing to display" rather than a failure
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::InsufficientData { .. })
    }

    /// Whether this error stems from configuration (fatal for the run)
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::Json(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Configuration("unknown chart type 'XX'".to_string());
        assert_eq!(err.to_string(), "Configuration error: unknown chart type 'XX'");

        let err = Error::InsufficientData { expected: 1, actual: 0 };
        assert_eq!(
            err.to_string(),
            "Insufficient data: expected at least 1 valid observations, got 0"
        );

        let err = Error::InvalidObservation {
            id: 3,
            reason: InvalidReason::NonPositiveDenominator(0.0),
        };
        assert_eq!(
            err.to_string(),
            "Invalid observation 3: denominator must be strictly positive, got 0"
        );

        let err = Error::TransformDomain { kind: "logit", value: 1.0 };
        assert_eq!(err.to_string(), "Transform domain error: logit is undefined at 1");
    }

    #[test]
    fn test_error_helper_functions() {
        let err = Error::empty_input();
        assert!(err.is_insufficient_data());
        match err {
            Error::InsufficientData { expected, actual } => {
                assert_eq!(expected, 1);
                assert_eq!(actual, 0);
            }
            _ => panic!("Wrong error type"),
        }

        let err = Error::unknown_kind("transformation", "sqrt");
        assert!(err.is_configuration());
        assert_eq!(err.to_string(), "Configuration error: unknown transformation 'sqrt'");

        let err = Error::non_finite("z-scores");
        assert_eq!(err.to_string(), "Computation error: z-scores contains NaN or infinite values");
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<f64>("not a number").unwrap_err();
        let err: Error = json_err.into();
        assert!(err.is_configuration());
        assert!(err.to_string().starts_with("Configuration error"));
    }

    #[test]
    fn test_invalid_reason_display() {
        assert_eq!(
            InvalidReason::NegativeNumerator(-2.0).to_string(),
            "numerator must be non-negative, got -2"
        );
        assert_eq!(
            InvalidReason::NonFinite.to_string(),
            "numerator and denominator must be finite"
        );
    }
}
