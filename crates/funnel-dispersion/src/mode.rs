//! Auto / manual dispersion selection

use funnel_core::{Error, Result};
use std::fmt;

/// How the dispersion ratio φ is obtained for a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DispersionMode {
    /// Estimate φ from the current observations on every update
    Auto,
    /// Use a configured φ, held constant until reconfigured
    Manual(f64),
}

impl DispersionMode {
    /// Reject manual values that cannot scale a variance
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::Auto => Ok(()),
            Self::Manual(phi) if phi.is_finite() && phi > 0.0 => Ok(()),
            Self::Manual(phi) => Err(Error::Configuration(format!(
                "manual dispersion ratio must be positive and finite, got {phi}"
            ))),
        }
    }

    pub fn is_manual(&self) -> bool {
        matches!(self, Self::Manual(_))
    }
}

impl Default for DispersionMode {
    fn default() -> Self {
        Self::Auto
    }
}

impl fmt::Display for DispersionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Manual(phi) => write!(f, "manual (phi = {phi})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_manual() {
        assert!(DispersionMode::Auto.validate().is_ok());
        assert!(DispersionMode::Manual(4.0).validate().is_ok());
        assert!(DispersionMode::Manual(0.5).validate().is_ok());
        assert!(DispersionMode::Manual(0.0).validate().unwrap_err().is_configuration());
        assert!(DispersionMode::Manual(-1.0).validate().is_err());
        assert!(DispersionMode::Manual(f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(DispersionMode::Auto.to_string(), "auto");
        assert_eq!(DispersionMode::Manual(4.0).to_string(), "manual (phi = 4)");
        assert!(DispersionMode::Manual(2.0).is_manual());
    }
}
