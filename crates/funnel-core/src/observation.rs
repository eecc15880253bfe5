//! Observations and batch validation
//!
//! An [`Observation`] is one input row: a numerator, a strictly positive
//! denominator and the category it belongs to. Rows that fail structural
//! validation are never silently dropped; [`ObservationBatch::partition`]
//! keeps them as [`ObservationWarning`]s alongside the valid rows.

use crate::error::{Error, InvalidReason, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single (numerator, denominator, category) row supplied by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Host-side row identifier
    pub id: usize,
    /// Observed count (events, deaths, defects, ...)
    pub numerator: f64,
    /// Sample size, exposure, or expected count
    pub denominator: f64,
    /// Group label
    pub category: String,
}

impl Observation {
    /// Create a new observation
    pub fn new(id: usize, numerator: f64, denominator: f64, category: impl Into<String>) -> Self {
        Self {
            id,
            numerator,
            denominator,
            category: category.into(),
        }
    }

    /// Observed ratio `numerator / denominator`
    #[inline]
    pub fn ratio(&self) -> f64 {
        self.numerator / self.denominator
    }

    /// Check the observation is structurally usable
    pub fn validate(&self) -> Result<()> {
        self.check().map_err(|reason| Error::InvalidObservation {
            id: self.id,
            reason,
        })
    }

    fn check(&self) -> std::result::Result<(), InvalidReason> {
        if !self.numerator.is_finite() || !self.denominator.is_finite() {
            return Err(InvalidReason::NonFinite);
        }
        if self.denominator <= 0.0 {
            return Err(InvalidReason::NonPositiveDenominator(self.denominator));
        }
        if self.numerator < 0.0 {
            return Err(InvalidReason::NegativeNumerator(self.numerator));
        }
        Ok(())
    }
}

/// A rejected observation, reported back to the host
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObservationWarning {
    pub id: usize,
    pub category: String,
    pub reason: InvalidReason,
}

impl fmt::Display for ObservationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "observation {} ({}) excluded: {}", self.id, self.category, self.reason)
    }
}

/// Observations split into the valid set and the rejected rows
#[derive(Debug, Clone, Default)]
pub struct ObservationBatch {
    valid: Vec<Observation>,
    warnings: Vec<ObservationWarning>,
}

impl ObservationBatch {
    /// Validate every row, keeping input order within each partition
    pub fn partition<I>(observations: I) -> Self
    where
        I: IntoIterator<Item = Observation>,
    {
        let mut batch = Self::default();
        for observation in observations {
            match observation.check() {
                Ok(()) => batch.valid.push(observation),
                Err(reason) => batch.warnings.push(ObservationWarning {
                    id: observation.id,
                    category: observation.category,
                    reason,
                }),
            }
        }
        batch
    }

    /// Observations that passed validation
    pub fn valid(&self) -> &[Observation] {
        &self.valid
    }

    /// Rows excluded from every estimate
    pub fn warnings(&self) -> &[ObservationWarning] {
        &self.warnings
    }

    /// Number of valid observations
    pub fn len(&self) -> usize {
        self.valid.len()
    }

    /// True when no observation survived validation
    pub fn is_empty(&self) -> bool {
        self.valid.is_empty()
    }

    /// Split into owned parts
    pub fn into_parts(self) -> (Vec<Observation>, Vec<ObservationWarning>) {
        (self.valid, self.warnings)
    }
}
