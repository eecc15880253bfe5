//! Outlier classification against control limits

use crate::types::LimitRecord;
use funnel_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Side(s) of the funnel on which a group may be flagged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutlierDirection {
    Upper,
    Lower,
    Both,
}

impl OutlierDirection {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Upper => "upper",
            Self::Lower => "lower",
            Self::Both => "both",
        }
    }

    fn checks_upper(&self) -> bool {
        matches!(self, Self::Upper | Self::Both)
    }

    fn checks_lower(&self) -> bool {
        matches!(self, Self::Lower | Self::Both)
    }
}

impl Default for OutlierDirection {
    fn default() -> Self {
        Self::Both
    }
}

impl FromStr for OutlierDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "upper" => Ok(Self::Upper),
            "lower" => Ok(Self::Lower),
            "both" => Ok(Self::Both),
            other => Err(Error::unknown_kind("outlier direction", other)),
        }
    }
}

impl fmt::Display for OutlierDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which bands a single group falls outside of
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlierFlags {
    /// Outside the inner (95%) band
    pub two_sigma: bool,
    /// Outside the outer (99.8%) band
    pub three_sigma: bool,
}

impl OutlierFlags {
    pub fn any(&self) -> bool {
        self.two_sigma || self.three_sigma
    }

    /// Tooltip pattern labels, most severe first
    pub fn patterns(&self) -> Vec<&'static str> {
        let mut out = Vec::with_capacity(2);
        if self.three_sigma {
            out.push("Three Sigma Outlier");
        }
        if self.two_sigma {
            out.push("Two Sigma Outlier");
        }
        out
    }
}

/// Flags observed ratios lying outside the funnel
///
/// Comparisons are strict: a ratio sitting exactly on a boundary is not
/// flagged. An undefined boundary never flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutlierClassifier {
    pub direction: OutlierDirection,
    pub flag_two_sigma: bool,
    pub flag_three_sigma: bool,
}

impl Default for OutlierClassifier {
    fn default() -> Self {
        Self {
            direction: OutlierDirection::Both,
            flag_two_sigma: true,
            flag_three_sigma: true,
        }
    }
}

impl OutlierClassifier {
    pub fn new(direction: OutlierDirection, flag_two_sigma: bool, flag_three_sigma: bool) -> Self {
        Self {
            direction,
            flag_two_sigma,
            flag_three_sigma,
        }
    }

    /// Classify a ratio against the limits at its denominator
    pub fn classify(&self, ratio: f64, limits: Option<&LimitRecord>) -> OutlierFlags {
        let Some(limits) = limits else {
            return OutlierFlags::default();
        };
        if !ratio.is_finite() {
            return OutlierFlags::default();
        }

        OutlierFlags {
            two_sigma: self.flag_two_sigma && self.outside(ratio, limits.ll95, limits.ul95),
            three_sigma: self.flag_three_sigma && self.outside(ratio, limits.ll99, limits.ul99),
        }
    }

    /// Look up the limits for `denominator` and classify
    pub fn classify_observation(
        &self,
        ratio: f64,
        denominator: f64,
        records: &[LimitRecord],
    ) -> OutlierFlags {
        self.classify(ratio, find_limits(records, denominator))
    }

    fn outside(&self, ratio: f64, lower: Option<f64>, upper: Option<f64>) -> bool {
        let above = self.direction.checks_upper() && upper.is_some_and(|ul| ratio > ul);
        let below = self.direction.checks_lower() && lower.is_some_and(|ll| ratio < ll);
        above || below
    }
}

/// Limits at exactly `denominator`, or else the nearest record whose outer
/// bounds are both defined
pub fn find_limits(records: &[LimitRecord], denominator: f64) -> Option<&LimitRecord> {
    if let Some(exact) = records.iter().find(|r| r.denominator == denominator) {
        return Some(exact);
    }
    records
        .iter()
        .filter(|r| r.has_outer_limits())
        .min_by(|a, b| {
            let da = (a.denominator - denominator).abs();
            let db = (b.denominator - denominator).abs();
            da.total_cmp(&db)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(denominator: f64) -> LimitRecord {
        LimitRecord {
            denominator,
            ll99: Some(0.02),
            ll95: Some(0.05),
            ul95: Some(0.15),
            ul99: Some(0.18),
            target: 0.1,
            alt_target: None,
            phi: 1.0,
        }
    }

    #[test]
    fn test_inside_funnel() {
        let flags = OutlierClassifier::default().classify(0.1, Some(&record(100.0)));
        assert_eq!(flags, OutlierFlags::default());
        assert!(!flags.any());
    }

    #[test]
    fn test_two_and_three_sigma() {
        let c = OutlierClassifier::default();
        let r = record(100.0);

        let flags = c.classify(0.16, Some(&r));
        assert!(flags.two_sigma);
        assert!(!flags.three_sigma);

        let flags = c.classify(0.25, Some(&r));
        assert!(flags.two_sigma && flags.three_sigma);
        assert_eq!(flags.patterns(), vec!["Three Sigma Outlier", "Two Sigma Outlier"]);

        let flags = c.classify(0.01, Some(&r));
        assert!(flags.two_sigma && flags.three_sigma);
    }

    #[test]
    fn test_boundary_is_not_outlier() {
        let flags = OutlierClassifier::default().classify(0.18, Some(&record(100.0)));
        assert!(flags.two_sigma);
        assert!(!flags.three_sigma);
    }

    #[test]
    fn test_direction_filter() {
        let r = record(100.0);
        let upper = OutlierClassifier::new(OutlierDirection::Upper, true, true);
        let lower = OutlierClassifier::new(OutlierDirection::Lower, true, true);

        assert!(upper.classify(0.25, Some(&r)).three_sigma);
        assert!(!upper.classify(0.01, Some(&r)).any());
        assert!(lower.classify(0.01, Some(&r)).three_sigma);
        assert!(!lower.classify(0.25, Some(&r)).any());
    }

    #[test]
    fn test_disabled_flags() {
        let c = OutlierClassifier::new(OutlierDirection::Both, false, true);
        let flags = c.classify(0.25, Some(&record(100.0)));
        assert!(!flags.two_sigma);
        assert!(flags.three_sigma);
    }

    #[test]
    fn test_undefined_lower_bound_never_flags() {
        let mut r = record(10.0);
        r.ll99 = None;
        r.ll95 = None;
        let flags = OutlierClassifier::default().classify(0.0, Some(&r));
        assert!(!flags.any());
    }

    #[test]
    fn test_missing_limits() {
        let flags = OutlierClassifier::default().classify(5.0, None);
        assert!(!flags.any());
    }

    #[test]
    fn test_find_limits() {
        let mut partial = record(40.0);
        partial.ll99 = None;
        let records = vec![record(10.0), partial, record(100.0)];

        assert_eq!(find_limits(&records, 40.0).unwrap().denominator, 40.0);
        // 45 is closest to 40, but 40 has an undefined outer bound
        assert_eq!(find_limits(&records, 45.0).unwrap().denominator, 10.0);
        assert_eq!(find_limits(&records, 90.0).unwrap().denominator, 100.0);
        assert!(find_limits(&[], 1.0).is_none());
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!("upper".parse::<OutlierDirection>().unwrap(), OutlierDirection::Upper);
        assert!("sideways".parse::<OutlierDirection>().is_err());
        let d: OutlierDirection = serde_json::from_str("\"both\"").unwrap();
        assert_eq!(d, OutlierDirection::Both);
    }
}
