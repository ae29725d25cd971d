//! Significance classification for Wald statistics.
//!
//! A single two-sided 95% critical value is used everywhere a coefficient
//! is classified — equation rendering, interpretation, and summary counts
//! all call [`is_significant`]. Centralizing the constant keeps those views
//! consistent; changing the threshold in one call site but not the others
//! would let the equation mark a term the narrative calls non-significant.

use serde::{Deserialize, Serialize};

/// Two-sided critical value for the 95% confidence level.
pub const Z_CRITICAL_95: f64 = 1.96;

/// Two-sided critical value for the 99% confidence level.
pub const Z_CRITICAL_99: f64 = 2.576;

/// Classifies a Wald z-statistic at the 95% level.
///
/// The comparison is strict: `|z| > 1.96`, so a statistic exactly at the
/// critical value is not significant.
///
/// # Examples
///
/// ```
/// use gwnbr::significance::is_significant;
///
/// assert!(!is_significant(1.96));
/// assert!(is_significant(1.9601));
/// assert!(is_significant(-2.5));
/// ```
#[must_use]
pub fn is_significant(z: f64) -> bool {
    z.abs() > Z_CRITICAL_95
}

/// Confidence level for interval construction.
///
/// Only these two levels exist; the evaluator carries the two critical
/// values as literals rather than computing a general inverse normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    /// 95% two-sided interval (z = 1.96)
    #[default]
    NinetyFive,
    /// 99% two-sided interval (z = 2.576)
    NinetyNine,
}

impl ConfidenceLevel {
    /// The two-sided critical value for this level.
    #[must_use]
    pub const fn critical_value(self) -> f64 {
        match self {
            ConfidenceLevel::NinetyFive => Z_CRITICAL_95,
            ConfidenceLevel::NinetyNine => Z_CRITICAL_99,
        }
    }
}
