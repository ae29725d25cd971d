//! Rendering of the fitted equation for one region.
//!
//! Produces the display form
//! `ln(μ) = 1.2345678 + 0.5000000·X1* - 0.2000000·X2 ...` where a trailing
//! `*` marks a term whose coefficient is statistically significant. Term
//! order is always intercept, X1..X6 — it never depends on magnitude or
//! significance.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GwnbrError, Result};
use crate::model::{CoefficientRecord, Predictor};

/// Magnitude below which a coefficient renders as exactly zero.
///
/// Coefficients are displayed at 7 decimal places; anything smaller is
/// floating noise and would otherwise render as a spurious signed term.
const DISPLAY_EPSILON: f64 = 1e-7;

/// One predictor term of the rendered equation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquationTerm {
    /// Which predictor this term multiplies
    pub predictor: Predictor,
    /// Display coefficient (clamped to 0 below [`DISPLAY_EPSILON`])
    pub coefficient: f64,
    /// Whether the term carries the significance marker
    pub significant: bool,
}

/// The fitted equation of one region, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquationDisplay {
    /// Region identifier
    pub region: String,
    /// Display intercept
    pub intercept: f64,
    /// Whether the intercept is significant
    pub intercept_significant: bool,
    /// Predictor terms in fixed order X1..X6
    pub terms: Vec<EquationTerm>,
}

impl EquationDisplay {
    /// Builds the display equation from a fitted coefficient record.
    ///
    /// # Errors
    ///
    /// Returns [`GwnbrError::NonFinite`] when any coefficient is NaN or
    /// infinite — a formatter cannot render those, and passing them
    /// through would hide a data problem inside a display string.
    pub fn from_record(coef: &CoefficientRecord) -> Result<Self> {
        let intercept = clamp_display(coef.region.as_str(), "intercept", coef.intercept.value)?;
        let mut terms = Vec::with_capacity(Predictor::ALL.len());
        for predictor in Predictor::ALL {
            let c = coef.coefficient(predictor);
            terms.push(EquationTerm {
                predictor,
                coefficient: clamp_display(coef.region.as_str(), predictor.csv_key(), c.value)?,
                significant: c.is_significant(),
            });
        }
        Ok(Self {
            region: coef.region.clone(),
            intercept,
            intercept_significant: coef.intercept.is_significant(),
            terms,
        })
    }
}

fn clamp_display(region: &str, field: &str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(GwnbrError::NonFinite {
            context: format!("equation term '{field}' for region '{region}'"),
            value,
        });
    }
    if value.abs() < DISPLAY_EPSILON {
        Ok(0.0)
    } else {
        Ok(value)
    }
}

impl fmt::Display for EquationDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ln(μ) = {:.7}", self.intercept)?;
        for term in &self.terms {
            let sign = if term.coefficient < 0.0 { '-' } else { '+' };
            let marker = if term.significant { "*" } else { "" };
            write!(
                f,
                " {sign} {:.7}·{}{marker}",
                term.coefficient.abs(),
                term.predictor.symbol()
            )?;
        }
        Ok(())
    }
}

/// Convenience wrapper: renders the equation string directly.
///
/// # Errors
///
/// Same as [`EquationDisplay::from_record`].
pub fn format_equation(coef: &CoefficientRecord) -> Result<String> {
    Ok(EquationDisplay::from_record(coef)?.to_string())
}
