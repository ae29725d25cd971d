//! Prediction and uncertainty for the fitted GWNBR model.
//!
//! The model uses the canonical log link of the Negative Binomial family:
//! the linear predictor η = β0 + Σ βk·xk maps to the mean via μ = exp(η),
//! and the variance follows the mean-dispersion parameterization
//! V(μ) = μ + μ²/θ.
//!
//! All functions here are pure arithmetic. Invalid inputs are *not*
//! sanitized: a NaN covariate or an overflowing exponent propagates to the
//! output so that bad source data stays visible during triage instead of
//! being clamped into a plausible-looking number.

use serde::{Deserialize, Serialize};

use crate::model::{CoefficientRecord, CovariateRecord, Predictor};
use crate::significance::ConfidenceLevel;

/// Nominal sample size used by the dashboard for standard errors.
///
/// True per-region sample sizes were not propagated from the offline fit;
/// callers that have real sizes should pass them to [`standard_error`]
/// instead of this placeholder.
pub const DEFAULT_NOMINAL_SAMPLE_SIZE: usize = 100;

/// Computes the linear predictor η = β0 + Σ βk·xk over the six predictors.
#[must_use]
pub fn linear_predictor(coef: &CoefficientRecord, x: &CovariateRecord) -> f64 {
    let mut eta = coef.intercept.value;
    for predictor in Predictor::ALL {
        eta += coef.coefficient(predictor).value * x.value(predictor);
    }
    eta
}

/// Predicted mean case count: μ = exp(η).
///
/// No bounds are applied; NaN or overflow in the inputs yields NaN or
/// infinity in the output.
///
/// # Examples
///
/// ```
/// use gwnbr::model::{Coefficient, CoefficientRecord, CovariateRecord, PREDICTOR_COUNT};
/// use gwnbr::predict::predict;
///
/// let mut predictors = [Coefficient::new(0.0, 0.0); PREDICTOR_COUNT];
/// predictors[0] = Coefficient::new(0.5, 2.5);
/// predictors[1] = Coefficient::new(-0.2, 1.0);
/// let coef = CoefficientRecord::new("A", 2.0, Coefficient::new(1.0, 3.0), predictors);
/// let x = CovariateRecord::new("A", 120, [10.0, 5.0, 0.0, 0.0, 0.0, 0.0]);
///
/// // exp(1.0 + 0.5·10 - 0.2·5) = exp(5.0)
/// let mu = predict(&coef, &x);
/// assert!((mu - 5.0f64.exp()).abs() < 1e-9);
/// ```
#[must_use]
pub fn predict(coef: &CoefficientRecord, x: &CovariateRecord) -> f64 {
    linear_predictor(coef, x).exp()
}

/// Standard error of a predicted mean under NB variance V(μ) = μ + μ²/θ.
///
/// Returns `sqrt(V(μ) / n)`. The sample size is an explicit parameter; the
/// dashboard default is [`DEFAULT_NOMINAL_SAMPLE_SIZE`].
#[must_use]
pub fn standard_error(mean: f64, theta: f64, n: usize) -> f64 {
    let variance = mean + mean * mean / theta;
    (variance / n as f64).sqrt()
}

/// A symmetric confidence interval around a predicted mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    /// Lower bound, floored at 0 (a case count cannot be negative)
    pub lower: f64,
    /// Upper bound, unbounded above
    pub upper: f64,
}

impl Interval {
    /// Whether a value lies inside the interval (inclusive).
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

/// Builds a confidence interval `mean ± z·se` with the lower bound floored
/// at 0.
///
/// Only the two supported critical values exist, via [`ConfidenceLevel`].
/// A NaN mean or standard error propagates into both bounds.
#[must_use]
pub fn confidence_interval(mean: f64, se: f64, level: ConfidenceLevel) -> Interval {
    let z = level.critical_value();
    let lower = mean - z * se;
    Interval {
        // not f64::max: that would swallow a NaN lower bound
        lower: if lower < 0.0 { 0.0 } else { lower },
        upper: mean + z * se,
    }
}

/// Full prediction for one region: point estimate, residual against the
/// observed count, and interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    /// Region identifier
    pub region: String,
    /// Predicted mean case count
    pub predicted: f64,
    /// Observed case count
    pub observed: u64,
    /// observed − predicted
    pub residual: f64,
    /// Standard error of the prediction
    pub standard_error: f64,
    /// Confidence interval around the prediction
    pub interval: Interval,
}

impl PredictionResult {
    /// Evaluates the fitted model for one region.
    ///
    /// Uses the nominal sample size [`DEFAULT_NOMINAL_SAMPLE_SIZE`]; use
    /// [`PredictionResult::with_sample_size`] when real sizes are known.
    #[must_use]
    pub fn evaluate(
        coef: &CoefficientRecord,
        x: &CovariateRecord,
        level: ConfidenceLevel,
    ) -> Self {
        Self::with_sample_size(coef, x, level, DEFAULT_NOMINAL_SAMPLE_SIZE)
    }

    /// Evaluates the fitted model with an explicit sample size.
    #[must_use]
    pub fn with_sample_size(
        coef: &CoefficientRecord,
        x: &CovariateRecord,
        level: ConfidenceLevel,
        n: usize,
    ) -> Self {
        let predicted = predict(coef, x);
        let se = standard_error(predicted, coef.theta, n);
        Self {
            region: x.region.clone(),
            predicted,
            observed: x.observed_cases,
            residual: x.observed_cases as f64 - predicted,
            standard_error: se,
            interval: confidence_interval(predicted, se, level),
        }
    }
}
