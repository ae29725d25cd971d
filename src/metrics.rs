//! Residual-based accuracy metrics for predicted vs. observed case counts.
//!
//! Computes MAE, RMSE, MAPE, a guarded R², and *approximate* information
//! criteria over paired series. The AIC/BIC here are the dashboard's
//! sum-of-squares shortcut with a fixed parameter count — they are not
//! likelihood-based and must not be compared against model-selection
//! criteria from the offline Negative Binomial fit; hence the `approx_`
//! names.

use serde::{Deserialize, Serialize};

use crate::error::{GwnbrError, Result};

/// Fixed parameter count for the approximate information criteria:
/// intercept + six predictors.
pub const APPROX_PARAM_COUNT: usize = 7;

/// Accuracy metrics over one or more regions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegressionMetrics {
    /// Classical R² = 1 − SS_res/SS_tot; 0 when n ≤ 1 or SS_tot = 0
    /// (degenerate cases where R² is mathematically undefined)
    pub r2: f64,
    /// Root mean squared error
    pub rmse: f64,
    /// Mean absolute error
    pub mae: f64,
    /// Mean absolute percentage error; terms with `observed == 0` are
    /// skipped, not zero-filled (a deliberate exclusion, not an error)
    pub mape: f64,
    /// Approximate AIC: `n·ln(SS_res/n) + 2k` with k = [`APPROX_PARAM_COUNT`]
    pub approx_aic: f64,
    /// Approximate BIC: `n·ln(SS_res/n) + ln(n)·k`
    pub approx_bic: f64,
}

/// Computes accuracy metrics over paired observed/predicted series.
///
/// Empty inputs return all-zero metrics.
///
/// # Errors
///
/// Returns [`GwnbrError::LengthMismatch`] when the slices differ in
/// length.
///
/// # Examples
///
/// ```
/// use gwnbr::metrics::compute_metrics;
///
/// let m = compute_metrics(&[0.0, 10.0], &[1.0, 9.0]).unwrap();
/// // the observed == 0 pair is excluded from MAPE
/// assert!((m.mape - 10.0).abs() < 1e-12);
/// ```
pub fn compute_metrics(observed: &[f64], predicted: &[f64]) -> Result<RegressionMetrics> {
    if observed.len() != predicted.len() {
        return Err(GwnbrError::LengthMismatch {
            expected: observed.len(),
            actual: predicted.len(),
        });
    }
    if observed.is_empty() {
        return Ok(RegressionMetrics::default());
    }

    let n = observed.len() as f64;

    let mut ss_res = 0.0;
    let mut abs_sum = 0.0;
    for (o, p) in observed.iter().zip(predicted.iter()) {
        let residual = o - p;
        ss_res += residual * residual;
        abs_sum += residual.abs();
    }
    let rmse = (ss_res / n).sqrt();
    let mae = abs_sum / n;

    // MAPE over the non-zero observations only
    let mut mape_sum = 0.0;
    let mut mape_terms = 0usize;
    for (o, p) in observed.iter().zip(predicted.iter()) {
        if *o != 0.0 {
            mape_sum += ((o - p) / o).abs();
            mape_terms += 1;
        }
    }
    let mape = if mape_terms == 0 {
        0.0
    } else {
        mape_sum / mape_terms as f64 * 100.0
    };

    let mean = observed.iter().sum::<f64>() / n;
    let ss_tot: f64 = observed.iter().map(|o| (o - mean).powi(2)).sum();
    let r2 = if observed.len() <= 1 || ss_tot == 0.0 {
        0.0
    } else {
        1.0 - ss_res / ss_tot
    };

    let k = APPROX_PARAM_COUNT as f64;
    let deviance = n * (ss_res / n).ln();
    Ok(RegressionMetrics {
        r2,
        rmse,
        mae,
        mape,
        approx_aic: deviance + 2.0 * k,
        approx_bic: deviance + n.ln() * k,
    })
}
