//! Gwnbr: evaluation and interpretation of fitted Geographically Weighted
//! Negative Binomial Regression models.
//!
//! A GWNBR study fits one Negative Binomial coefficient vector *per
//! location*; estimation (kernel bandwidth selection, IRLS) happens
//! offline in a statistical package. This crate consumes the fitted
//! outputs — coefficients, Wald z-statistics, and the dispersion parameter
//! θ — and provides everything a presentation layer needs on top of them:
//! predicted means, confidence intervals, significance classification,
//! equation rendering, narrative interpretation, and residual-based
//! accuracy metrics.
//!
//! # Quick Start
//!
//! ```
//! use gwnbr::prelude::*;
//!
//! // Fitted coefficients for one region (β0 = 1.0, β1 = 0.5, β2 = -0.2)
//! let mut predictors = [Coefficient::new(0.0, 0.0); gwnbr::model::PREDICTOR_COUNT];
//! predictors[0] = Coefficient::new(0.5, 2.5);
//! predictors[1] = Coefficient::new(-0.2, 1.0);
//! let coef = CoefficientRecord::new("Kota Bandung", 2.0, Coefficient::new(1.0, 3.0), predictors);
//!
//! // Observed covariates and case count
//! let x = CovariateRecord::new("Kota Bandung", 140, [10.0, 5.0, 0.0, 0.0, 0.0, 0.0]);
//!
//! // μ = exp(1.0 + 0.5·10 − 0.2·5) = exp(5.0) ≈ 148.41
//! let result = PredictionResult::evaluate(&coef, &x, ConfidenceLevel::NinetyFive);
//! assert!((result.predicted - 5.0f64.exp()).abs() < 1e-9);
//!
//! // Which factors matter here, and what should be done about them?
//! let interpretation = interpret(&coef).unwrap();
//! assert_eq!(interpretation.dominant.unwrap().predictor, Predictor::GiziKurang);
//! ```
//!
//! # Modules
//!
//! - [`model`]: Record types for fitted coefficients and observed covariates
//! - [`significance`]: Wald-statistic classification at the fixed 95% level
//! - [`predict`]: Log-link prediction, standard errors, confidence intervals
//! - [`equation`]: Display rendering of the fitted equation
//! - [`interpret`]: Factor narratives, dominant-factor selection, recommendations
//! - [`metrics`]: MAE/RMSE/MAPE/R² and approximate information criteria
//! - [`dataset`]: CSV loading and region-name join of the two source tables
//!
//! # Design notes
//!
//! Every function here is a pure, idempotent function of its inputs; there
//! is no internal state, caching, or I/O outside [`dataset`]. Invalid data
//! fails fast ([`error::GwnbrError`]) instead of being coerced — a missing
//! coefficient defaulted to zero would masquerade as a genuine "no effect"
//! estimate.

pub mod dataset;
pub mod equation;
pub mod error;
pub mod interpret;
pub mod metrics;
pub mod model;
pub mod predict;
pub mod prelude;
pub mod significance;
