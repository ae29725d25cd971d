//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use gwnbr::prelude::*;
//! ```

pub use crate::dataset::{join, load_coefficients, load_covariates, JoinOutcome, RegionData};
pub use crate::equation::{format_equation, EquationDisplay, EquationTerm};
pub use crate::error::{GwnbrError, Result};
pub use crate::interpret::{interpret, Effect, FactorInterpretation, Interpretation};
pub use crate::metrics::{compute_metrics, RegressionMetrics};
pub use crate::model::{Coefficient, CoefficientRecord, CovariateRecord, Predictor};
pub use crate::predict::{
    confidence_interval, linear_predictor, predict, standard_error, Interval, PredictionResult,
};
pub use crate::significance::{is_significant, ConfidenceLevel};
