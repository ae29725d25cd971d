//! Record types for fitted GWNBR coefficients and observed covariates.
//!
//! A Geographically Weighted Negative Binomial Regression fits one
//! coefficient vector *per location*. This module holds the two source
//! records the evaluator consumes: the fitted coefficients (with their Wald
//! z-statistics and dispersion parameter θ) and the observed covariates
//! (with the actual case count). Both are plain data — estimation happened
//! offline, and only its outputs flow through here.

use serde::{Deserialize, Serialize};

use crate::error::{GwnbrError, Result};

/// Number of predictors in the fitted model.
pub const PREDICTOR_COUNT: usize = 6;

/// The six pneumonia risk-factor predictors, in fixed display order X1..X6.
///
/// The order is part of the model's public contract: equation rendering and
/// interpretation always enumerate predictors in this order, never by
/// magnitude or significance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Predictor {
    /// X1 — under-five malnutrition case count
    GiziKurang,
    /// X2 — early initiation of breastfeeding coverage (%)
    Imd,
    /// X3 — cigarette consumption per capita
    RokokPerkapita,
    /// X4 — population density (people/km²)
    Kepadatan,
    /// X5 — access to safe drinking water (%)
    AirMinum,
    /// X6 — access to adequate sanitation (%)
    Sanitasi,
}

impl Predictor {
    /// All predictors in fixed display order.
    pub const ALL: [Predictor; PREDICTOR_COUNT] = [
        Predictor::GiziKurang,
        Predictor::Imd,
        Predictor::RokokPerkapita,
        Predictor::Kepadatan,
        Predictor::AirMinum,
        Predictor::Sanitasi,
    ];

    /// Position in the fixed display order (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Predictor::GiziKurang => 0,
            Predictor::Imd => 1,
            Predictor::RokokPerkapita => 2,
            Predictor::Kepadatan => 3,
            Predictor::AirMinum => 4,
            Predictor::Sanitasi => 5,
        }
    }

    /// Equation symbol, `"X1"` through `"X6"`.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Predictor::GiziKurang => "X1",
            Predictor::Imd => "X2",
            Predictor::RokokPerkapita => "X3",
            Predictor::Kepadatan => "X4",
            Predictor::AirMinum => "X5",
            Predictor::Sanitasi => "X6",
        }
    }

    /// Human-readable variable name as used in the source study.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Predictor::GiziKurang => "under-five malnutrition",
            Predictor::Imd => "early initiation of breastfeeding",
            Predictor::RokokPerkapita => "cigarette consumption per capita",
            Predictor::Kepadatan => "population density",
            Predictor::AirMinum => "safe drinking water access",
            Predictor::Sanitasi => "adequate sanitation access",
        }
    }

    /// Column key used in the source CSV tables.
    #[must_use]
    pub const fn csv_key(self) -> &'static str {
        match self {
            Predictor::GiziKurang => "gizi_kurang",
            Predictor::Imd => "imd",
            Predictor::RokokPerkapita => "rokok_perkapita",
            Predictor::Kepadatan => "kepadatan",
            Predictor::AirMinum => "air_minum",
            Predictor::Sanitasi => "sanitasi",
        }
    }
}

/// A single fitted coefficient with its Wald statistic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coefficient {
    /// Estimate on the log-mean scale
    pub value: f64,
    /// Wald z-statistic for the estimate at this location
    pub z: f64,
}

impl Coefficient {
    /// Creates a coefficient from an estimate and its z-statistic.
    #[must_use]
    pub const fn new(value: f64, z: f64) -> Self {
        Self { value, z }
    }

    /// Whether this coefficient is statistically significant at the 95%
    /// level (see [`crate::significance::is_significant`]).
    #[must_use]
    pub fn is_significant(&self) -> bool {
        crate::significance::is_significant(self.z)
    }
}

/// Fitted GWNBR coefficient vector for one region.
///
/// Invariants (enforced by [`CoefficientRecord::validate`]): θ > 0, and
/// every estimate and z-statistic is finite. Loaders must call `validate`
/// before handing records to the evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoefficientRecord {
    /// Region identifier (regency/city name), join key to covariates
    pub region: String,
    /// Negative-binomial dispersion parameter θ (always positive)
    pub theta: f64,
    /// Intercept β0 with its z-statistic
    pub intercept: Coefficient,
    /// Predictor coefficients β1..β6 in fixed display order
    pub predictors: [Coefficient; PREDICTOR_COUNT],
}

impl CoefficientRecord {
    /// Creates a coefficient record.
    #[must_use]
    pub fn new(
        region: impl Into<String>,
        theta: f64,
        intercept: Coefficient,
        predictors: [Coefficient; PREDICTOR_COUNT],
    ) -> Self {
        Self {
            region: region.into(),
            theta,
            intercept,
            predictors,
        }
    }

    /// The fitted coefficient for one predictor.
    #[must_use]
    pub fn coefficient(&self, predictor: Predictor) -> Coefficient {
        self.predictors[predictor.index()]
    }

    /// Checks the record invariants: θ > 0 and all values finite.
    ///
    /// # Errors
    ///
    /// Returns [`GwnbrError::InvalidTheta`] when θ ≤ 0 (θ divides the
    /// variance formula), or [`GwnbrError::MissingData`] when any estimate
    /// or z-statistic is NaN or infinite.
    pub fn validate(&self) -> Result<()> {
        if !(self.theta > 0.0) {
            return Err(GwnbrError::InvalidTheta {
                region: self.region.clone(),
                value: self.theta,
            });
        }
        self.check_finite(self.intercept, "intercept")?;
        for predictor in Predictor::ALL {
            self.check_finite(self.coefficient(predictor), predictor.csv_key())?;
        }
        Ok(())
    }

    fn check_finite(&self, coef: Coefficient, name: &str) -> Result<()> {
        if !coef.value.is_finite() {
            return Err(GwnbrError::MissingData {
                region: self.region.clone(),
                field: format!("{name} coefficient"),
            });
        }
        if !coef.z.is_finite() {
            return Err(GwnbrError::MissingData {
                region: self.region.clone(),
                field: format!("{name} z-value"),
            });
        }
        Ok(())
    }
}

/// Observed covariates and case count for one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CovariateRecord {
    /// Region identifier, join key to coefficients
    pub region: String,
    /// Actual pneumonia case count
    pub observed_cases: u64,
    /// Observed predictor values X1..X6 in fixed display order
    pub values: [f64; PREDICTOR_COUNT],
}

impl CovariateRecord {
    /// Creates a covariate record.
    #[must_use]
    pub fn new(
        region: impl Into<String>,
        observed_cases: u64,
        values: [f64; PREDICTOR_COUNT],
    ) -> Self {
        Self {
            region: region.into(),
            observed_cases,
            values,
        }
    }

    /// The observed value for one predictor.
    #[must_use]
    pub fn value(&self, predictor: Predictor) -> f64 {
        self.values[predictor.index()]
    }
}
