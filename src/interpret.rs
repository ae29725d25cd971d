//! Natural-language interpretation of a fitted coefficient vector.
//!
//! Converts the per-region coefficients into factor descriptions, a
//! dominant-factor selection, and policy recommendations for the
//! dashboard's narrative views.
//!
//! Effect sizes are phrased on the response scale: for a log-link
//! coefficient β the associated change in predicted cases is
//! `(exp(β) − 1) · 100` percent, not β itself — quoting the raw
//! coefficient would overstate or understate the effect on the count
//! scale.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{CoefficientRecord, Predictor};

/// Direction of a factor's association with predicted cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    /// Coefficient > 0: higher values of the factor raise predicted cases
    Increase,
    /// Coefficient ≤ 0: higher values of the factor lower predicted cases
    Decrease,
}

impl Effect {
    /// Direction implied by a log-scale coefficient.
    #[must_use]
    pub fn from_coefficient(value: f64) -> Self {
        if value > 0.0 {
            Effect::Increase
        } else {
            Effect::Decrease
        }
    }
}

/// Interpretation of one predictor's coefficient at one region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorInterpretation {
    /// Which predictor
    pub predictor: Predictor,
    /// Fitted coefficient (log-mean scale)
    pub coefficient: f64,
    /// Wald z-statistic
    pub z: f64,
    /// Significant at the 95% level
    pub significant: bool,
    /// Direction of the association
    pub effect: Effect,
    /// Response-scale effect size: `(exp(β) − 1) · 100` percent
    pub percent_change: f64,
}

impl FactorInterpretation {
    /// One-sentence narrative for this factor.
    #[must_use]
    pub fn narrative(&self) -> String {
        let direction = match self.effect {
            Effect::Increase => "higher",
            Effect::Decrease => "lower",
        };
        format!(
            "Holding other factors constant, a region with higher {} is associated \
             with approximately {:.2}% {direction} predicted pneumonia cases",
            self.predictor.label(),
            self.percent_change.abs()
        )
    }
}

/// Full interpretation of one region's fitted coefficients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interpretation {
    /// Region identifier
    pub region: String,
    /// All six factors in fixed display order X1..X6
    pub factors: Vec<FactorInterpretation>,
    /// Significant factor with the largest |β|, if any factor is significant
    pub dominant: Option<FactorInterpretation>,
    /// Narrative summary of the significant factors
    pub summary: String,
    /// Ordered, deduplicated policy recommendations
    pub recommendations: Vec<String>,
}

impl Interpretation {
    /// Factors significant at the 95% level, in display order.
    pub fn significant_factors(&self) -> impl Iterator<Item = &FactorInterpretation> {
        self.factors.iter().filter(|f| f.significant)
    }

    /// Factors not significant at the 95% level, in display order.
    pub fn non_significant_factors(&self) -> impl Iterator<Item = &FactorInterpretation> {
        self.factors.iter().filter(|f| !f.significant)
    }
}

/// General recommendations appended for every region, whatever the
/// significant factors are.
const GENERAL_RECOMMENDATIONS: [&str; 2] = [
    "Strengthen pneumonia surveillance and early case detection at primary health centers",
    "Improve the quality of healthcare services for childhood respiratory illness",
];

/// Fixed recommendation table keyed on (predictor, direction).
///
/// Only epidemiologically expected directions carry actions: a risk factor
/// that turns out protective (or vice versa) in some region gets no
/// factor-specific recommendation there, just the general ones.
fn recommendations_for(predictor: Predictor, effect: Effect) -> &'static [&'static str] {
    match (predictor, effect) {
        (Predictor::GiziKurang, Effect::Increase) => &[
            "Expand supplementary feeding programs for under-five children",
            "Intensify growth monitoring at integrated health posts to detect malnutrition early",
        ],
        (Predictor::Imd, Effect::Decrease) => &[
            "Promote early initiation of breastfeeding in maternity services",
            "Train village midwives on immediate skin-to-skin contact after delivery",
        ],
        (Predictor::RokokPerkapita, Effect::Increase) => &[
            "Run smoke-free household campaigns to reduce children's exposure to cigarette smoke",
            "Tighten local tobacco control regulations",
        ],
        (Predictor::Kepadatan, Effect::Increase) => &[
            "Improve housing ventilation standards in densely populated settlements",
            "Prioritize active case finding in crowded urban neighborhoods",
        ],
        (Predictor::AirMinum, Effect::Decrease) => &[
            "Extend piped safe drinking water coverage to underserved households",
            "Support household water treatment and safe storage programs",
        ],
        (Predictor::Sanitasi, Effect::Decrease) => &[
            "Accelerate community-led total sanitation programs",
            "Invest in adequate household sanitation infrastructure",
        ],
        _ => &[],
    }
}

/// Interprets a fitted coefficient record.
///
/// # Errors
///
/// Fails with [`crate::error::GwnbrError::MissingData`] (or
/// [`crate::error::GwnbrError::InvalidTheta`]) when the record is
/// incomplete; every downstream display assumes a full coefficient vector,
/// so nothing is defaulted.
pub fn interpret(coef: &CoefficientRecord) -> Result<Interpretation> {
    coef.validate()?;

    let factors: Vec<FactorInterpretation> = Predictor::ALL
        .iter()
        .map(|&predictor| {
            let c = coef.coefficient(predictor);
            FactorInterpretation {
                predictor,
                coefficient: c.value,
                z: c.z,
                significant: c.is_significant(),
                effect: Effect::from_coefficient(c.value),
                percent_change: (c.value.exp() - 1.0) * 100.0,
            }
        })
        .collect();

    // argmax |β| over significant factors; first occurrence wins ties
    let dominant = factors
        .iter()
        .filter(|f| f.significant)
        .fold(None::<FactorInterpretation>, |best, f| match best {
            Some(b) if f.coefficient.abs() <= b.coefficient.abs() => Some(b),
            _ => Some(*f),
        });

    let summary = build_summary(&coef.region, &factors, dominant.as_ref());
    let recommendations = build_recommendations(&factors);

    Ok(Interpretation {
        region: coef.region.clone(),
        factors,
        dominant,
        summary,
        recommendations,
    })
}

fn build_summary(
    region: &str,
    factors: &[FactorInterpretation],
    dominant: Option<&FactorInterpretation>,
) -> String {
    let significant: Vec<&FactorInterpretation> = factors.iter().filter(|f| f.significant).collect();

    let Some(dominant) = dominant else {
        return format!(
            "No coefficient is statistically significant at the 95% level for {region}; \
             none of the six modeled factors clearly drives local pneumonia counts."
        );
    };

    let mut summary = format!(
        "{} of 6 factors are statistically significant for {region}. \
         The dominant factor is {} ({}).",
        significant.len(),
        dominant.predictor.label(),
        dominant.narrative()
    );

    let risk: Vec<&str> = significant
        .iter()
        .filter(|f| f.effect == Effect::Increase)
        .map(|f| f.predictor.label())
        .collect();
    let protective: Vec<&str> = significant
        .iter()
        .filter(|f| f.effect == Effect::Decrease)
        .map(|f| f.predictor.label())
        .collect();

    if !risk.is_empty() {
        summary.push_str(&format!(" Risk-increasing factors: {}.", risk.join(", ")));
    }
    if !protective.is_empty() {
        summary.push_str(&format!(" Protective factors: {}.", protective.join(", ")));
    }
    summary
}

fn build_recommendations(factors: &[FactorInterpretation]) -> Vec<String> {
    fn push_unique(list: &mut Vec<String>, text: &str) {
        if !list.iter().any(|existing| existing == text) {
            list.push(text.to_string());
        }
    }

    let mut recommendations: Vec<String> = Vec::new();
    for factor in factors.iter().filter(|f| f.significant) {
        for text in recommendations_for(factor.predictor, factor.effect) {
            push_unique(&mut recommendations, text);
        }
    }
    for text in GENERAL_RECOMMENDATIONS {
        push_unique(&mut recommendations, text);
    }
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GwnbrError;
    use crate::model::{Coefficient, PREDICTOR_COUNT};

    fn record(predictors: [Coefficient; PREDICTOR_COUNT]) -> CoefficientRecord {
        CoefficientRecord::new("Kota Surabaya", 2.0, Coefficient::new(1.0, 3.0), predictors)
    }

    fn scenario() -> CoefficientRecord {
        let mut predictors = [Coefficient::new(0.0, 0.0); PREDICTOR_COUNT];
        predictors[Predictor::GiziKurang.index()] = Coefficient::new(0.5, 2.5);
        predictors[Predictor::Imd.index()] = Coefficient::new(-0.2, 1.0);
        record(predictors)
    }

    /// Test: dominant factor and percent change for the single significant factor
    #[test]
    fn test_dominant_and_percent_change() {
        let interp = interpret(&scenario()).expect("complete record");
        let dominant = interp.dominant.expect("giziKurang is significant");
        assert_eq!(dominant.predictor, Predictor::GiziKurang);
        assert!((dominant.percent_change - 64.872_127_070_012_81).abs() < 1e-9);
        assert_eq!(dominant.effect, Effect::Increase);
        assert_eq!(interp.significant_factors().count(), 1);
        assert_eq!(interp.non_significant_factors().count(), 5);
    }

    /// Test: all six factors present in fixed display order
    #[test]
    fn test_factor_order() {
        let interp = interpret(&scenario()).expect("complete record");
        let order: Vec<Predictor> = interp.factors.iter().map(|f| f.predictor).collect();
        assert_eq!(order, Predictor::ALL.to_vec());
    }

    /// Test: ties on |β| resolve to the first factor in display order
    #[test]
    fn test_dominant_tie_break() {
        let mut predictors = [Coefficient::new(0.0, 0.0); PREDICTOR_COUNT];
        predictors[Predictor::Imd.index()] = Coefficient::new(-0.4, 3.0);
        predictors[Predictor::Sanitasi.index()] = Coefficient::new(0.4, 3.0);
        let interp = interpret(&record(predictors)).expect("complete record");
        assert_eq!(
            interp.dominant.expect("two significant factors").predictor,
            Predictor::Imd
        );
    }

    /// Test: no significant factor yields no dominant and a fallback summary
    #[test]
    fn test_no_significant_driver() {
        let predictors = [Coefficient::new(0.1, 1.0); PREDICTOR_COUNT];
        let interp = interpret(&record(predictors)).expect("complete record");
        assert!(interp.dominant.is_none());
        assert!(interp.summary.contains("No coefficient is statistically significant"));
        // general recommendations still present
        assert_eq!(interp.recommendations.len(), 2);
    }

    /// Test: recommendations are deterministic, deduplicated, and always
    /// end with the two general recommendations
    #[test]
    fn test_recommendations() {
        let first = interpret(&scenario()).expect("complete record");
        let second = interpret(&scenario()).expect("complete record");
        assert_eq!(first.recommendations, second.recommendations);

        let mut seen = std::collections::HashSet::new();
        for rec in &first.recommendations {
            assert!(seen.insert(rec.clone()), "duplicate recommendation: {rec}");
        }
        for general in GENERAL_RECOMMENDATIONS {
            assert!(first.recommendations.iter().any(|r| r == general));
        }
    }

    /// Test: factor-specific recommendations fire on (predictor, direction)
    #[test]
    fn test_recommendation_table() {
        let mut predictors = [Coefficient::new(0.0, 0.0); PREDICTOR_COUNT];
        predictors[Predictor::AirMinum.index()] = Coefficient::new(-0.3, 2.2);
        let interp = interpret(&record(predictors)).expect("complete record");
        assert!(interp
            .recommendations
            .iter()
            .any(|r| r.contains("drinking water")));

        // protective water access reversed to a risk direction: only general recs
        let mut predictors = [Coefficient::new(0.0, 0.0); PREDICTOR_COUNT];
        predictors[Predictor::AirMinum.index()] = Coefficient::new(0.3, 2.2);
        let interp = interpret(&record(predictors)).expect("complete record");
        assert_eq!(interp.recommendations.len(), 2);
    }

    /// Test: narratives quote the response-scale effect, not the raw β
    #[test]
    fn test_narrative_uses_exp_scale() {
        let interp = interpret(&scenario()).expect("complete record");
        let dominant = interp.dominant.expect("significant factor");
        let sentence = dominant.narrative();
        assert!(sentence.contains("64.87"));
        assert!(sentence.contains("higher predicted pneumonia cases"));
    }

    /// Test: incomplete record fails instead of defaulting
    #[test]
    fn test_missing_data_rejected() {
        let mut rec = scenario();
        rec.predictors[0] = Coefficient::new(f64::NAN, 2.0);
        let err = interpret(&rec).expect_err("NaN must be rejected");
        assert!(matches!(err, GwnbrError::MissingData { .. }));
    }
}
