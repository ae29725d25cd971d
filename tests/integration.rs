//! End-to-end tests: load the two source tables, join, evaluate, and
//! interpret, the way the dashboard drives the library.

use gwnbr::model::PREDICTOR_COUNT;
use gwnbr::prelude::*;

const COEFFICIENT_CSV: &str = "\
region,theta,intercept,z_intercept,b_gizi_kurang,z_gizi_kurang,b_imd,z_imd,b_rokok_perkapita,z_rokok_perkapita,b_kepadatan,z_kepadatan,b_air_minum,z_air_minum,b_sanitasi,z_sanitasi
Kota Bandung,2.0,1.0,3.0,0.5,2.5,-0.2,1.0,0.0,0.0,0.0,0.0,0.0,0.0,0.0,0.0
Kota Semarang,1.8,0.9,2.4,0.02,1.1,-0.15,2.3,0.08,2.8,0.0001,0.4,-0.03,2.1,-0.01,0.9
";

const COVARIATE_CSV: &str = "\
region,cases,gizi_kurang,imd,rokok_perkapita,kepadatan,air_minum,sanitasi
Kota Bandung,140,10.0,5.0,0.0,0.0,0.0,0.0
Kota Semarang,95,8.0,6.5,1.2,300.0,80.0,75.0
";

fn load() -> Vec<RegionData> {
    let coefficients = load_coefficients(COEFFICIENT_CSV.as_bytes()).expect("valid coefficients");
    let covariates = load_covariates(COVARIATE_CSV.as_bytes()).expect("valid covariates");
    let outcome = join(coefficients, covariates);
    assert!(outcome.unmatched_coefficients.is_empty());
    assert!(outcome.unmatched_covariates.is_empty());
    outcome.matched
}

#[test]
fn full_pipeline_concrete_scenario() {
    let regions = load();
    let bandung = &regions[0];

    // μ = exp(1.0 + 0.5·10 − 0.2·5) = exp(5.0) ≈ 148.41
    let result = PredictionResult::evaluate(
        &bandung.coefficients,
        &bandung.covariates,
        ConfidenceLevel::NinetyFive,
    );
    assert!((result.predicted - 148.413_159_102_576_6).abs() < 1e-9);
    assert_eq!(result.observed, 140);
    assert!(result.interval.lower <= result.predicted);
    assert!(result.predicted <= result.interval.upper);
    assert!(result.interval.lower >= 0.0);

    // giziKurang (z = 2.5) significant, imd (z = 1.0) not
    assert!(bandung.coefficients.coefficient(Predictor::GiziKurang).is_significant());
    assert!(!bandung.coefficients.coefficient(Predictor::Imd).is_significant());

    let interpretation = interpret(&bandung.coefficients).expect("complete record");
    let dominant = interpretation.dominant.expect("one significant factor");
    assert_eq!(dominant.predictor, Predictor::GiziKurang);
    assert!((dominant.percent_change - 64.872_127_070_012_81).abs() < 1e-9);
}

#[test]
fn equation_matches_classification() {
    let regions = load();
    for region in &regions {
        let equation = EquationDisplay::from_record(&region.coefficients).expect("finite record");
        for term in &equation.terms {
            let classified = region
                .coefficients
                .coefficient(term.predictor)
                .is_significant();
            assert_eq!(
                term.significant, classified,
                "equation marker disagrees with classifier for {} in {}",
                term.predictor.symbol(),
                region.coefficients.region
            );
        }
    }
}

#[test]
fn global_metrics_over_all_regions() {
    let regions = load();
    let observed: Vec<f64> = regions
        .iter()
        .map(|r| r.covariates.observed_cases as f64)
        .collect();
    let predicted: Vec<f64> = regions
        .iter()
        .map(|r| predict(&r.coefficients, &r.covariates))
        .collect();

    let metrics = compute_metrics(&observed, &predicted).expect("equal lengths");
    assert!(metrics.rmse >= metrics.mae.abs() - 1e-12);
    assert!(metrics.mape.is_finite());
    assert!(metrics.r2 <= 1.0);
}

#[test]
fn interpretation_serializes_for_the_view_layer() {
    let regions = load();
    let interpretation = interpret(&regions[1].coefficients).expect("complete record");

    let json = serde_json::to_string(&interpretation).expect("serialize");
    let back: Interpretation = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(interpretation, back);
}

#[test]
fn semarang_interpretation_directions() {
    let regions = load();
    let semarang = &regions[1];
    let interpretation = interpret(&semarang.coefficients).expect("complete record");

    // significant: imd (z=2.3, protective), rokok (z=2.8, risk), air minum (z=2.1, protective)
    let significant: Vec<Predictor> = interpretation
        .significant_factors()
        .map(|f| f.predictor)
        .collect();
    assert_eq!(
        significant,
        vec![Predictor::Imd, Predictor::RokokPerkapita, Predictor::AirMinum]
    );

    // dominant = argmax |β| over significant = imd (|−0.15|)
    assert_eq!(
        interpretation.dominant.expect("significant set non-empty").predictor,
        Predictor::Imd
    );

    assert!(interpretation.summary.contains("3 of 6"));
    assert!(interpretation.summary.contains("Protective factors"));

    // factor table fires for all three, plus the two general entries
    assert!(interpretation.recommendations.len() >= 2);
    assert!(interpretation
        .recommendations
        .iter()
        .any(|r| r.contains("breastfeeding")));
    assert!(interpretation
        .recommendations
        .iter()
        .any(|r| r.contains("tobacco") || r.contains("smoke")));
    assert!(interpretation
        .recommendations
        .iter()
        .any(|r| r.contains("drinking water")));
}

#[test]
fn evaluation_is_bit_identical_across_calls() {
    let regions = load();
    for region in &regions {
        let a = predict(&region.coefficients, &region.covariates);
        let b = predict(&region.coefficients, &region.covariates);
        assert_eq!(a.to_bits(), b.to_bits());

        let eq_a = format_equation(&region.coefficients).expect("finite record");
        let eq_b = format_equation(&region.coefficients).expect("finite record");
        assert_eq!(eq_a, eq_b);
    }
}

#[test]
fn explicit_sample_size_narrows_the_interval() {
    let regions = load();
    let region = &regions[0];
    let wide = PredictionResult::with_sample_size(
        &region.coefficients,
        &region.covariates,
        ConfidenceLevel::NinetyFive,
        10,
    );
    let narrow = PredictionResult::with_sample_size(
        &region.coefficients,
        &region.covariates,
        ConfidenceLevel::NinetyFive,
        1000,
    );
    assert!(narrow.standard_error < wide.standard_error);
    assert!(narrow.interval.upper - narrow.interval.lower < wide.interval.upper - wide.interval.lower);
}

#[test]
fn records_survive_a_full_serde_round_trip() {
    let regions = load();
    let json = serde_json::to_string(&regions).expect("serialize");
    let back: Vec<RegionData> = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(regions, back);
}

#[test]
fn sample_covariate_vector_of_correct_width() {
    let regions = load();
    assert_eq!(regions[0].covariates.values.len(), PREDICTOR_COUNT);
}
