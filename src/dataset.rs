//! Loading and joining of the two flat source tables.
//!
//! The study ships two CSV artifacts: fitted per-region coefficients (with
//! z-statistics and θ) and observed covariates (with the actual case
//! count). This module parses both, validates record invariants at the
//! boundary, and joins them by region name so the evaluator only ever sees
//! complete `(coefficient, covariate)` pairs.
//!
//! # Expected columns
//!
//! Coefficient table: `region`, `theta`, `intercept`, `z_intercept`, then
//! `b_<key>`/`z_<key>` pairs for each predictor key (`gizi_kurang`, `imd`,
//! `rokok_perkapita`, `kepadatan`, `air_minum`, `sanitasi`).
//!
//! Covariate table: `region`, `cases`, and one column per predictor key.
//! Any additional columns (the study carries ~30 display-only fields) are
//! ignored.

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::error::{GwnbrError, Result};
use crate::model::{
    Coefficient, CoefficientRecord, CovariateRecord, Predictor, PREDICTOR_COUNT,
};

/// A joined pair of records for one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionData {
    /// Fitted coefficients
    pub coefficients: CoefficientRecord,
    /// Observed covariates and case count
    pub covariates: CovariateRecord,
}

/// Result of joining the two tables.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JoinOutcome {
    /// Successfully joined regions, in coefficient-table order
    pub matched: Vec<RegionData>,
    /// Coefficient regions with no covariate partner
    pub unmatched_coefficients: Vec<String>,
    /// Covariate regions with no coefficient partner
    pub unmatched_covariates: Vec<String>,
}

/// Loads the fitted coefficient table.
///
/// Every record is validated on the way in (θ > 0, all values finite), so
/// downstream evaluation never sees a half-parsed row.
///
/// # Errors
///
/// [`GwnbrError::CsvParse`] for malformed rows or missing columns,
/// [`GwnbrError::MissingData`] for empty cells, plus the record
/// validation errors.
pub fn load_coefficients<R: Read>(reader: R) -> Result<Vec<CoefficientRecord>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = read_headers(&mut csv_reader)?;

    let region_idx = column_index(&headers, "region")?;
    let theta_idx = column_index(&headers, "theta")?;
    let intercept_idx = column_index(&headers, "intercept")?;
    let intercept_z_idx = column_index(&headers, "z_intercept")?;
    let mut predictor_idx = [(0usize, 0usize); PREDICTOR_COUNT];
    for predictor in Predictor::ALL {
        let key = predictor.csv_key();
        predictor_idx[predictor.index()] = (
            column_index(&headers, &format!("b_{key}"))?,
            column_index(&headers, &format!("z_{key}"))?,
        );
    }

    let mut records = Vec::new();
    let mut line = 1; // header was line 1
    for row in csv_reader.records() {
        line += 1;
        let row = row.map_err(|e| GwnbrError::CsvParse {
            line,
            message: e.to_string(),
        })?;

        let region = field(&row, region_idx, line)?.trim().to_string();
        let theta = parse_number(&row, theta_idx, &region, "theta", line)?;
        let intercept = Coefficient::new(
            parse_number(&row, intercept_idx, &region, "intercept", line)?,
            parse_number(&row, intercept_z_idx, &region, "z_intercept", line)?,
        );
        let mut predictors = [Coefficient::new(0.0, 0.0); PREDICTOR_COUNT];
        for predictor in Predictor::ALL {
            let key = predictor.csv_key();
            let (b_idx, z_idx) = predictor_idx[predictor.index()];
            predictors[predictor.index()] = Coefficient::new(
                parse_number(&row, b_idx, &region, &format!("b_{key}"), line)?,
                parse_number(&row, z_idx, &region, &format!("z_{key}"), line)?,
            );
        }

        let record = CoefficientRecord::new(region, theta, intercept, predictors);
        record.validate()?;
        records.push(record);
    }
    Ok(records)
}

/// Loads the observed covariate table.
///
/// # Errors
///
/// Same taxonomy as [`load_coefficients`].
pub fn load_covariates<R: Read>(reader: R) -> Result<Vec<CovariateRecord>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = read_headers(&mut csv_reader)?;

    let region_idx = column_index(&headers, "region")?;
    let cases_idx = column_index(&headers, "cases")?;
    let mut value_idx = [0usize; PREDICTOR_COUNT];
    for predictor in Predictor::ALL {
        value_idx[predictor.index()] = column_index(&headers, predictor.csv_key())?;
    }

    let mut records = Vec::new();
    let mut line = 1;
    for row in csv_reader.records() {
        line += 1;
        let row = row.map_err(|e| GwnbrError::CsvParse {
            line,
            message: e.to_string(),
        })?;

        let region = field(&row, region_idx, line)?.trim().to_string();
        let cases_raw = parse_number(&row, cases_idx, &region, "cases", line)?;
        if cases_raw < 0.0 || cases_raw.fract() != 0.0 {
            return Err(GwnbrError::CsvParse {
                line,
                message: format!("'cases' must be a non-negative integer, got {cases_raw}"),
            });
        }
        let mut values = [0.0; PREDICTOR_COUNT];
        for predictor in Predictor::ALL {
            values[predictor.index()] = parse_number(
                &row,
                value_idx[predictor.index()],
                &region,
                predictor.csv_key(),
                line,
            )?;
        }
        records.push(CovariateRecord::new(region, cases_raw as u64, values));
    }
    Ok(records)
}

/// Joins coefficient and covariate records by region name.
///
/// The join runs in two phases over the whole table. First every exact
/// match on the normalized name (trimmed, inner whitespace collapsed) is
/// resolved; only then does a case-insensitive substring fallback run over
/// the leftovers, for names that differ in prefixes like "Kab." vs
/// "Kabupaten". Exact pairs are claimed before any lenient matching so a
/// loosely-named row can never consume a covariate that is another row's
/// exact partner. Each covariate record joins at most once; matched pairs
/// come back in coefficient-table order, and regions left without a
/// partner are reported, not dropped silently.
#[must_use]
pub fn join(coefficients: Vec<CoefficientRecord>, covariates: Vec<CovariateRecord>) -> JoinOutcome {
    let mut remaining: Vec<Option<CovariateRecord>> = covariates.into_iter().map(Some).collect();

    // phase 1: exact matches claim their partners
    let mut partners: Vec<Option<CovariateRecord>> = coefficients
        .iter()
        .map(|coefficient| {
            let target = normalize_region(&coefficient.region);
            remaining
                .iter()
                .position(|slot| {
                    slot.as_ref()
                        .is_some_and(|c| normalize_region(&c.region) == target)
                })
                .map(|idx| remaining[idx].take().expect("position found a Some slot"))
        })
        .collect();

    // phase 2: lenient fallback over the leftovers only
    for (coefficient, partner) in coefficients.iter().zip(partners.iter_mut()) {
        if partner.is_some() {
            continue;
        }
        let target_lower = normalize_region(&coefficient.region).to_lowercase();
        let found = remaining.iter().position(|slot| {
            slot.as_ref().is_some_and(|c| {
                let candidate = normalize_region(&c.region).to_lowercase();
                candidate.contains(&target_lower) || target_lower.contains(&candidate)
            })
        });
        if let Some(idx) = found {
            *partner = Some(remaining[idx].take().expect("position found a Some slot"));
        }
    }

    let mut outcome = JoinOutcome::default();
    for (coefficient, partner) in coefficients.into_iter().zip(partners) {
        match partner {
            Some(covariate) => outcome.matched.push(RegionData {
                coefficients: coefficient,
                covariates: covariate,
            }),
            None => outcome.unmatched_coefficients.push(coefficient.region),
        }
    }
    outcome.unmatched_covariates = remaining
        .into_iter()
        .flatten()
        .map(|c| c.region)
        .collect();
    outcome
}

/// Trims and collapses inner whitespace; both join paths share this.
#[must_use]
pub fn normalize_region(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn read_headers<R: Read>(reader: &mut csv::Reader<R>) -> Result<csv::StringRecord> {
    reader
        .headers()
        .map(Clone::clone)
        .map_err(|e| GwnbrError::CsvParse {
            line: 1,
            message: format!("failed to read headers: {e}"),
        })
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| GwnbrError::CsvParse {
            line: 1,
            message: format!(
                "missing column '{name}' (available: {:?})",
                headers.iter().collect::<Vec<_>>()
            ),
        })
}

fn field<'r>(row: &'r csv::StringRecord, idx: usize, line: usize) -> Result<&'r str> {
    row.get(idx).ok_or_else(|| GwnbrError::CsvParse {
        line,
        message: format!("row has no field at column {idx}"),
    })
}

fn parse_number(
    row: &csv::StringRecord,
    idx: usize,
    region: &str,
    column: &str,
    line: usize,
) -> Result<f64> {
    let raw = field(row, idx, line)?.trim();
    if raw.is_empty() {
        return Err(GwnbrError::MissingData {
            region: region.to_string(),
            field: column.to_string(),
        });
    }
    raw.parse::<f64>().map_err(|_| GwnbrError::CsvParse {
        line,
        message: format!("column '{column}': expected a number, got '{raw}'"),
    })
}
