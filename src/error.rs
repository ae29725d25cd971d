//! Error types for GWNBR evaluation.
//!
//! All library functions fail fast rather than coerce invalid inputs: a
//! missing coefficient must never be silently defaulted to zero, since a
//! silent zero would masquerade as a legitimate "no effect" estimate.

use std::fmt;

/// Main error type for GWNBR operations.
///
/// # Examples
///
/// ```
/// use gwnbr::error::GwnbrError;
///
/// let err = GwnbrError::MissingData {
///     region: "Kota Semarang".to_string(),
///     field: "gizi_kurang coefficient".to_string(),
/// };
/// assert!(err.to_string().contains("missing"));
/// ```
#[derive(Debug)]
pub enum GwnbrError {
    /// A required coefficient or covariate field is absent for a region.
    ///
    /// In the source tables an unparseable or empty cell surfaces as NaN;
    /// the record validators translate that into this error instead of
    /// letting a NaN pose as a fitted value.
    MissingData {
        /// Region the record belongs to
        region: String,
        /// Field that was absent or non-finite
        field: String,
    },

    /// Paired input slices have different lengths.
    LengthMismatch {
        /// Length of the observed series
        expected: usize,
        /// Length of the predicted series
        actual: usize,
    },

    /// A non-finite value reached a function that cannot render it.
    NonFinite {
        /// What was being computed or formatted
        context: String,
        /// The offending value
        value: f64,
    },

    /// Dispersion parameter θ is zero or negative (it is used as a divisor).
    InvalidTheta {
        /// Region the record belongs to
        region: String,
        /// The offending value
        value: f64,
    },

    /// A CSV row could not be parsed.
    CsvParse {
        /// 1-based line number in the source file
        line: usize,
        /// Parse failure description
        message: String,
    },

    /// I/O error while reading a source table.
    Io(std::io::Error),
}

impl fmt::Display for GwnbrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GwnbrError::MissingData { region, field } => {
                write!(f, "missing data for region '{region}': field '{field}'")
            }
            GwnbrError::LengthMismatch { expected, actual } => {
                write!(
                    f,
                    "length mismatch: observed has {expected} entries, predicted has {actual}"
                )
            }
            GwnbrError::NonFinite { context, value } => {
                write!(f, "non-finite value in {context}: {value}")
            }
            GwnbrError::InvalidTheta { region, value } => {
                write!(
                    f,
                    "invalid dispersion for region '{region}': theta = {value}, expected theta > 0"
                )
            }
            GwnbrError::CsvParse { line, message } => {
                write!(f, "CSV parse error at line {line}: {message}")
            }
            GwnbrError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for GwnbrError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GwnbrError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GwnbrError {
    fn from(err: std::io::Error) -> Self {
        GwnbrError::Io(err)
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, GwnbrError>;

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: Display messages carry enough context to locate the bad cell
    #[test]
    fn test_display_messages() {
        let err = GwnbrError::MissingData {
            region: "Kab. Bogor".to_string(),
            field: "theta".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Kab. Bogor"));
        assert!(msg.contains("theta"));

        let err = GwnbrError::LengthMismatch {
            expected: 119,
            actual: 118,
        };
        assert!(err.to_string().contains("119"));

        let err = GwnbrError::CsvParse {
            line: 42,
            message: "expected a number".to_string(),
        };
        assert!(err.to_string().contains("line 42"));
    }

    /// Test: Io errors preserve their source
    #[test]
    fn test_io_source() {
        use std::error::Error;

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: GwnbrError = io.into();
        assert!(err.source().is_some());
    }
}
