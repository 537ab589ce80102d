use thiserror::Error;

/// All errors emitted while sampling curves or building layouts.
///
/// Every variant is an invalid-argument condition: inputs are rejected, never
/// clamped. Only an overflowing arc length is caught after the quadrature.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MandalaError {
    #[error("sample count must be at least 2, got {0}")]
    TooFewSamples(usize),

    #[error("sample count must be at most {max}, got {count}")]
    TooManySamples { count: usize, max: usize },

    #[error("curve period must be positive and finite, got {0}")]
    InvalidPeriod(f64),

    #[error("curve period {0} is too long to walk in steps of the arc-length walk")]
    PeriodTooLong(f64),

    #[error("curve amplitude must be finite, got {0}")]
    InvalidAmplitude(f64),

    #[error("a mandala needs at least one bar array, got {0}")]
    NoArrays(usize),

    #[error("parameter `{name}` must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },

    #[error("could not read parameters: {0}")]
    InvalidParameters(String),
}

pub type Result<T> = std::result::Result<T, MandalaError>;

/// Rejects NaN and infinities for a named parameter.
pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(MandalaError::NonFinite { name, value })
    }
}
