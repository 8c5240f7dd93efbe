//! NaN handling for derived ratios.
//!
//! NaN is the "not a number" marker for metrics whose denominator is zero or
//! whose inputs are missing. Infinities never reach the output record, and NaN
//! serializes as an empty CSV cell.

use serde::Serializer;

/// Replace ±infinity with NaN. Finite values and NaN pass through.
#[inline]
pub fn finite_or_nan(value: f64) -> f64 {
    if value.is_infinite() {
        f64::NAN
    } else {
        value
    }
}

/// Serialize NaN as an empty field, anything else as the number itself.
pub fn nan_as_empty<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.is_nan() {
        serializer.serialize_none()
    } else {
        serializer.serialize_f64(*value)
    }
}

/// [`nan_as_empty`] for optional analytics fields.
pub fn opt_nan_as_empty<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(v) => nan_as_empty(v, serializer),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finite_or_nan() {
        assert!(finite_or_nan(f64::INFINITY).is_nan());
        assert!(finite_or_nan(f64::NEG_INFINITY).is_nan());
        assert!(finite_or_nan(f64::NAN).is_nan());
        assert_eq!(finite_or_nan(18.25), 18.25);
        assert_eq!(finite_or_nan(0.0), 0.0);
    }
}
