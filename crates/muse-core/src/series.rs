//! Multivariate samples and class labels.

use std::fmt;

use crate::error::{MuseError, Result};

/// Discrete class label of a sample.
///
/// Labels are categorical tokens compared by exact integer equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassLabel(pub i64);

impl ClassLabel {
    /// Convert a numeric label, accepting only finite integral values.
    pub fn from_f64(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(MuseError::InvalidLabel(format!("{} is not finite", value)));
        }
        if value.fract() != 0.0 {
            return Err(MuseError::InvalidLabel(format!(
                "{} is not an integral class id",
                value
            )));
        }
        if value < i64::MIN as f64 || value >= i64::MAX as f64 {
            return Err(MuseError::InvalidLabel(format!("{} is out of range", value)));
        }
        Ok(ClassLabel(value as i64))
    }
}

impl From<i64> for ClassLabel {
    fn from(value: i64) -> Self {
        ClassLabel(value)
    }
}

impl fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A labelled sample made of one numeric series per variate.
#[derive(Debug, Clone, PartialEq)]
pub struct MultivariateSeries {
    /// One series per dimension, all sampled on the same time axis
    pub variates: Vec<Vec<f64>>,
    /// Class of the sample
    pub label: ClassLabel,
}

impl MultivariateSeries {
    pub fn new(variates: Vec<Vec<f64>>, label: impl Into<ClassLabel>) -> Self {
        Self {
            variates,
            label: label.into(),
        }
    }

    /// Number of variates (dimensions).
    pub fn dimensions(&self) -> usize {
        self.variates.len()
    }
}

/// Verify that all samples share one dimensionality and return it.
pub fn check_dimensionality(samples: &[MultivariateSeries]) -> Result<usize> {
    let first = samples
        .first()
        .ok_or_else(|| MuseError::InvalidInput("no samples given".to_string()))?;
    let expected = first.dimensions();
    if expected == 0 {
        return Err(MuseError::InvalidInput(
            "samples must have at least one variate".to_string(),
        ));
    }

    for (sample, mts) in samples.iter().enumerate() {
        if mts.dimensions() != expected {
            return Err(MuseError::DimensionMismatch {
                sample,
                expected,
                got: mts.dimensions(),
            });
        }
    }
    Ok(expected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_from_integral_float() {
        assert_eq!(ClassLabel::from_f64(3.0).unwrap(), ClassLabel(3));
        assert_eq!(ClassLabel::from_f64(-1.0).unwrap(), ClassLabel(-1));
    }

    #[test]
    fn test_label_rejects_fractional_and_nan() {
        assert!(ClassLabel::from_f64(1.5).is_err());
        assert!(ClassLabel::from_f64(f64::NAN).is_err());
        assert!(ClassLabel::from_f64(f64::INFINITY).is_err());
        // 0.1 + 0.2 is not exactly 0.3; no epsilon matching
        assert!(ClassLabel::from_f64((0.1 + 0.2) * 10.0).is_err());
    }

    #[test]
    fn test_check_dimensionality() {
        let samples = vec![
            MultivariateSeries::new(vec![vec![1.0], vec![2.0]], 0),
            MultivariateSeries::new(vec![vec![3.0], vec![4.0]], 1),
        ];
        assert_eq!(check_dimensionality(&samples).unwrap(), 2);
    }

    #[test]
    fn test_check_dimensionality_mismatch() {
        let samples = vec![
            MultivariateSeries::new(vec![vec![1.0], vec![2.0]], 0),
            MultivariateSeries::new(vec![vec![3.0]], 1),
        ];
        match check_dimensionality(&samples) {
            Err(MuseError::DimensionMismatch {
                sample,
                expected,
                got,
            }) => {
                assert_eq!(sample, 1);
                assert_eq!(expected, 2);
                assert_eq!(got, 1);
            }
            other => panic!("Expected DimensionMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_check_dimensionality_empty() {
        assert!(check_dimensionality(&[]).is_err());
    }
}
