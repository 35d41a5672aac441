//! Pipeline configuration.

use crate::error::{MuseError, Result};

/// Minimum number of worker threads used for word extraction.
pub const MIN_WORKERS: usize = 8;

/// Binning strategy handed to the symbolic quantizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HistogramType {
    /// Bins hold the same number of Fourier values.
    #[default]
    Equidepth,
    /// Bins span the same value range.
    Equifrequency,
}

/// Configuration for a feature extraction run.
///
/// Immutable once handed to [`crate::Muse::new`]; every extraction worker
/// reads it concurrently.
#[derive(Debug, Clone)]
pub struct MuseConfig {
    /// Length of the symbolic words (rounded up to an even number)
    pub word_length: usize,
    /// Number of symbols per word position
    pub alphabet_size: usize,
    /// Quantizer binning strategy
    pub histogram: HistogramType,
    /// Sliding window lengths used for word extraction
    pub window_lengths: Vec<usize>,
    /// Set the mean of each window to zero before quantization
    pub norm_mean: bool,
    /// Normalize the Fourier transform to lower bound the Euclidean distance
    pub lower_bounding: bool,
    /// Number of worker threads used for word extraction
    pub workers: usize,
}

impl Default for MuseConfig {
    fn default() -> Self {
        Self {
            word_length: 4,
            alphabet_size: 4,
            histogram: HistogramType::default(),
            window_lengths: vec![4, 6, 8, 10, 12, 14, 16],
            norm_mean: true,
            lower_bounding: true,
            workers: default_workers(),
        }
    }
}

impl MuseConfig {
    /// Check all parameters, rejecting values that cannot produce features.
    pub fn validate(&self) -> Result<()> {
        if self.word_length == 0 {
            return Err(MuseError::invalid_parameter(
                "word_length",
                self.word_length,
                "must be positive",
            ));
        }
        if self.alphabet_size == 0 {
            return Err(MuseError::invalid_parameter(
                "alphabet_size",
                self.alphabet_size,
                "must be positive",
            ));
        }
        if self.window_lengths.is_empty() {
            return Err(MuseError::invalid_parameter(
                "window_lengths",
                "[]",
                "at least one window length is required",
            ));
        }
        if let Some(&w) = self.window_lengths.iter().find(|&&w| w == 0) {
            return Err(MuseError::invalid_parameter(
                "window_lengths",
                w,
                "window lengths must be positive",
            ));
        }
        if self.workers == 0 {
            return Err(MuseError::invalid_parameter(
                "workers",
                self.workers,
                "must be positive",
            ));
        }
        Ok(())
    }

    /// Word length actually used for quantization: the next even number.
    pub fn even_word_length(&self) -> usize {
        self.word_length + self.word_length % 2
    }
}

/// Worker count derived from the available hardware concurrency, floored at [`MIN_WORKERS`].
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .max(MIN_WORKERS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = MuseConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.workers >= MIN_WORKERS);
    }

    #[test]
    fn test_even_word_length() {
        let mut config = MuseConfig {
            word_length: 5,
            ..Default::default()
        };
        assert_eq!(config.even_word_length(), 6);
        config.word_length = 6;
        assert_eq!(config.even_word_length(), 6);
        config.word_length = 1;
        assert_eq!(config.even_word_length(), 2);
    }

    #[test]
    fn test_rejects_zero_word_length() {
        let config = MuseConfig {
            word_length: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, MuseError::InvalidParameter { ref param, .. } if param == "word_length"));
    }

    #[test]
    fn test_rejects_zero_alphabet() {
        let config = MuseConfig {
            alphabet_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_and_zero_windows() {
        let config = MuseConfig {
            window_lengths: vec![],
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = MuseConfig {
            window_lengths: vec![4, 0, 8],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_workers() {
        let config = MuseConfig {
            workers: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
