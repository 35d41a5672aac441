//! Bag-of-bigrams feature extraction for multivariate time series classification.
//!
//! Each variate of each sample is quantized into symbolic words at several
//! window lengths. Words and non-overlapping word pairs become sparse
//! features, and a chi-squared test keeps only those that separate the
//! class labels. The resulting bags feed a linear classifier.

pub mod bag;
pub mod chi2;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod quantizer;
pub mod series;
pub mod words;

#[cfg(test)]
mod testing;

// Re-exports for convenience
pub use bag::{build_bags, BagOfBigrams};
pub use chi2::{
    chi_limit_for_p_value, chi_squared_scores, filter_chi_squared, presence_counts, FilterSummary,
};
pub use config::{default_workers, HistogramType, MuseConfig, MIN_WORKERS};
pub use dictionary::{FeatureDictionary, FeatureId, FeatureKey, IdSpace};
pub use error::{MuseError, Result};
pub use extract::{SampleWords, WordExtractor, WordTable};
pub use pipeline::{Muse, MuseFeatures};
pub use quantizer::{QuantizerFactory, SymbolicQuantizer, WindowingParams};
pub use series::{check_dimensionality, ClassLabel, MultivariateSeries};
pub use words::{bits_per_symbol, mask_word, pack_symbols, word_mask, SymbolicWord};
