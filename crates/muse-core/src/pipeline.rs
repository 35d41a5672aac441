//! End-to-end bag-of-bigrams feature extraction.

use tracing::info;

use crate::bag::{build_bags, BagOfBigrams};
use crate::chi2::{filter_chi_squared, FilterSummary};
use crate::config::MuseConfig;
use crate::dictionary::FeatureDictionary;
use crate::error::{MuseError, Result};
use crate::extract::{WordExtractor, WordTable};
use crate::quantizer::QuantizerFactory;
use crate::series::MultivariateSeries;

/// Filtered, compacted features of a training batch.
#[derive(Debug, Clone)]
pub struct MuseFeatures {
    /// One bag per input sample, in input order
    pub bags: Vec<BagOfBigrams>,
    /// Size of the compacted feature space
    pub dimensionality: usize,
    /// Chi-squared filter statistics
    pub summary: FilterSummary,
}

/// Multivariate symbolic feature extractor.
///
/// Owns the configuration, one quantizer slot per window length and the
/// feature dictionary. Word extraction runs on a worker pool; every stage
/// touching the dictionary runs on the calling thread.
pub struct Muse {
    config: MuseConfig,
    extractor: WordExtractor,
    dict: FeatureDictionary,
}

impl Muse {
    /// Validate `config` and round its word length up to an even number.
    pub fn new(mut config: MuseConfig, factory: QuantizerFactory) -> Result<Self> {
        config.validate()?;
        config.word_length = config.even_word_length();
        let extractor = WordExtractor::new(factory, config.window_lengths.len());
        Ok(Self {
            config,
            extractor,
            dict: FeatureDictionary::new(),
        })
    }

    pub fn config(&self) -> &MuseConfig {
        &self.config
    }

    pub fn dictionary(&self) -> &FeatureDictionary {
        &self.dict
    }

    /// Clear both id spaces of the dictionary.
    pub fn reset(&mut self) {
        self.dict.reset();
    }

    /// Drop fitted quantizers so the next extraction fits new ones.
    pub fn clear_quantizers(&mut self) {
        self.extractor.reset();
    }

    /// Extract symbolic words for every window length in parallel.
    pub fn create_words(&mut self, samples: &[MultivariateSeries]) -> Result<WordTable> {
        self.extractor.extract(&self.config, samples)
    }

    /// Build raw-space bags of unigrams and bigrams masked to `word_length`.
    pub fn create_bags(
        &mut self,
        table: &WordTable,
        samples: &[MultivariateSeries],
        word_length: usize,
    ) -> Result<Vec<BagOfBigrams>> {
        self.check_word_length(word_length)?;
        build_bags(
            &mut self.dict,
            table,
            samples,
            &self.config.window_lengths,
            self.config.alphabet_size,
            word_length,
        )
    }

    /// Drop non-discriminative features and compact the dictionary.
    pub fn filter_chi_squared(
        &mut self,
        bags: &mut [BagOfBigrams],
        chi_limit: f64,
    ) -> Result<FilterSummary> {
        filter_chi_squared(&mut self.dict, bags, chi_limit)
    }

    /// Run extraction, bag building, filtering and compaction on a training batch.
    ///
    /// Starts a new dictionary generation; quantizers fitted by earlier calls
    /// are reused.
    pub fn fit_transform(
        &mut self,
        samples: &[MultivariateSeries],
        word_length: usize,
        chi_limit: f64,
    ) -> Result<MuseFeatures> {
        self.check_word_length(word_length)?;
        self.dict.reset();

        let table = self.create_words(samples)?;
        let mut bags = self.create_bags(&table, samples, word_length)?;
        let summary = self.filter_chi_squared(&mut bags, chi_limit)?;

        let dimensionality = self.dict.size();
        info!(
            n_samples = samples.len(),
            word_length,
            dimensionality,
            "extracted bag-of-bigrams features"
        );
        Ok(MuseFeatures {
            bags,
            dimensionality,
            summary,
        })
    }

    /// Build bags for held-out samples in the space of the last fit.
    ///
    /// Features that did not survive filtering are dropped. Before any fit
    /// the bags stay in the raw id space.
    pub fn transform(
        &mut self,
        samples: &[MultivariateSeries],
        word_length: usize,
    ) -> Result<Vec<BagOfBigrams>> {
        let table = self.create_words(samples)?;
        let mut bags = self.create_bags(&table, samples, word_length)?;
        self.dict.project(&mut bags);
        Ok(bags)
    }

    fn check_word_length(&self, word_length: usize) -> Result<()> {
        if word_length == 0 || word_length > self.config.word_length {
            return Err(MuseError::invalid_parameter(
                "word_length",
                word_length,
                format!("must be in 1..={}", self.config.word_length),
            ));
        }
        Ok(())
    }
}
