//! Bag-of-bigrams construction.
//!
//! For every eligible window length and variate, each word contributes a
//! unigram feature and, when the window ending one full window length earlier
//! exists, a bigram of that earlier word and the current one. The two windows
//! of a bigram never overlap.

use std::collections::BTreeMap;

use tracing::debug;

use crate::dictionary::{FeatureDictionary, FeatureId, FeatureKey, IdSpace};
use crate::error::{MuseError, Result};
use crate::extract::WordTable;
use crate::series::{check_dimensionality, ClassLabel, MultivariateSeries};
use crate::words::{mask_word, word_mask};

/// Sparse unigram and bigram frequencies of one sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BagOfBigrams {
    /// Feature id to occurrence count, ordered by id
    pub counts: BTreeMap<FeatureId, u64>,
    /// Class of the sample
    pub label: ClassLabel,
    /// Id space of the keys in `counts`
    pub space: IdSpace,
}

impl BagOfBigrams {
    pub fn new(label: ClassLabel) -> Self {
        Self {
            counts: BTreeMap::new(),
            label,
            space: IdSpace::Raw,
        }
    }

    /// Increment the count of `id` by one.
    pub fn add(&mut self, id: FeatureId) {
        *self.counts.entry(id).or_insert(0) += 1;
    }

    /// Count of `id`, zero when absent.
    pub fn count(&self, id: FeatureId) -> u64 {
        self.counts.get(&id).copied().unwrap_or(0)
    }

    /// Number of stored entries, zeroed ones included.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total_count(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Entries with a positive count.
    pub fn iter(&self) -> impl Iterator<Item = (FeatureId, u64)> + '_ {
        self.counts
            .iter()
            .filter(|&(_, &c)| c > 0)
            .map(|(&id, &c)| (id, c))
    }
}

/// Build one bag per sample from extracted words.
///
/// Window lengths shorter than `word_length` are skipped. Words are masked
/// to `word_length` symbols before they become feature keys.
pub fn build_bags(
    dict: &mut FeatureDictionary,
    table: &WordTable,
    samples: &[MultivariateSeries],
    window_lengths: &[usize],
    alphabet_size: usize,
    word_length: usize,
) -> Result<Vec<BagOfBigrams>> {
    let dimensionality = check_dimensionality(samples)?;
    validate_table(table, samples.len(), window_lengths.len(), dimensionality)?;

    let mask = word_mask(alphabet_size, word_length);
    let mut bags = Vec::with_capacity(samples.len());

    for (sample, mts) in samples.iter().enumerate() {
        let mut bag = BagOfBigrams::new(mts.label);

        for (index, &window_length) in window_lengths.iter().enumerate() {
            if window_length < word_length {
                continue;
            }
            for (variate, words) in table.windows[index][sample].iter().enumerate() {
                for (offset, &word) in words.iter().enumerate() {
                    let word = mask_word(word, mask);
                    bag.add(dict.lookup_or_insert(FeatureKey::Unigram {
                        window_length,
                        variate,
                        word,
                    }));

                    if offset >= window_length {
                        let prev = mask_word(words[offset - window_length], mask);
                        bag.add(dict.lookup_or_insert(FeatureKey::Bigram {
                            window_length,
                            variate,
                            prev,
                            word,
                        }));
                    }
                }
            }
        }
        bags.push(bag);
    }

    debug!(
        n_samples = bags.len(),
        dictionary_size = dict.raw_size(),
        word_length,
        "built bags of bigrams"
    );
    Ok(bags)
}

fn validate_table(
    table: &WordTable,
    n_samples: usize,
    n_windows: usize,
    dimensionality: usize,
) -> Result<()> {
    if table.n_windows() != n_windows {
        return Err(MuseError::InvalidInput(format!(
            "word table covers {} window lengths, expected {}",
            table.n_windows(),
            n_windows
        )));
    }
    for (index, window) in table.windows.iter().enumerate() {
        if window.len() != n_samples {
            return Err(MuseError::InvalidInput(format!(
                "window {} holds words for {} samples, expected {}",
                index,
                window.len(),
                n_samples
            )));
        }
        if let Some((sample, words)) = window
            .iter()
            .enumerate()
            .find(|(_, w)| w.len() != dimensionality)
        {
            return Err(MuseError::DimensionMismatch {
                sample,
                expected: dimensionality,
                got: words.len(),
            });
        }
    }
    Ok(())
}
