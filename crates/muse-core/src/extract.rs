//! Parallel symbolic word extraction across window lengths.
//!
//! Window indices are partitioned across a fixed-size worker pool by
//! `index % workers`. Each worker holds exclusive borrows of the quantizer
//! slot and output slot of its indices, so no locking is involved. The pool
//! join is the barrier: `extract` returns only after every window length has
//! produced complete output, and the first failing worker fails the batch.

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use tracing::debug;

use crate::config::MuseConfig;
use crate::error::{MuseError, Result};
use crate::quantizer::{QuantizerFactory, SymbolicQuantizer, WindowingParams};
use crate::series::{check_dimensionality, MultivariateSeries};
use crate::words::SymbolicWord;

/// Words of one sample: one position-ordered word sequence per variate.
pub type SampleWords = Vec<Vec<SymbolicWord>>;

/// Extracted words indexed as `[window index][sample][variate][position]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordTable {
    pub windows: Vec<Vec<SampleWords>>,
}

impl WordTable {
    /// Number of window lengths covered.
    pub fn n_windows(&self) -> usize {
        self.windows.len()
    }

    /// Words of `sample` at window `index`, one sequence per variate.
    pub fn sample_words(&self, index: usize, sample: usize) -> Option<&SampleWords> {
        self.windows.get(index).and_then(|w| w.get(sample))
    }
}

type QuantizerSlot = Option<Box<dyn SymbolicQuantizer>>;

/// One window length owned by a worker.
struct WindowSlot<'a> {
    index: usize,
    quantizer: &'a mut QuantizerSlot,
    words: &'a mut Vec<SampleWords>,
}

/// Fits one quantizer per window length and extracts words with it.
pub struct WordExtractor {
    factory: QuantizerFactory,
    quantizers: Vec<QuantizerSlot>,
}

impl WordExtractor {
    pub fn new(factory: QuantizerFactory, n_windows: usize) -> Self {
        Self {
            factory,
            quantizers: (0..n_windows).map(|_| None).collect(),
        }
    }

    /// Whether the quantizer for window `index` has been fitted.
    pub fn is_fitted(&self, index: usize) -> bool {
        self.quantizers.get(index).is_some_and(|q| q.is_some())
    }

    /// Drop all fitted quantizers.
    pub fn reset(&mut self) {
        self.quantizers.iter_mut().for_each(|q| *q = None);
    }

    /// Extract words for all samples at every configured window length.
    ///
    /// Quantizers missing for a window length are fitted on `samples` first;
    /// fitted ones are reused as-is.
    pub fn extract(
        &mut self,
        config: &MuseConfig,
        samples: &[MultivariateSeries],
    ) -> Result<WordTable> {
        check_dimensionality(samples)?;
        let n_windows = config.window_lengths.len();
        if self.quantizers.len() != n_windows {
            return Err(MuseError::InvalidInput(format!(
                "extractor holds {} quantizer slots but {} window lengths are configured",
                self.quantizers.len(),
                n_windows
            )));
        }

        let workers = config.workers.max(1);
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .map_err(|e| MuseError::ThreadPool(e.to_string()))?;

        let mut windows: Vec<Vec<SampleWords>> = vec![Vec::new(); n_windows];
        let mut buckets: Vec<Vec<WindowSlot<'_>>> = (0..workers).map(|_| Vec::new()).collect();
        for (index, (quantizer, words)) in self
            .quantizers
            .iter_mut()
            .zip(windows.iter_mut())
            .enumerate()
        {
            buckets[index % workers].push(WindowSlot {
                index,
                quantizer,
                words,
            });
        }

        let factory = &self.factory;
        pool.install(|| {
            buckets.into_par_iter().try_for_each(|bucket| -> Result<()> {
                for slot in bucket {
                    *slot.words = extract_window(factory, slot.quantizer, config, samples, slot.index)?;
                }
                Ok(())
            })
        })?;

        Ok(WordTable { windows })
    }
}

fn extract_window(
    factory: &QuantizerFactory,
    slot: &mut QuantizerSlot,
    config: &MuseConfig,
    samples: &[MultivariateSeries],
    index: usize,
) -> Result<Vec<SampleWords>> {
    let window_length = config.window_lengths[index];
    let word_length = config.even_word_length();

    let quantizer = match slot.take() {
        Some(q) => q,
        None => {
            let mut q = factory(config.histogram);
            q.fit_windowing(
                samples,
                &WindowingParams {
                    window_length,
                    word_length,
                    alphabet_size: config.alphabet_size,
                    norm_mean: config.norm_mean,
                    lower_bounding: config.lower_bounding,
                },
            )?;
            debug!(window_length, word_length, "fitted quantizer");
            q
        }
    };
    let quantizer = &**slot.insert(quantizer);

    let mut words = Vec::with_capacity(samples.len());
    for mts in samples {
        let mut sample_words = Vec::with_capacity(mts.dimensions());
        for series in &mts.variates {
            if series.len() >= window_length {
                sample_words.push(quantizer.transform_windowing(series, word_length)?);
            } else {
                sample_words.push(Vec::new());
            }
        }
        words.push(sample_words);
    }

    debug!(window_length, n_samples = samples.len(), "extracted words");
    Ok(words)
}
