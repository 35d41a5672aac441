//! Boundary to the symbolic quantizer.
//!
//! The quantizer turns every sliding window of a series into one
//! [`SymbolicWord`]. Its binning is opaque to this crate: it is fitted once
//! per window length and then applied to each series of a batch.

use crate::config::HistogramType;
use crate::error::Result;
use crate::series::MultivariateSeries;
use crate::words::SymbolicWord;

/// Parameters passed to [`SymbolicQuantizer::fit_windowing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowingParams {
    pub window_length: usize,
    pub word_length: usize,
    pub alphabet_size: usize,
    pub norm_mean: bool,
    pub lower_bounding: bool,
}

/// A trainable quantizer mapping sliding windows to symbolic words.
pub trait SymbolicQuantizer: Send + Sync {
    /// Learn the quantization bins from all windows of all samples.
    fn fit_windowing(
        &mut self,
        samples: &[MultivariateSeries],
        params: &WindowingParams,
    ) -> Result<()>;

    /// Emit one word per window position of `series`, in position order.
    ///
    /// Only called with series at least as long as the fitted window.
    fn transform_windowing(&self, series: &[f64], word_length: usize)
        -> Result<Vec<SymbolicWord>>;
}

/// Creates an unfitted quantizer for one window length.
pub type QuantizerFactory = Box<dyn Fn(HistogramType) -> Box<dyn SymbolicQuantizer> + Send + Sync>;
