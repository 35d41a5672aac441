//! Deterministic quantizers for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::config::HistogramType;
use crate::error::{MuseError, Result};
use crate::quantizer::{QuantizerFactory, SymbolicQuantizer, WindowingParams};
use crate::series::MultivariateSeries;
use crate::words::SymbolicWord;

/// Emits the first value of every window, rounded, as the word.
#[derive(Debug, Default)]
pub struct ValueQuantizer {
    window_length: Option<usize>,
}

impl ValueQuantizer {
    pub fn factory() -> QuantizerFactory {
        Box::new(|_: HistogramType| Box::new(ValueQuantizer::default()) as Box<dyn SymbolicQuantizer>)
    }
}

impl SymbolicQuantizer for ValueQuantizer {
    fn fit_windowing(
        &mut self,
        _samples: &[MultivariateSeries],
        params: &WindowingParams,
    ) -> Result<()> {
        self.window_length = Some(params.window_length);
        Ok(())
    }

    fn transform_windowing(
        &self,
        series: &[f64],
        _word_length: usize,
    ) -> Result<Vec<SymbolicWord>> {
        let window_length = self.window_length.ok_or_else(|| MuseError::Quantizer {
            window_length: 0,
            reason: "not fitted".to_string(),
        })?;
        Ok(series
            .windows(window_length)
            .map(|w| w[0].round().max(0.0) as SymbolicWord)
            .collect())
    }
}

/// Value quantizer factory that counts fits.
pub fn counting_factory() -> (QuantizerFactory, Arc<AtomicUsize>) {
    let fits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&fits);
    let factory: QuantizerFactory = Box::new(move |_: HistogramType| {
        Box::new(CountingQuantizer {
            inner: ValueQuantizer::default(),
            fits: Arc::clone(&counter),
        }) as Box<dyn SymbolicQuantizer>
    });
    (factory, fits)
}

struct CountingQuantizer {
    inner: ValueQuantizer,
    fits: Arc<AtomicUsize>,
}

impl SymbolicQuantizer for CountingQuantizer {
    fn fit_windowing(
        &mut self,
        samples: &[MultivariateSeries],
        params: &WindowingParams,
    ) -> Result<()> {
        self.fits.fetch_add(1, Ordering::SeqCst);
        self.inner.fit_windowing(samples, params)
    }

    fn transform_windowing(
        &self,
        series: &[f64],
        word_length: usize,
    ) -> Result<Vec<SymbolicWord>> {
        self.inner.transform_windowing(series, word_length)
    }
}

/// Value quantizer factory whose fit fails for one window length.
pub fn failing_factory(failing_window: usize) -> QuantizerFactory {
    Box::new(move |_: HistogramType| {
        Box::new(FailingQuantizer {
            inner: ValueQuantizer::default(),
            failing_window,
        }) as Box<dyn SymbolicQuantizer>
    })
}

struct FailingQuantizer {
    inner: ValueQuantizer,
    failing_window: usize,
}

impl SymbolicQuantizer for FailingQuantizer {
    fn fit_windowing(
        &mut self,
        samples: &[MultivariateSeries],
        params: &WindowingParams,
    ) -> Result<()> {
        if params.window_length == self.failing_window {
            return Err(MuseError::Quantizer {
                window_length: params.window_length,
                reason: "fit failed".to_string(),
            });
        }
        self.inner.fit_windowing(samples, params)
    }

    fn transform_windowing(
        &self,
        series: &[f64],
        word_length: usize,
    ) -> Result<Vec<SymbolicWord>> {
        self.inner.transform_windowing(series, word_length)
    }
}
