//! Spectrum Equalization and Loudness
//!
//! Raw magnitude spectra of music fall off steeply with frequency. The
//! equalization curve `0.08 · amplitude · log10(2n/N + 1.05)` lifts the
//! upper bins so the whole range is visible on screen.

/// Per-bin gain curve for one transform length
#[derive(Debug, Clone)]
pub struct EqualizerCurve {
    weights: Vec<f32>,
}

impl EqualizerCurve {
    /// Build the curve for `input_size` transform samples (`input_size / 2` bins)
    pub fn new(input_size: usize, amplitude: f32) -> Self {
        let weights = (0..input_size / 2)
            .map(|n| 0.08 * amplitude * (2.0 * n as f32 / input_size as f32 + 1.05).log10())
            .collect();
        Self { weights }
    }

    /// Gain applied to bin `index`
    #[inline]
    pub fn weight(&self, index: usize) -> f32 {
        self.weights[index]
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Scale both channel spectra in place
    pub fn apply(&self, left: &mut [f32], right: &mut [f32]) {
        for ((l, r), weight) in left.iter_mut().zip(right.iter_mut()).zip(&self.weights) {
            *l *= weight;
            *r *= weight;
        }
    }
}

/// Loudness of one channel's equalized spectrum
///
/// The bin sum is divided by the full transform length `input_size`, not
/// by the number of bins summed.
pub fn loudness(spectrum: &[f32], input_size: usize) -> f32 {
    spectrum.iter().take(input_size / 2).sum::<f32>() / input_size as f32
}
