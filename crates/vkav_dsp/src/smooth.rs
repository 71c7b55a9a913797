//! Gaussian Kernel Spectrum Resampling
//!
//! Maps the `N/2`-bin raw spectrum onto the renderer's output resolution.
//! Each output bin is a Gaussian-weighted average of the raw bins around
//! its position, normalised by the total weight so a flat spectrum stays
//! flat.

use crate::settings::ProcessSettings;

/// Kernel weight at which the window is cut off
const CUTOFF_WEIGHT: f32 = 0.05;

/// Resampler from `input_bins` raw bins to `output_bins` display bins
#[derive(Debug, Clone)]
pub struct KernelSmoother {
    input_bins: usize,
    output_bins: usize,
    factor: f32,
    radius: f32,
}

impl KernelSmoother {
    /// Build the smoother for `settings`
    ///
    /// Returns `None` when the smoothing factor is not finite, in which
    /// case the raw spectrum is used unchanged.
    pub fn new(settings: &ProcessSettings) -> Option<Self> {
        let factor = settings.smoothing_factor();
        if !factor.is_finite() {
            return None;
        }

        let input_bins = settings.spectrum_bins();
        let output_bins = settings.output_size;
        let radius =
            (-CUTOFF_WEIGHT.ln() / factor).sqrt() * input_bins as f32 / output_bins as f32;

        Some(Self {
            input_bins,
            output_bins,
            factor,
            radius,
        })
    }

    /// Distance, in raw bins, at which the kernel has decayed to 5%
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Resample both channels
    ///
    /// `raw_*` hold `input_bins` values, `out_*` receive `output_bins` values.
    pub fn smooth(
        &self,
        raw_left: &[f32],
        raw_right: &[f32],
        out_left: &mut [f32],
        out_right: &mut [f32],
    ) {
        let old_size = self.input_bins as f32;
        let new_size = self.output_bins as f32;

        for i in 0..self.output_bins {
            let center = i as f32 * old_size / new_size;
            let (lo, hi) = self.window(center);

            let mut left = 0.0;
            let mut right = 0.0;
            let mut total = 0.0;
            for j in lo..hi {
                let distance = i as f32 - j as f32 * new_size / old_size;
                let weight = (-distance * distance * self.factor).exp();
                left += raw_left[j] * weight;
                right += raw_right[j] * weight;
                total += weight;
            }

            if total > 0.0 {
                out_left[i] = left / total;
                out_right[i] = right / total;
            } else {
                let nearest = self.nearest(center);
                out_left[i] = raw_left[nearest];
                out_right[i] = raw_right[nearest];
            }
        }
    }

    /// Raw bin range `[lo, hi)` covered by the kernel around `center`
    fn window(&self, center: f32) -> (usize, usize) {
        // Truncating casts saturate at 0 for negative positions
        let lo = (center - self.radius) as usize;
        let hi = ((center + self.radius) as usize).min(self.input_bins);

        if hi > lo {
            (lo, hi)
        } else {
            let nearest = self.nearest(center);
            (nearest, nearest + 1)
        }
    }

    fn nearest(&self, center: f32) -> usize {
        (center.round() as usize).min(self.input_bins - 1)
    }
}
