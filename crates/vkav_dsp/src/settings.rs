//! Signal Processor Configuration

use serde::{Deserialize, Serialize};

use crate::error::{DspError, DspResult};

/// Fixed configuration of a [`crate::SignalProcessor`]
///
/// Built once from configuration and never mutated; there is no
/// reconfiguration path, a new processor is built instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProcessSettings {
    /// Number of audio channels in the source (1 = mono, 2 = stereo)
    pub channels: u16,

    /// Samples per channel fed to each transform (power of two)
    pub input_size: usize,

    /// Number of spectrum bins handed to the renderer per channel
    pub output_size: usize,

    /// Scale of the equalization curve
    pub amplitude: f32,

    /// Width of the smoothing kernel, 0 disables smoothing
    pub smoothing_level: f32,
}

impl Default for ProcessSettings {
    fn default() -> Self {
        Self {
            channels: 2,
            input_size: 2048,
            output_size: 256,
            amplitude: 1.0,
            smoothing_level: 2.0,
        }
    }
}

impl ProcessSettings {
    /// Number of raw spectrum bins the transform produces per channel
    pub fn spectrum_bins(&self) -> usize {
        self.input_size / 2
    }

    /// Gaussian kernel coefficient used by the smoothing stage
    ///
    /// Not finite for a degenerate configuration (zero smoothing level or
    /// zero output size), in which case smoothing is skipped.
    pub fn smoothing_factor(&self) -> f32 {
        let input = self.input_size as f32;
        let scaled = self.smoothing_level * self.output_size as f32;
        input * input * 0.125 / (scaled * scaled)
    }

    /// Whether the smoothing/resample stage runs
    pub fn is_smoothed(&self) -> bool {
        self.smoothing_factor().is_finite()
    }

    /// Validate configuration
    pub fn validate(&self) -> DspResult<()> {
        if !matches!(self.channels, 1 | 2) {
            return Err(DspError::InvalidChannels(self.channels));
        }
        if self.input_size < 4 || !self.input_size.is_power_of_two() {
            return Err(DspError::InvalidInputSize(self.input_size));
        }
        if self.output_size == 0 {
            return Err(DspError::InvalidOutputSize(self.output_size));
        }
        // Without smoothing the raw spectrum is handed out as-is
        if !self.is_smoothed() && self.output_size != self.spectrum_bins() {
            return Err(DspError::PassthroughSizeMismatch {
                output_size: self.output_size,
                bins: self.spectrum_bins(),
            });
        }
        Ok(())
    }
}
