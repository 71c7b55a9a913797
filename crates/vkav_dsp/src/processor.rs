//! Signal Processor
//!
//! Runs once per render frame on a fresh [`AudioData`] snapshot:
//! window → FFT → decode → equalize → loudness → smooth.
//!
//! # Real-time Safety
//!
//! Every buffer is sized when the processor is built. `process()` does not
//! allocate; the finished spectra are exchanged with the snapshot's arrays
//! instead of being copied.

use tracing::debug;

use crate::data::AudioData;
use crate::eq::{loudness, EqualizerCurve};
use crate::error::{DspError, DspResult};
use crate::fft::fft;
use crate::settings::ProcessSettings;
use crate::smooth::KernelSmoother;
use crate::spectrum::{decode_mono, decode_stereo};
use crate::window::RaisedSineWindow;
use crate::Complex;

/// Converts time-domain snapshots into display spectra and loudness
pub struct SignalProcessor {
    settings: ProcessSettings,
    window: RaisedSineWindow,
    equalizer: EqualizerCurve,
    /// `None` when smoothing is disabled by a degenerate configuration
    smoother: Option<KernelSmoother>,
    /// Transform buffer (`N/2` points for mono, `N` for stereo)
    transform: Vec<Complex>,
    raw_left: Vec<f32>,
    raw_right: Vec<f32>,
    smoothed_left: Vec<f32>,
    smoothed_right: Vec<f32>,
}

impl SignalProcessor {
    /// Build a processor for `settings`
    pub fn new(settings: ProcessSettings) -> DspResult<Self> {
        settings.validate()?;

        let input_size = settings.input_size;
        let bins = settings.spectrum_bins();
        let transform_len = if settings.channels == 1 {
            input_size / 2
        } else {
            input_size
        };

        let smoother = KernelSmoother::new(&settings);
        match &smoother {
            Some(s) => debug!(
                "Spectrum smoothing {} -> {} bins (kernel radius {:.2})",
                bins,
                settings.output_size,
                s.radius()
            ),
            None => debug!("Spectrum smoothing disabled, passing {} raw bins through", bins),
        }

        // Rust pattern: only allocate the scratch the configured path needs
        let smoothed_len = if smoother.is_some() {
            settings.output_size
        } else {
            0
        };

        Ok(Self {
            settings,
            window: RaisedSineWindow::new(input_size),
            equalizer: EqualizerCurve::new(input_size, settings.amplitude),
            smoother,
            transform: vec![Complex::new(0.0, 0.0); transform_len],
            raw_left: vec![0.0; bins],
            raw_right: vec![0.0; bins],
            smoothed_left: vec![0.0; smoothed_len],
            smoothed_right: vec![0.0; smoothed_len],
        })
    }

    pub fn settings(&self) -> &ProcessSettings {
        &self.settings
    }

    /// Process one snapshot in place
    ///
    /// Reads the first `input_size` frames of `data.buffer` and replaces
    /// `data.left`, `data.right` and the loudness values. Those frames are
    /// windowed in place, so the renderer sees the tapered samples.
    pub fn process(&mut self, data: &mut AudioData) -> DspResult<()> {
        self.check_sizes(data)?;

        self.load_transform(&mut data.buffer);
        fft(&mut self.transform);

        if self.settings.channels == 1 {
            decode_mono(&self.transform, &mut self.raw_left, &mut self.raw_right);
        } else {
            decode_stereo(&self.transform, &mut self.raw_left, &mut self.raw_right);
        }

        self.equalizer.apply(&mut self.raw_left, &mut self.raw_right);

        data.left_loudness = loudness(&self.raw_left, self.settings.input_size);
        data.right_loudness = loudness(&self.raw_right, self.settings.input_size);

        match &self.smoother {
            Some(smoother) => {
                smoother.smooth(
                    &self.raw_left,
                    &self.raw_right,
                    &mut self.smoothed_left,
                    &mut self.smoothed_right,
                );
                std::mem::swap(&mut data.left, &mut self.smoothed_left);
                std::mem::swap(&mut data.right, &mut self.smoothed_right);
            }
            None => {
                std::mem::swap(&mut data.left, &mut self.raw_left);
                std::mem::swap(&mut data.right, &mut self.raw_right);
            }
        }

        Ok(())
    }

    fn check_sizes(&self, data: &AudioData) -> DspResult<()> {
        let samples = self.settings.input_size * 2;
        if data.buffer.len() < samples {
            return Err(DspError::BufferSizeMismatch {
                expected: samples,
                got: data.buffer.len(),
            });
        }
        for spectrum in [&data.left, &data.right] {
            if spectrum.len() != self.settings.output_size {
                return Err(DspError::BufferSizeMismatch {
                    expected: self.settings.output_size,
                    got: spectrum.len(),
                });
            }
        }
        Ok(())
    }

    /// Window the first `input_size` frames of the interleaved stereo buffer
    /// in place and load them into the transform input
    fn load_transform(&mut self, buffer: &mut [f32]) {
        let frames = &mut buffer[..self.settings.input_size * 2];
        self.window.apply_stereo(frames);

        if self.settings.channels == 1 {
            // Both slots hold the same sample; two consecutive left samples
            // make one complex point
            for (bin, pair) in self.transform.iter_mut().zip(frames.chunks_exact(4)) {
                *bin = Complex::new(pair[0], pair[2]);
            }
        } else {
            for (bin, frame) in self.transform.iter_mut().zip(frames.chunks_exact(2)) {
                *bin = Complex::new(frame[0], frame[1]);
            }
        }
    }
}
