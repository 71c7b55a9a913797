//! Per-frame Audio Snapshot

/// Snapshot handed to the renderer every frame
///
/// `buffer` holds the time-domain window, always as interleaved stereo
/// (`[L0, R0, L1, R1, ...]`); mono sources are duplicated into both slots.
/// Processing tapers the first `input_size` frames in place.
/// The spectrum arrays are *exchanged* with the processor's scratch storage
/// on every tick, so consumers must not hold on to their allocation across
/// calls.
#[derive(Debug, Clone, Default)]
pub struct AudioData {
    /// Interleaved stereo samples, `window_depth * 2` long
    pub buffer: Vec<f32>,

    /// Left channel magnitude spectrum
    pub left: Vec<f32>,

    /// Right channel magnitude spectrum
    pub right: Vec<f32>,

    /// Left channel loudness
    pub left_loudness: f32,

    /// Right channel loudness
    pub right_loudness: f32,
}

impl AudioData {
    /// Allocate a snapshot for a window of `window_depth` frames and
    /// spectra of `output_size` bins
    pub fn new(window_depth: usize, output_size: usize) -> Self {
        Self {
            buffer: vec![0.0; window_depth * 2],
            left: vec![0.0; output_size],
            right: vec![0.0; output_size],
            left_loudness: 0.0,
            right_loudness: 0.0,
        }
    }

    /// Number of stereo frames in the raw buffer
    pub fn frames(&self) -> usize {
        self.buffer.len() / 2
    }

    /// Number of spectrum bins per channel
    pub fn bins(&self) -> usize {
        self.left.len()
    }
}
