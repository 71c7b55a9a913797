//! Vkav DSP - Spectrum Processing
//!
//! This crate turns a time-domain audio snapshot into the per-channel
//! spectrum and loudness a renderer consumes every frame:
//! - Raised-sine window over the transform input
//! - In-place radix-2 FFT with real/stereo signal decomposition
//! - Frequency-dependent equalization curve and loudness
//! - Gaussian kernel resampling down to the display resolution
//!
//! # Architecture
//!
//! ```text
//! AudioData.buffer ──window──▶ FFT ──decode──▶ raw spectrum ──EQ──▶ loudness
//!                                                   │
//!                                                   └──kernel smooth──▶ AudioData.left/right
//! ```
//!
//! All scratch storage is allocated when the [`SignalProcessor`] is built;
//! a processing tick never allocates.

mod data;
mod eq;
mod error;
mod fft;
mod processor;
mod settings;
mod smooth;
mod spectrum;
mod window;

pub use data::AudioData;
pub use eq::{loudness, EqualizerCurve};
pub use error::{DspError, DspResult};
pub use fft::{bit_reverse_shuffle, fft};
pub use processor::SignalProcessor;
pub use settings::ProcessSettings;
pub use smooth::KernelSmoother;
pub use spectrum::{decode_mono, decode_stereo, fill_dc};
pub use window::RaisedSineWindow;

/// Complex sample type used by the transform
pub type Complex = rustfft::num_complex::Complex<f32>;
