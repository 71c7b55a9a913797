//! Raised-sine Window
//!
//! `w(n) = sin²(π·n / (N - 1))`, which tapers both ends of the transform
//! input to zero and reduces spectral leakage.

use std::f32::consts::PI;

/// Pre-computed window coefficients for one transform length
#[derive(Debug, Clone)]
pub struct RaisedSineWindow {
    coeffs: Vec<f32>,
}

impl RaisedSineWindow {
    /// Build the table for `size` samples (`size` ≥ 2)
    pub fn new(size: usize) -> Self {
        let step = PI / (size - 1) as f32;
        let coeffs = (0..size)
            .map(|n| {
                let s = (step * n as f32).sin();
                s * s
            })
            .collect();
        Self { coeffs }
    }

    #[inline]
    pub fn coeff(&self, index: usize) -> f32 {
        self.coeffs[index]
    }

    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Multiply each interleaved stereo frame by its coefficient
    ///
    /// Frames past the table length are left as they are.
    pub fn apply_stereo(&self, frames: &mut [f32]) {
        for (frame, coeff) in frames.chunks_exact_mut(2).zip(&self.coeffs) {
            frame[0] *= coeff;
            frame[1] *= coeff;
        }
    }
}
