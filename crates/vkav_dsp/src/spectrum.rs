//! Magnitude Spectrum Decoding
//!
//! Both paths run a single complex FFT and separate the result using
//! conjugate symmetry of real signals:
//!
//! - **Mono**: `N` real samples are packed pairwise into `N/2` complex
//!   values (`x[2k] + i·x[2k+1]`). The half-length transform `Z` splits into
//!   the even-sample spectrum `F` and odd-sample spectrum `G`, recombined
//!   with the twiddle `exp(-i2πr/N)`.
//! - **Stereo**: left and right are packed as real and imaginary parts of
//!   one `N`-point signal, and each channel is recovered linearly from
//!   `Z[i]` and `conj(Z[N-i])`.
//!
//! Bins `1..N/2` are computed; bin 0 is filled by [`fill_dc`].

use std::f64::consts::PI;

use crate::Complex;

const HALF_I: Complex = Complex::new(0.0, 0.5);

/// Decode the half-length transform of a pair-packed real signal
///
/// `transform` holds `N/2` bins; `left` and `right` receive the same
/// `N/2` magnitudes (mono is shown identically on both channels).
pub fn decode_mono(transform: &[Complex], left: &mut [f32], right: &mut [f32]) {
    let half = transform.len();
    let size = half * 2;

    for r in 1..half {
        let z = transform[r];
        let mirrored = transform[half - r].conj();

        let even = (z + mirrored) * 0.5;
        let odd = HALF_I * (mirrored - z);
        let twiddle = Complex::from_polar(1.0, (-2.0 * PI * r as f64 / size as f64) as f32);

        let magnitude = (even + twiddle * odd).norm();
        left[r] = magnitude;
        right[r] = magnitude;
    }

    fill_dc(left, right);
}

/// Decode the full-length transform of a `left + i·right` packed signal
///
/// `transform` holds `N` bins; `left` and `right` receive `N/2` magnitudes.
pub fn decode_stereo(transform: &[Complex], left: &mut [f32], right: &mut [f32]) {
    let size = transform.len();

    for i in 1..size / 2 {
        let z = transform[i];
        let mirrored = transform[size - i].conj();

        left[i] = ((z + mirrored) * 0.5).norm();
        right[i] = (HALF_I * (mirrored - z)).norm();
    }

    fill_dc(left, right);
}

/// Fill bin 0 of each channel from bin 1 of the *other* channel
///
/// The DC bin is never computed; this keeps the first bar of a display
/// visually continuous with its neighbour.
pub fn fill_dc(left: &mut [f32], right: &mut [f32]) {
    left[0] = right[1];
    right[0] = left[1];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fft::fft;
    use std::f32::consts::TAU;

    fn sine(size: usize, cycles: f32, amplitude: f32) -> Vec<f32> {
        (0..size)
            .map(|n| amplitude * (TAU * cycles * n as f32 / size as f32).sin())
            .collect()
    }

    fn mono_spectrum(samples: &[f32]) -> Vec<f32> {
        let mut transform: Vec<Complex> = samples
            .chunks_exact(2)
            .map(|pair| Complex::new(pair[0], pair[1]))
            .collect();
        fft(&mut transform);

        let mut left = vec![0.0; samples.len() / 2];
        let mut right = vec![0.0; samples.len() / 2];
        decode_mono(&transform, &mut left, &mut right);
        assert_eq!(left, right);
        left
    }

    fn stereo_spectrum(left_in: &[f32], right_in: &[f32]) -> (Vec<f32>, Vec<f32>) {
        let mut transform: Vec<Complex> = left_in
            .iter()
            .zip(right_in)
            .map(|(&l, &r)| Complex::new(l, r))
            .collect();
        fft(&mut transform);

        let mut left = vec![0.0; left_in.len() / 2];
        let mut right = vec![0.0; left_in.len() / 2];
        decode_stereo(&transform, &mut left, &mut right);
        (left, right)
    }

    fn peak_bin(spectrum: &[f32]) -> usize {
        spectrum
            .iter()
            .enumerate()
            .skip(1)
            .fold((0, f32::MIN), |best, (i, &v)| if v > best.1 { (i, v) } else { best })
            .0
    }

    #[test]
    fn test_mono_sine_concentrates_at_its_bin() {
        for (size, bin) in [(64, 5), (256, 17), (1024, 100)] {
            let spectrum = mono_spectrum(&sine(size, bin as f32, 1.0));

            // A unit sine aligned to a bin has magnitude N/2 there
            let expected = size as f32 / 2.0;
            assert!((spectrum[bin] - expected).abs() < expected * 1e-3);

            for (i, &v) in spectrum.iter().enumerate().skip(1) {
                if i != bin {
                    assert!(v < expected * 1e-3, "leakage at bin {}: {}", i, v);
                }
            }
        }
    }

    #[test]
    fn test_mono_matches_direct_real_transform() {
        let size = 128;
        let samples: Vec<f32> = (0..size).map(|n| ((n * 7 % 13) as f32 - 6.0) / 6.0).collect();

        let mut direct: Vec<Complex> = samples.iter().map(|&s| Complex::new(s, 0.0)).collect();
        fft(&mut direct);

        let spectrum = mono_spectrum(&samples);
        for r in 1..size / 2 {
            assert!(
                (spectrum[r] - direct[r].norm()).abs() < 1e-2,
                "bin {}: {} vs {}",
                r,
                spectrum[r],
                direct[r].norm()
            );
        }
    }

    #[test]
    fn test_stereo_channels_separate() {
        let size = 512;
        let (left, right) = stereo_spectrum(&sine(size, 20.0, 1.0), &sine(size, 50.0, 0.5));

        assert_eq!(peak_bin(&left), 20);
        assert_eq!(peak_bin(&right), 50);

        assert!((left[20] - 256.0).abs() < 0.5);
        assert!((right[50] - 128.0).abs() < 0.5);

        // Negligible cross-leakage
        assert!(left[50] < 0.05);
        assert!(right[20] < 0.05);
    }

    #[test]
    fn test_dc_fill_takes_neighbour_of_other_channel() {
        let mut left = vec![9.0, 1.0, 2.0];
        let mut right = vec![9.0, 3.0, 4.0];
        fill_dc(&mut left, &mut right);

        assert_eq!(left[0], 3.0);
        assert_eq!(right[0], 1.0);
    }

    #[test]
    fn test_dc_bin_is_not_computed() {
        // A pure DC offset lands in bin 0 of the transform, but the decoded
        // bin 0 only mirrors bin 1 of the other channel
        let size = 64;
        let (left, right) = stereo_spectrum(&vec![1.0; size], &vec![0.0; size]);

        assert!(left[0] < 1e-3);
        assert_eq!(left[0], right[1]);
        assert_eq!(right[0], left[1]);
    }
}
