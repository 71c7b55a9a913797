//! In-place Radix-2 FFT
//!
//! Iterative Cooley-Tukey transform: a bit-reversal permutation followed by
//! log2(N) butterfly passes. The twiddle factor of each pass is computed
//! once and advanced by complex multiplication across the butterflies.
//!
//! The buffer length must be a power of two; this is checked when the
//! processor is configured, not on every call.

use std::f64::consts::PI;

use crate::Complex;

/// Forward FFT of `buffer`, in place
///
/// Uses the `exp(-i2πk/N)` sign convention and applies no scaling.
pub fn fft(buffer: &mut [Complex]) {
    let size = buffer.len();
    debug_assert!(size == 0 || size.is_power_of_two());

    bit_reverse_shuffle(buffer);

    let mut span = 2;
    while span <= size {
        let half = span / 2;
        let step = Complex::from_polar(1.0, (-2.0 * PI / span as f64) as f32);

        for block in buffer.chunks_exact_mut(span) {
            let (lower, upper) = block.split_at_mut(half);
            let mut twiddle = Complex::new(1.0, 0.0);
            for (u, v) in lower.iter_mut().zip(upper.iter_mut()) {
                let t = twiddle * *v;
                *v = *u - t;
                *u += t;
                twiddle *= step;
            }
        }

        span <<= 1;
    }
}

/// Reorder `buffer` so that element `i` moves to the bit-reversed index of `i`
pub fn bit_reverse_shuffle(buffer: &mut [Complex]) {
    let size = buffer.len();
    if size < 2 {
        return;
    }

    let bits = size.trailing_zeros();
    for i in 0..size {
        let j = reverse_bits(i, bits);
        if i < j {
            buffer.swap(i, j);
        }
    }
}

/// Reverse the lowest `bits` bits of `value`
#[inline]
fn reverse_bits(value: usize, bits: u32) -> usize {
    if bits == 0 {
        0
    } else {
        value.reverse_bits() >> (usize::BITS - bits)
    }
}
