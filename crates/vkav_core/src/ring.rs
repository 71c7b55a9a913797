//! Sliding Capture Window
//!
//! A fixed number of equal-size chunks kept oldest-to-newest by a rotating
//! head index. New chunks are swapped in by ownership exchange: the capture
//! thread hands over its freshly filled spare chunk and receives the
//! oldest chunk back as its next spare. Rotation is O(1) and never copies
//! samples, so the lock around the window is held only for a swap.
//!
//! ```text
//!   head ─┐
//!         ▼
//!  [ c3 ][ c0 ][ c1 ][ c2 ]     rotate_in(spare=c4)
//!  [ c3 ][ c4 ][ c1 ][ c2 ]     spare = c0, head → c1
//! ```

use crate::error::{EngineError, EngineResult};

/// One chunk of interleaved samples
pub type Chunk = Box<[f32]>;

/// Oldest-to-newest window of capture chunks
#[derive(Debug)]
pub struct RingWindow {
    chunks: Vec<Chunk>,
    /// Index of the oldest chunk
    head: usize,
    chunk_len: usize,
}

impl RingWindow {
    /// Create a silent window of `chunk_count` chunks of `chunk_len` samples
    pub fn new(chunk_count: usize, chunk_len: usize) -> Self {
        let chunks = (0..chunk_count).map(|_| Self::empty_chunk(chunk_len)).collect();
        Self {
            chunks,
            head: 0,
            chunk_len,
        }
    }

    /// A zeroed chunk of `chunk_len` samples
    pub fn empty_chunk(chunk_len: usize) -> Chunk {
        vec![0.0; chunk_len].into_boxed_slice()
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn chunk_len(&self) -> usize {
        self.chunk_len
    }

    /// Total samples held, always `chunk_count * chunk_len`
    pub fn len(&self) -> usize {
        self.chunks.len() * self.chunk_len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Make `chunk` the newest chunk, handing the oldest one back through it
    pub fn rotate_in(&mut self, chunk: &mut Chunk) {
        debug_assert_eq!(chunk.len(), self.chunk_len);

        // Rust pattern: mem::swap exchanges the two boxes, not their contents
        std::mem::swap(&mut self.chunks[self.head], chunk);
        self.head = (self.head + 1) % self.chunks.len();
    }

    /// Iterate chunks from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &[f32]> + '_ {
        let count = self.chunks.len();
        (0..count).map(move |i| &*self.chunks[(self.head + i) % count])
    }

    /// Flatten the window into interleaved stereo
    ///
    /// Stereo chunks are copied as-is; mono samples are written to both the
    /// left and right slot. `out` must hold `frames * 2` samples.
    pub fn copy_into(&self, out: &mut [f32], channels: u16) -> EngineResult<()> {
        let expected = match channels {
            1 => self.len() * 2,
            2 => self.len(),
            other => return Err(EngineError::InvalidChannels(other)),
        };
        if out.len() != expected {
            return Err(EngineError::BufferSizeMismatch {
                expected,
                got: out.len(),
            });
        }

        if channels == 2 {
            for (dst, chunk) in out.chunks_exact_mut(self.chunk_len).zip(self.iter()) {
                dst.copy_from_slice(chunk);
            }
        } else {
            let samples = self.iter().flat_map(|chunk| chunk.iter());
            for (frame, &sample) in out.chunks_exact_mut(2).zip(samples) {
                frame[0] = sample;
                frame[1] = sample;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk_of(value: f32, len: usize) -> Chunk {
        vec![value; len].into_boxed_slice()
    }

    fn chunk_values(ring: &RingWindow) -> Vec<f32> {
        ring.iter().map(|chunk| chunk[0]).collect()
    }

    #[test]
    fn test_new_window_is_silent() {
        let ring = RingWindow::new(4, 8);
        assert_eq!(ring.chunk_count(), 4);
        assert_eq!(ring.len(), 32);
        assert!(ring.iter().all(|chunk| chunk.iter().all(|&s| s == 0.0)));
    }

    #[test]
    fn test_rotation_keeps_newest_chunks_in_order() {
        let mut ring = RingWindow::new(4, 3);

        for generation in 1..=10 {
            let mut spare = chunk_of(generation as f32, 3);
            ring.rotate_in(&mut spare);
            assert_eq!(ring.len(), 12);
        }

        assert_eq!(chunk_values(&ring), vec![7.0, 8.0, 9.0, 10.0]);
    }

    #[test]
    fn test_rotation_returns_oldest_chunk() {
        let mut ring = RingWindow::new(2, 2);
        let mut spare = chunk_of(1.0, 2);
        ring.rotate_in(&mut spare);
        let mut spare2 = chunk_of(2.0, 2);
        ring.rotate_in(&mut spare2);

        let mut spare3 = chunk_of(3.0, 2);
        ring.rotate_in(&mut spare3);
        // The chunk pushed first comes back out
        assert_eq!(&*spare3, &[1.0, 1.0]);
        assert_eq!(chunk_values(&ring), vec![2.0, 3.0]);
    }

    #[test]
    fn test_copy_stereo() {
        let mut ring = RingWindow::new(2, 4);
        let mut a: Chunk = vec![1.0, -1.0, 2.0, -2.0].into_boxed_slice();
        let mut b: Chunk = vec![3.0, -3.0, 4.0, -4.0].into_boxed_slice();
        ring.rotate_in(&mut a);
        ring.rotate_in(&mut b);

        let mut out = vec![0.0; 8];
        ring.copy_into(&mut out, 2).unwrap();
        assert_eq!(out, vec![1.0, -1.0, 2.0, -2.0, 3.0, -3.0, 4.0, -4.0]);
    }

    #[test]
    fn test_copy_mono_duplicates_into_stereo() {
        let mut ring = RingWindow::new(2, 2);
        let mut a: Chunk = vec![1.0, 2.0].into_boxed_slice();
        let mut b: Chunk = vec![3.0, 4.0].into_boxed_slice();
        ring.rotate_in(&mut a);
        ring.rotate_in(&mut b);

        let mut out = vec![0.0; 8];
        ring.copy_into(&mut out, 1).unwrap();
        assert_eq!(out, vec![1.0, 1.0, 2.0, 2.0, 3.0, 3.0, 4.0, 4.0]);
    }

    #[test]
    fn test_copy_rejects_unsupported_channels() {
        let ring = RingWindow::new(2, 6);
        let mut out = vec![0.0; 12];
        assert!(matches!(
            ring.copy_into(&mut out, 3),
            Err(EngineError::InvalidChannels(3))
        ));
    }

    #[test]
    fn test_copy_rejects_wrong_output_size() {
        let ring = RingWindow::new(2, 4);
        let mut out = vec![0.0; 10];
        assert!(matches!(
            ring.copy_into(&mut out, 2),
            Err(EngineError::BufferSizeMismatch { expected: 8, got: 10 })
        ));
    }
}
