//! DSP Error Types

use thiserror::Error;

/// Errors that can occur while configuring or running the signal processor
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DspError {
    #[error("Invalid channel count: {0} (must be 1 or 2)")]
    InvalidChannels(u16),

    #[error("Transform input size must be a power of two and at least 4, got {0}")]
    InvalidInputSize(usize),

    #[error("Output spectrum size must be positive, got {0}")]
    InvalidOutputSize(usize),

    #[error("Unsmoothed output needs {bins} bins to match the raw spectrum, got {output_size}")]
    PassthroughSizeMismatch { output_size: usize, bins: usize },

    #[error("Buffer size mismatch: expected {expected}, got {got}")]
    BufferSizeMismatch { expected: usize, got: usize },
}

/// Result type alias for DSP operations
pub type DspResult<T> = Result<T, DspError>;
