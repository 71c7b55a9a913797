//! Engine Error Types

use thiserror::Error;

/// Errors that can occur in the capture engine
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("No default capture device found")]
    NoDefaultDevice,

    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("Device discovery failed: {0}")]
    DiscoveryFailed(String),

    #[error("Failed to build audio stream: {0}")]
    StreamBuildError(String),

    #[error("Failed to play audio stream: {0}")]
    StreamPlayError(String),

    #[error("Device read failed: {0}")]
    ReadFailed(String),

    #[error("Invalid channel count: {0} (must be 1 or 2)")]
    InvalidChannels(u16),

    #[error("Stream configuration error: {0}")]
    ConfigError(String),

    #[error("Buffer size mismatch: expected {expected}, got {got}")]
    BufferSizeMismatch { expected: usize, got: usize },

    #[error("Failed to spawn thread: {0}")]
    ThreadSpawn(String),

    #[error("Settings error: {0}")]
    SettingsError(String),

    #[error("DSP error: {0}")]
    DspError(#[from] vkav_dsp::DspError),
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EngineError::DeviceNotFound("Monitor of Built-in Audio".into());
        assert!(err.to_string().contains("Monitor of Built-in Audio"));

        let err = EngineError::InvalidChannels(6);
        assert!(err.to_string().contains('6'));
    }

    #[test]
    fn test_error_from_dsp() {
        let dsp_err = vkav_dsp::DspError::InvalidInputSize(1000);
        let engine_err: EngineError = dsp_err.into();
        assert!(matches!(engine_err, EngineError::DspError(_)));
        assert!(engine_err.to_string().contains("1000"));
    }
}
