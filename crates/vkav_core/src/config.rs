//! Capture Configuration

use serde::{Deserialize, Serialize};

/// Audio capture configuration
///
/// Immutable once a [`crate::Sampler`] has been started with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioSettings {
    /// Number of audio channels (1 = mono, 2 = stereo)
    pub channels: u16,

    /// Frames read from the device per chunk
    pub chunk_size: usize,

    /// Frames kept in the sliding window (a multiple of `chunk_size`)
    pub window_depth: usize,

    /// Sample rate in Hz (e.g., 44100, 48000)
    pub sample_rate: u32,

    /// Capture device name, empty to use the system default
    #[serde(default)]
    pub device: String,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            channels: 2,
            chunk_size: 512,
            window_depth: 4096,
            sample_rate: 44100,
            device: String::new(),
        }
    }
}

impl AudioSettings {
    /// Number of chunks in the sliding window
    pub fn chunk_count(&self) -> usize {
        self.window_depth / self.chunk_size
    }

    /// Interleaved samples in one chunk
    pub fn chunk_samples(&self) -> usize {
        self.chunk_size * self.channels as usize
    }

    /// Interleaved samples in the whole window
    pub fn window_samples(&self) -> usize {
        self.window_depth * self.channels as usize
    }

    /// Time to capture one chunk, which bounds how long a stop can take
    pub fn chunk_period_ms(&self) -> f32 {
        (self.chunk_size as f32 / self.sample_rate as f32) * 1000.0
    }

    /// Whether the device should be resolved through discovery
    pub fn uses_default_device(&self) -> bool {
        self.device.is_empty()
    }

    /// Validate configuration
    ///
    /// The channel layout is only checked for being non-empty here; whether
    /// it can be expanded to stereo is decided when the window is copied.
    pub fn validate(&self) -> Result<(), String> {
        if self.channels == 0 {
            return Err("Channel count must be positive".to_string());
        }
        if self.chunk_size == 0 {
            return Err("Chunk size must be positive".to_string());
        }
        if self.window_depth == 0 || self.window_depth % self.chunk_size != 0 {
            return Err(format!(
                "Window depth {} is not a positive multiple of chunk size {}",
                self.window_depth, self.chunk_size
            ));
        }
        if self.sample_rate < 8000 || self.sample_rate > 192000 {
            return Err(format!("Invalid sample rate: {}", self.sample_rate));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AudioSettings::default();
        assert_eq!(config.channels, 2);
        assert_eq!(config.chunk_count(), 8);
        assert_eq!(config.chunk_samples(), 1024);
        assert_eq!(config.window_samples(), 8192);
        assert!(config.uses_default_device());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_chunk_period() {
        let config = AudioSettings {
            chunk_size: 480, // Exactly 10ms at 48kHz
            window_depth: 4800,
            sample_rate: 48000,
            ..Default::default()
        };
        assert!((config.chunk_period_ms() - 10.0).abs() < 0.01);
    }

    #[test]
    fn test_validation() {
        let not_a_multiple = AudioSettings {
            chunk_size: 500,
            window_depth: 4096,
            ..Default::default()
        };
        assert!(not_a_multiple.validate().is_err());

        let no_chunk = AudioSettings {
            chunk_size: 0,
            ..Default::default()
        };
        assert!(no_chunk.validate().is_err());

        let invalid_rate = AudioSettings {
            sample_rate: 100,
            ..Default::default()
        };
        assert!(invalid_rate.validate().is_err());

        let no_channels = AudioSettings {
            channels: 0,
            ..Default::default()
        };
        assert!(no_channels.validate().is_err());

        // Rejected later, in the copy path
        let surround = AudioSettings {
            channels: 6,
            ..Default::default()
        };
        assert!(surround.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = AudioSettings {
            device: "alsa_input.usb-mic".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: AudioSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_device_means_default() {
        let json = r#"{"channels":1,"chunk_size":256,"window_depth":2048,"sample_rate":48000}"#;
        let config: AudioSettings = serde_json::from_str(json).unwrap();
        assert!(config.uses_default_device());
        assert_eq!(config.chunk_count(), 8);
    }
}
