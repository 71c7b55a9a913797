//! Vkav Core - Capture Engine
//!
//! This crate keeps a live window of recent audio and turns it into the
//! spectrum snapshot a visualizer draws each frame:
//! - Capture device discovery and blocking reads (via CPAL)
//! - Sliding window of chunks updated by pointer exchange
//! - Locked snapshot copy with mono-to-stereo expansion
//! - Per-frame processing through [`vkav_dsp`]
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Capture Thread                         │
//! │   cpal callback ──rtrb──▶ read_chunk ──swap──▶ RingWindow   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │ parking_lot::Mutex
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Render Thread                          │
//! │   Pipeline::tick ──copy_data──▶ AudioData ──process──▶ draw │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod discovery;
mod error;
mod pipeline;
mod rate;
mod ring;
mod sampler;
mod settings;
mod source;

pub use config::AudioSettings;
pub use discovery::{discover_default_source, discover_with, select_monitor, DiscoveryContext};
pub use error::{EngineError, EngineResult};
pub use pipeline::Pipeline;
pub use rate::RateCounter;
pub use ring::{Chunk, RingWindow};
pub use sampler::Sampler;
pub use settings::VkavSettings;
pub use source::{CaptureSource, CpalSource};

// Re-export DSP types for convenience
pub use vkav_dsp::{AudioData, ProcessSettings, SignalProcessor};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crate_exports() {
        // Verify public API is accessible
        let _audio = AudioSettings::default();
        let _settings = VkavSettings::default();
        let _ring = RingWindow::new(8, 1024);
    }
}
