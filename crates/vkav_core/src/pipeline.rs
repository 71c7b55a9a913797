//! Capture-to-Spectrum Pipeline
//!
//! Pairs a [`Sampler`] with a [`SignalProcessor`] and the snapshot they
//! share. The render loop calls [`Pipeline::tick`] once per frame.

use tracing::debug;
use vkav_dsp::{AudioData, ProcessSettings, SignalProcessor};

use crate::config::AudioSettings;
use crate::error::{EngineError, EngineResult};
use crate::sampler::Sampler;

pub struct Pipeline {
    sampler: Sampler,
    processor: SignalProcessor,
    data: AudioData,
}

impl Pipeline {
    /// Start capture and build the matching processor
    pub fn new(audio: AudioSettings, process: ProcessSettings) -> EngineResult<Self> {
        check_compatible(&audio, &process)?;
        let sampler = Sampler::start(audio)?;
        Self::with_sampler(sampler, process)
    }

    /// Build a pipeline around an already started sampler
    pub fn with_sampler(sampler: Sampler, process: ProcessSettings) -> EngineResult<Self> {
        let audio = sampler.settings();
        check_compatible(audio, &process)?;

        let processor = SignalProcessor::new(process)?;
        let data = AudioData::new(audio.window_depth, process.output_size);
        debug!(
            "Pipeline ready: {} frame window, {} point transform, {} bins",
            audio.window_depth, process.input_size, process.output_size
        );

        Ok(Self {
            sampler,
            processor,
            data,
        })
    }

    /// Refresh the snapshot if new audio arrived, and return it
    ///
    /// Without new audio the previous snapshot is returned unchanged.
    pub fn tick(&mut self) -> EngineResult<&AudioData> {
        if self.sampler.modified() {
            self.sampler.copy_data(&mut self.data)?;
            self.processor.process(&mut self.data)?;
        }
        Ok(&self.data)
    }

    /// The most recent snapshot
    pub fn data(&self) -> &AudioData {
        &self.data
    }

    pub fn stopped(&self) -> bool {
        self.sampler.stopped()
    }

    pub fn updates_per_second(&self) -> u32 {
        self.sampler.updates_per_second()
    }

    pub fn stop(&mut self) {
        self.sampler.stop();
    }
}

/// Capture and processing settings must describe the same stream
fn check_compatible(audio: &AudioSettings, process: &ProcessSettings) -> EngineResult<()> {
    audio.validate().map_err(EngineError::ConfigError)?;
    process.validate()?;

    if audio.channels != process.channels {
        return Err(EngineError::ConfigError(format!(
            "Capture has {} channels but processing expects {}",
            audio.channels, process.channels
        )));
    }
    if process.input_size > audio.window_depth {
        return Err(EngineError::ConfigError(format!(
            "Transform size {} exceeds window depth {}",
            process.input_size, audio.window_depth
        )));
    }
    Ok(())
}
