//! Audio Sampler
//!
//! Owns the capture thread and the sliding window it keeps current.
//!
//! ```text
//! ┌──────────────── capture thread ─────────────────┐
//! │ open source → loop { read_chunk(spare)          │
//! │                      lock → rotate_in(spare)    │──► RingWindow
//! │                      modified = true }          │        ▲
//! └─────────────────────────────────────────────────┘        │ lock
//!                                    render thread: copy_data ┘
//! ```
//!
//! The stop flag is checked before and after every blocking read, so a stop
//! takes at most one chunk period plus however long the device takes to
//! return from its read.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::bounded;
use parking_lot::Mutex;
use tracing::{debug, error, info, trace};
use vkav_dsp::AudioData;

use crate::config::AudioSettings;
use crate::error::{EngineError, EngineResult};
use crate::rate::RateCounter;
use crate::ring::RingWindow;
use crate::source::{CaptureSource, CpalSource};

/// Flags shared between the capture thread and the owner
#[derive(Debug, Default)]
struct SharedState {
    stopped: AtomicBool,
    modified: AtomicBool,
    updates_per_second: AtomicU32,
}

/// Live capture into a sliding window
pub struct Sampler {
    settings: AudioSettings,
    ring: Arc<Mutex<RingWindow>>,
    shared: Arc<SharedState>,
    capture_thread: Option<JoinHandle<()>>,
}

impl Sampler {
    /// Start capturing from the configured (or discovered default) device
    ///
    /// A device that cannot be opened does not fail the call: the sampler
    /// comes back already stopped.
    pub fn start(settings: AudioSettings) -> EngineResult<Self> {
        Self::start_with(settings, CpalSource::open)
    }

    /// Start capturing from the source `opener` creates on the capture thread
    pub fn start_with<S, F>(settings: AudioSettings, opener: F) -> EngineResult<Self>
    where
        S: CaptureSource,
        F: FnOnce(&AudioSettings) -> EngineResult<S> + Send + 'static,
    {
        settings.validate().map_err(EngineError::ConfigError)?;

        let ring = Arc::new(Mutex::new(RingWindow::new(
            settings.chunk_count(),
            settings.chunk_samples(),
        )));
        let shared = Arc::new(SharedState::default());

        // Single slot: the capture thread reports once whether the device opened
        let (ready_sender, ready_receiver) = bounded::<bool>(1);

        let ring_clone = Arc::clone(&ring);
        let shared_clone = Arc::clone(&shared);
        let settings_clone = settings.clone();

        let capture_thread = thread::Builder::new()
            .name("vkav-capture".into())
            .spawn(move || {
                let source = match opener(&settings_clone) {
                    Ok(source) => source,
                    Err(e) => {
                        error!("Failed to open capture device: {}", e);
                        shared_clone.stopped.store(true, Ordering::SeqCst);
                        let _ = ready_sender.send(false);
                        return;
                    }
                };
                let _ = ready_sender.send(true);

                Self::capture_loop(
                    source,
                    &ring_clone,
                    &shared_clone,
                    settings_clone.chunk_samples(),
                );
            })
            .map_err(|e| EngineError::ThreadSpawn(e.to_string()))?;

        match ready_receiver.recv() {
            Ok(true) => info!(
                "Sampler started: {} ch, {} frames x {} chunks ({} samples, {:.1} ms/chunk)",
                settings.channels,
                settings.chunk_size,
                settings.chunk_count(),
                settings.window_samples(),
                settings.chunk_period_ms()
            ),
            Ok(false) => {}
            Err(_) => {
                // Opener panicked before answering
                error!("Capture thread exited during startup");
                shared.stopped.store(true, Ordering::SeqCst);
            }
        }

        Ok(Self {
            settings,
            ring,
            shared,
            capture_thread: Some(capture_thread),
        })
    }

    fn capture_loop<S: CaptureSource>(
        mut source: S,
        ring: &Mutex<RingWindow>,
        shared: &SharedState,
        chunk_len: usize,
    ) {
        let mut spare = RingWindow::empty_chunk(chunk_len);
        let mut rate = RateCounter::new();

        while !shared.stopped.load(Ordering::SeqCst) {
            if let Err(e) = source.read_chunk(&mut spare) {
                error!("Capture read failed, stopping: {}", e);
                shared.stopped.store(true, Ordering::SeqCst);
                break;
            }

            if shared.stopped.load(Ordering::SeqCst) {
                break;
            }

            {
                let mut ring = ring.lock();
                ring.rotate_in(&mut spare);
                shared.modified.store(true, Ordering::SeqCst);
            }

            if let Some(ups) = rate.record() {
                shared.updates_per_second.store(ups, Ordering::Relaxed);
                trace!("Capture rate: {} chunks/s", ups);
            }
        }

        debug!("Capture loop exited");
        // `source` drops here, on the thread that opened it
    }

    /// Flatten the window into `data.buffer` as interleaved stereo
    ///
    /// Clears the modified flag. A channel layout that cannot be expanded to
    /// stereo stops the sampler; a wrongly sized snapshot is only reported.
    pub fn copy_data(&self, data: &mut AudioData) -> EngineResult<()> {
        let ring = self.ring.lock();
        match ring.copy_into(&mut data.buffer, self.settings.channels) {
            Ok(()) => {
                self.shared.modified.store(false, Ordering::SeqCst);
                Ok(())
            }
            Err(e @ EngineError::InvalidChannels(_)) => {
                error!("Capture channel layout unsupported, stopping: {}", e);
                self.shared.stopped.store(true, Ordering::SeqCst);
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Stop the capture thread and wait for it to release the device
    ///
    /// Safe to call more than once.
    pub fn stop(&mut self) {
        self.shared.stopped.store(true, Ordering::SeqCst);

        if let Some(handle) = self.capture_thread.take() {
            if handle.join().is_err() {
                error!("Capture thread panicked");
            }
            debug!("Sampler stopped");
        }
    }

    /// Whether capture has ended, by request or by failure
    pub fn stopped(&self) -> bool {
        self.shared.stopped.load(Ordering::SeqCst)
    }

    /// Whether a chunk arrived since the last [`Sampler::copy_data`]
    pub fn modified(&self) -> bool {
        self.shared.modified.load(Ordering::SeqCst)
    }

    pub fn updates_per_second(&self) -> u32 {
        self.shared.updates_per_second.load(Ordering::Relaxed)
    }

    pub fn settings(&self) -> &AudioSettings {
        &self.settings
    }
}

impl Drop for Sampler {
    fn drop(&mut self) {
        self.stop();
    }
}
