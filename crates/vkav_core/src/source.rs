//! Capture Device Boundary
//!
//! [`CaptureSource`] is the blocking read the capture thread performs once
//! per chunk. [`CpalSource`] implements it over a cpal input stream:
//!
//! ```text
//! cpal callback ──► rtrb::Producer ──► rtrb::Consumer ──► read_chunk()
//!      │  (unpark)                                          (park)
//!      └─ error callback ──► crossbeam_channel ──► ReadFailed
//! ```
//!
//! The stream is created on the thread that will read from it, so a
//! platform stream that is not `Send` never crosses threads.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Stream, StreamConfig};
use crossbeam_channel::{Receiver, TryRecvError};
use rtrb::{Consumer, RingBuffer};
use tracing::{debug, info, warn};

use crate::config::AudioSettings;
use crate::discovery::discover_default_source;
use crate::error::{EngineError, EngineResult};

/// Chunks of headroom between the device callback and the capture thread
const RING_CHUNKS: usize = 8;

/// Wake interval while waiting for samples; the callback also unparks the reader
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// A blocking source of interleaved f32 samples
pub trait CaptureSource {
    /// Fill `chunk` completely, blocking until enough samples arrived
    fn read_chunk(&mut self, chunk: &mut [f32]) -> EngineResult<()>;
}

/// Capture source backed by a cpal input stream
pub struct CpalSource {
    // Held for its lifetime: dropping the stream stops the callback
    _stream: Stream,
    consumer: Consumer<f32>,
    errors: Receiver<String>,
    dropped: Arc<AtomicUsize>,
    device_name: String,
}

impl CpalSource {
    /// Open the configured device, or the discovered default when none is named
    ///
    /// Must be called on the thread that will call [`CaptureSource::read_chunk`].
    pub fn open(settings: &AudioSettings) -> EngineResult<Self> {
        let name = if settings.uses_default_device() {
            discover_default_source()?
        } else {
            settings.device.clone()
        };

        let device = find_input_device(&name)?;
        info!(
            "Opening capture device '{}' ({} ch @ {} Hz, {} frames/chunk)",
            name, settings.channels, settings.sample_rate, settings.chunk_size
        );

        let config = StreamConfig {
            channels: settings.channels,
            sample_rate: cpal::SampleRate(settings.sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        let (mut producer, consumer) =
            RingBuffer::<f32>::new(settings.chunk_samples() * RING_CHUNKS);
        let (err_sender, errors) = crossbeam_channel::bounded::<String>(8);
        let dropped = Arc::new(AtomicUsize::new(0));

        let reader = thread::current();
        let err_reader = reader.clone();
        let callback_dropped = Arc::clone(&dropped);

        let stream = device
            .build_input_stream(
                &config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    // Real-time audio callback - NO allocations allowed here
                    let n = data.len().min(producer.slots());
                    let written = producer
                        .write_chunk_uninit(n)
                        .map_or(0, |chunk| chunk.fill_from_iter(data.iter().copied()));

                    if written < data.len() {
                        callback_dropped.fetch_add(data.len() - written, Ordering::Relaxed);
                    }
                    reader.unpark();
                },
                move |err| {
                    let _ = err_sender.try_send(err.to_string());
                    err_reader.unpark();
                },
                None,
            )
            .map_err(|e| EngineError::StreamBuildError(e.to_string()))?;

        stream
            .play()
            .map_err(|e| EngineError::StreamPlayError(e.to_string()))?;

        Ok(Self {
            _stream: stream,
            consumer,
            errors,
            dropped,
            device_name: name,
        })
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    fn report_dropped(&self) {
        let dropped = self.dropped.swap(0, Ordering::Relaxed);
        if dropped > 0 {
            warn!(
                "Capture fell behind '{}': {} samples dropped",
                self.device_name, dropped
            );
        }
    }
}

impl CaptureSource for CpalSource {
    fn read_chunk(&mut self, chunk: &mut [f32]) -> EngineResult<()> {
        wait_for_samples(&self.consumer, &self.errors, chunk.len())?;

        let read = self
            .consumer
            .read_chunk(chunk.len())
            .map_err(|e| EngineError::ReadFailed(e.to_string()))?;
        let (first, second) = read.as_slices();
        chunk[..first.len()].copy_from_slice(first);
        chunk[first.len()..].copy_from_slice(second);
        read.commit_all();

        self.report_dropped();
        Ok(())
    }
}

/// Park until `needed` samples are buffered
///
/// There is no deadline: a device that goes quiet keeps the reader parked.
/// Only a reported stream error or a closed stream fails the wait.
fn wait_for_samples(
    consumer: &Consumer<f32>,
    errors: &Receiver<String>,
    needed: usize,
) -> EngineResult<()> {
    loop {
        match errors.try_recv() {
            Ok(err) => return Err(EngineError::ReadFailed(err)),
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                return Err(EngineError::ReadFailed(
                    "stream error channel closed".to_string(),
                ))
            }
        }

        if consumer.slots() >= needed {
            return Ok(());
        }
        if consumer.is_abandoned() {
            return Err(EngineError::ReadFailed("capture stream closed".to_string()));
        }

        thread::park_timeout(POLL_INTERVAL);
    }
}

/// Find an input device by its human-readable name
fn find_input_device(name: &str) -> EngineResult<Device> {
    let host = cpal::default_host();
    let devices = host
        .input_devices()
        .map_err(|e| EngineError::DeviceNotFound(format!("{name}: {e}")))?;

    for device in devices {
        match device.name() {
            Ok(candidate) if candidate == name => return Ok(device),
            Ok(_) => {}
            Err(e) => debug!("Skipping input device without a name: {}", e),
        }
    }

    Err(EngineError::DeviceNotFound(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_device_is_not_found() {
        // Either the host cannot list inputs or no device has this name
        let result = find_input_device("vkav test device that does not exist");
        assert!(matches!(result, Err(EngineError::DeviceNotFound(_))));
    }

    #[test]
    fn test_quiet_device_keeps_waiting() {
        let (mut producer, consumer) = RingBuffer::<f32>::new(64);
        let (_err_sender, errors) = crossbeam_channel::bounded::<String>(8);

        let writer = thread::spawn(move || {
            // A suspended source can stay silent for seconds
            thread::sleep(Duration::from_millis(2500));
            for n in 0..16 {
                producer.push(n as f32).unwrap();
            }
            producer
        });

        assert!(wait_for_samples(&consumer, &errors, 16).is_ok());
        assert_eq!(consumer.slots(), 16);
        drop(writer.join().unwrap());
    }

    #[test]
    fn test_stream_error_fails_wait() {
        let (_producer, consumer) = RingBuffer::<f32>::new(64);
        let (err_sender, errors) = crossbeam_channel::bounded::<String>(8);
        err_sender.send("device unplugged".to_string()).unwrap();

        let result = wait_for_samples(&consumer, &errors, 16);
        assert!(matches!(result, Err(EngineError::ReadFailed(msg)) if msg == "device unplugged"));
    }

    #[test]
    fn test_closed_stream_fails_wait() {
        let (producer, consumer) = RingBuffer::<f32>::new(64);
        let (_err_sender, errors) = crossbeam_channel::bounded::<String>(8);
        drop(producer);

        let result = wait_for_samples(&consumer, &errors, 16);
        assert!(matches!(result, Err(EngineError::ReadFailed(_))));
    }

    // Hardware-dependent tests
    #[test]
    #[ignore = "requires a capture device"]
    fn test_read_from_default_device() {
        let settings = AudioSettings::default();
        let mut source = CpalSource::open(&settings).unwrap();
        let mut chunk = vec![0.0f32; settings.chunk_samples()];

        for _ in 0..4 {
            source.read_chunk(&mut chunk).unwrap();
        }
        assert!(chunk.iter().all(|s| s.is_finite()));
    }
}
