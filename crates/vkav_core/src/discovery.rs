//! Default Capture Device Discovery
//!
//! A one-shot synchronous bridge over an asynchronous lookup. The caller
//! hands a typed [`DiscoveryContext`] to a transient worker thread, which
//! owns its own host connection and resolves a single-slot channel exactly
//! once. The caller blocks on that slot, then joins the worker on every
//! exit path so no connection or thread outlives the call.
//!
//! ```text
//! caller ──spawn──► worker: connect → query default → send(name)
//!   │                                                   │
//!   └──────────── recv() ◄──── bounded(1) slot ◄────────┘
//!   └──────────── join() ◄──── worker exits
//! ```

use std::thread;

use cpal::traits::{DeviceTrait, HostTrait};
use crossbeam_channel::bounded;
use tracing::{debug, error, info};

use crate::error::{EngineError, EngineResult};

/// State handed to a discovery worker
#[derive(Debug, Clone)]
pub struct DiscoveryContext {
    /// Name the worker announces itself with, used for its thread name
    pub client_name: String,
}

impl Default for DiscoveryContext {
    fn default() -> Self {
        Self {
            client_name: "vkav".to_string(),
        }
    }
}

/// Resolve the capture device for "whatever the system is playing"
///
/// Picks the monitor of the default output device. Hosts that expose no
/// monitor fall back to the default input device.
pub fn discover_default_source() -> EngineResult<String> {
    discover_with(DiscoveryContext::default(), |_ctx| {
        let host = cpal::default_host();

        let sink = host.default_output_device().and_then(|d| d.name().ok());
        let inputs: Vec<String> = host
            .input_devices()
            .map(|devices| devices.filter_map(|d| d.name().ok()).collect())
            .unwrap_or_default();

        if let Some(monitor) = sink.as_deref().and_then(|sink| select_monitor(sink, &inputs)) {
            return Ok(monitor);
        }

        info!(
            "No monitor for default output {:?}, using default input",
            sink.as_deref().unwrap_or("<none>")
        );
        let device = host
            .default_input_device()
            .ok_or(EngineError::NoDefaultDevice)?;
        device
            .name()
            .map_err(|e| EngineError::DiscoveryFailed(e.to_string()))
    })
}

/// Find the input that monitors `sink` among the input device names
///
/// PulseAudio style `<sink>.monitor` names win over "Monitor of <sink>"
/// descriptions.
pub fn select_monitor(sink: &str, inputs: &[String]) -> Option<String> {
    let candidates = [format!("{sink}.monitor"), format!("Monitor of {sink}")];
    candidates
        .into_iter()
        .find(|candidate| inputs.iter().any(|name| name == candidate))
}

/// Run `resolver` on a transient worker and wait for its single answer
///
/// A worker that panics or exits without answering yields
/// [`EngineError::DiscoveryFailed`].
pub fn discover_with<F>(context: DiscoveryContext, resolver: F) -> EngineResult<String>
where
    F: FnOnce(&DiscoveryContext) -> EngineResult<String> + Send + 'static,
{
    let (slot, answer) = bounded::<EngineResult<String>>(1);
    let thread_name = format!("{}-discovery", context.client_name);

    let worker = thread::Builder::new()
        .name(thread_name)
        .spawn(move || {
            let result = resolver(&context);
            // Receiver outlives the worker; a failed send only means the caller is gone
            let _ = slot.send(result);
        })
        .map_err(|e| EngineError::ThreadSpawn(e.to_string()))?;

    let received = answer.recv();

    if worker.join().is_err() {
        error!("Discovery worker panicked");
    }

    match received {
        Ok(Ok(name)) => {
            debug!("Discovered default capture device '{}'", name);
            Ok(name)
        }
        Ok(Err(e)) => Err(e),
        Err(_) => Err(EngineError::DiscoveryFailed(
            "discovery worker exited without an answer".to_string(),
        )),
    }
}
