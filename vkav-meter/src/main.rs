//! Vkav Meter
//!
//! Minimal render loop: ticks the capture pipeline at the configured frame
//! rate and logs loudness and capture rate about once a second. Runs until
//! capture stops.

use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use vkav_core::{Pipeline, VkavSettings};
use vkav_dsp::AudioData;

const REPORT_INTERVAL: Duration = Duration::from_secs(1);

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vkav=debug")),
        )
        .init();

    info!("Starting Vkav meter");

    let settings = VkavSettings::load();
    let frame = Duration::from_secs(1) / settings.frame_rate.max(1);

    let mut pipeline = Pipeline::new(settings.audio.clone(), settings.process)
        .context("Failed to start capture pipeline")?;

    if pipeline.stopped() {
        anyhow::bail!("Capture device could not be opened");
    }

    let mut last_report = Instant::now();
    while !pipeline.stopped() {
        let frame_start = Instant::now();

        pipeline.tick().context("Pipeline tick failed")?;

        if last_report.elapsed() >= REPORT_INTERVAL {
            report(pipeline.data(), pipeline.updates_per_second());
            last_report = Instant::now();
        }

        if let Some(rest) = frame.checked_sub(frame_start.elapsed()) {
            thread::sleep(rest);
        }
    }

    warn!("Capture stopped");
    pipeline.stop();
    Ok(())
}

fn report(data: &AudioData, updates_per_second: u32) {
    let peak_bin = data
        .left
        .iter()
        .zip(&data.right)
        .map(|(l, r)| l.max(*r))
        .enumerate()
        .fold((0, 0.0f32), |best, (i, v)| if v > best.1 { (i, v) } else { best })
        .0;

    info!(
        "L {:.4}  R {:.4}  peak bin {:>4}  {} chunks/s",
        data.left_loudness, data.right_loudness, peak_bin, updates_per_second
    );
}
