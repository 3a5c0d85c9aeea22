//! Capture loop: samples a live video source at a fixed rate, JPEG-encodes
//! each sample and dispatches it to the detector fire-and-forget, then
//! correlates asynchronous results back into an accumulating session.
//!
//! Best-effort and lossy on purpose: a tick with no frame available is
//! skipped silently (not queued, not retried), dispatch is never awaited and
//! carries no backpressure, so a slow detector produces fewer results rather
//! than delay. Results are appended in arrival order; if the detector
//! reorders or drops responses, arrival order may not equal capture order.
//! Accepted, not corrected.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::{interval, Interval, MissedTickBehavior};

use crate::error::Error;
use crate::landmark::FrameLandmarks;
use crate::protocol::{DetectorReply, FramePacket};

/// Fixed sampling period: 15 samples per second.
pub const SAMPLE_INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / 15);

/// Default JPEG quality for dispatched frames.
pub const DEFAULT_JPEG_QUALITY: u8 = 80;

/// A raw RGB24 frame grabbed from a live source.
#[derive(Debug, Clone)]
pub struct RgbFrame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// A live visual source. `grab` returns the current frame if one is
/// available right now; `None` means this sampling tick has nothing to do.
pub trait VideoSource {
    fn grab(&mut self) -> Option<RgbFrame>;
    fn resolution(&self) -> (u32, u32);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Capturing,
}

pub struct CaptureSession<S: VideoSource> {
    source: Option<S>,
    sampler: Option<Interval>,
    collected: Vec<FrameLandmarks>,
    state: CaptureState,
    frames_tx: UnboundedSender<FramePacket>,
    jpeg_quality: u8,
    sampled: u64,
    skipped: u64,
    errors: u64,
}

impl<S: VideoSource> CaptureSession<S> {
    pub fn new(frames_tx: UnboundedSender<FramePacket>, jpeg_quality: u8) -> Self {
        Self {
            source: None,
            sampler: None,
            collected: Vec::new(),
            state: CaptureState::Idle,
            frames_tx,
            jpeg_quality,
            sampled: 0,
            skipped: 0,
            errors: 0,
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn is_capturing(&self) -> bool {
        self.state == CaptureState::Capturing
    }

    pub fn collected_len(&self) -> usize {
        self.collected.len()
    }

    /// (sampled, skipped, per-frame errors) counters for status output.
    pub fn stats(&self) -> (u64, u64, u64) {
        (self.sampled, self.skipped, self.errors)
    }

    /// Resolution of the held source; `None` while no source is acquired.
    pub fn resolution(&self) -> Option<(u32, u32)> {
        self.source.as_ref().map(|s| s.resolution())
    }

    /// Acquire the source and begin sampling. On acquisition failure the
    /// session stays `Idle` with no source held. `collected` is reset here
    /// and only here.
    pub fn start<F>(&mut self, acquire: F) -> Result<(), Error>
    where
        F: FnOnce() -> Result<S, Error>,
    {
        if self.is_capturing() {
            return Ok(());
        }

        let source = acquire()?;

        self.collected.clear();
        self.sampled = 0;
        self.skipped = 0;
        self.errors = 0;
        self.source = Some(source);

        let mut sampler = interval(SAMPLE_INTERVAL);
        sampler.set_missed_tick_behavior(MissedTickBehavior::Skip);
        self.sampler = Some(sampler);
        self.state = CaptureState::Capturing;
        Ok(())
    }

    /// One sampling tick. Grabs the current frame if available, encodes it
    /// and dispatches it without awaiting. Silent no-op when not capturing,
    /// when no frame is available, or when the channel is gone (counted for
    /// status, never fatal).
    pub fn sample(&mut self) {
        if !self.is_capturing() {
            return;
        }
        let Some(source) = self.source.as_mut() else {
            return;
        };
        let Some(frame) = source.grab() else {
            self.skipped += 1;
            return;
        };

        match encode_jpeg(&frame, self.jpeg_quality) {
            Ok(jpeg_data) => {
                let packet = FramePacket {
                    timestamp_us: now_us(),
                    width: frame.width,
                    height: frame.height,
                    jpeg_data,
                };
                if self.frames_tx.send(packet).is_err() {
                    self.errors += 1;
                } else {
                    self.sampled += 1;
                }
            }
            Err(e) => {
                self.errors += 1;
                eprintln!("[capture] jpeg encode failed: {e}");
            }
        }
    }

    /// Handle one asynchronous detector result. Appended in arrival order
    /// while capturing; a per-frame detector error is counted and skipped
    /// without halting the sampler. Results arriving after `stop()` are
    /// dropped.
    pub fn on_result(&mut self, reply: DetectorReply) {
        if !self.is_capturing() {
            return;
        }
        if let Some(message) = reply.error {
            self.errors += 1;
            eprintln!("[capture] detector error: {message}");
            return;
        }
        if let Some(landmarks) = reply.landmarks {
            self.collected.push(landmarks);
        }
    }

    /// Cancel the sampler, release the source and return the collected
    /// results (`None` when empty). Safe no-op while `Idle`.
    pub fn stop(&mut self) -> Option<Vec<FrameLandmarks>> {
        self.sampler = None;
        self.source = None;
        self.state = CaptureState::Idle;
        if self.collected.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.collected))
        }
    }

    /// Wait for the next sampling tick. Pending forever while idle; drivers
    /// guard this branch with `is_capturing()`.
    pub async fn next_sample(&mut self) {
        match self.sampler.as_mut() {
            Some(sampler) => {
                sampler.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

fn now_us() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros() as u64)
        .unwrap_or(0)
}

/// Encode an RGB24 frame as JPEG.
pub fn encode_jpeg(frame: &RgbFrame, quality: u8) -> Result<Vec<u8>, Error> {
    let mut buf = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    encoder
        .encode(&frame.data, frame.width, frame.height, ExtendedColorType::Rgb8)
        .map_err(|e| Error::Transport(e.to_string()))?;
    Ok(buf)
}
