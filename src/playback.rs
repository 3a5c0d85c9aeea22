//! Playback state machine: drives repeated decode+render over a loaded
//! sequence at a timed cadence.
//!
//! The session owns its tick timer (`tokio::time::Interval`); cancelling a
//! pending tick is dropping the interval, which is synchronous within the
//! single-threaded scheduling domain, so no stale tick can fire after
//! `pause()`/`stop()`. Re-entrancy is guarded by the `Playing`-only check in
//! `tick()`; exactly one pending tick exists at a time.

use std::time::Duration;

use tokio::time::{interval, Interval, MissedTickBehavior};

use crate::error::Error;
use crate::landmark::codec;
use crate::render::{draw_frame, DrawPrimitives};
use crate::sequence::Sequence;

/// Base frame interval: sequences are recorded and replayed at 30 fps.
pub const BASE_FRAME_INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / 30);

/// Default speed multiplier.
pub const DEFAULT_SPEED: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// No sequence loaded.
    Idle,
    /// Sequence present, index fixed.
    Stopped,
    Playing,
    Paused,
}

/// Outcome of one playback tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// Frame at the given index was rendered and the index advanced.
    Rendered(usize),
    /// The last frame was rendered; the session auto-stopped.
    Finished,
    /// Stale tick while not playing; nothing happened.
    Skipped,
}

pub struct PlaybackSession<P: DrawPrimitives> {
    sequence: Option<Sequence>,
    index: usize,
    state: PlaybackState,
    speed: f64,
    timer: Option<Interval>,
    canvas: Option<P>,
}

impl<P: DrawPrimitives> PlaybackSession<P> {
    /// `canvas: None` models missing drawing primitives; any render attempt
    /// then fails with `Error::RenderUnavailable`.
    pub fn new(canvas: Option<P>) -> Self {
        Self {
            sequence: None,
            index: 0,
            state: PlaybackState::Idle,
            speed: DEFAULT_SPEED,
            timer: None,
            canvas,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn sequence(&self) -> Option<&Sequence> {
        self.sequence.as_ref()
    }

    pub fn canvas_mut(&mut self) -> Option<&mut P> {
        self.canvas.as_mut()
    }

    /// Load a sequence, replacing any prior one. Resets the index to 0 and
    /// renders frame 0 immediately. On render failure the session reverts to
    /// `Idle` with no sequence loaded.
    pub fn load(&mut self, sequence: Sequence) -> Result<(), Error> {
        if sequence.is_empty() {
            return Err(Error::Load("sequence contains no frames".to_string()));
        }

        self.timer = None;
        self.sequence = Some(sequence);
        self.index = 0;
        self.state = PlaybackState::Stopped;

        if let Err(e) = self.render(0) {
            self.sequence = None;
            self.state = PlaybackState::Idle;
            return Err(e);
        }
        Ok(())
    }

    /// Start or resume playback. No-op when nothing is loaded or already
    /// playing. Fails without a state change when drawing primitives are
    /// unavailable.
    pub fn play(&mut self) -> Result<(), Error> {
        match self.state {
            PlaybackState::Idle | PlaybackState::Playing => return Ok(()),
            PlaybackState::Stopped | PlaybackState::Paused => {}
        }
        if self.canvas.is_none() {
            return Err(Error::RenderUnavailable);
        }

        self.timer = Some(self.make_timer());
        self.state = PlaybackState::Playing;
        Ok(())
    }

    /// Pause playback, cancelling the pending tick. Index unchanged, no
    /// re-render. No-op unless playing.
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.timer = None;
            self.state = PlaybackState::Paused;
        }
    }

    /// Reset the index to 0 and cancel any pending tick, from any state.
    /// Re-renders frame 0 when a sequence is loaded.
    pub fn stop(&mut self) -> Result<(), Error> {
        self.timer = None;
        self.index = 0;
        if self.sequence.is_some() {
            self.state = PlaybackState::Stopped;
            self.render(0)?;
        } else {
            self.state = PlaybackState::Idle;
        }
        Ok(())
    }

    /// Set the speed multiplier. Non-positive or non-finite values are
    /// ignored. While playing, the timer is cancelled and re-created with the
    /// new period.
    pub fn set_speed(&mut self, speed: f64) {
        if !speed.is_finite() || speed <= 0.0 {
            return;
        }
        self.speed = speed;
        if self.state == PlaybackState::Playing {
            self.timer = None;
            self.timer = Some(self.make_timer());
        }
    }

    /// Execute one tick: render the current frame and advance. Reaching the
    /// end performs `stop()` semantics instead of looping. A render failure
    /// forces an implicit stop and surfaces the error.
    pub fn tick(&mut self) -> Result<TickEvent, Error> {
        if self.state != PlaybackState::Playing {
            return Ok(TickEvent::Skipped);
        }
        let len = match &self.sequence {
            Some(seq) => seq.len(),
            None => return Ok(TickEvent::Skipped),
        };

        let idx = self.index;
        if let Err(e) = self.render(idx) {
            self.timer = None;
            self.index = 0;
            self.state = PlaybackState::Stopped;
            // Best-effort reset to frame 0; the original error is what the
            // caller needs to see.
            let _ = self.render(0);
            return Err(e);
        }

        self.index += 1;
        if self.index >= len {
            self.stop()?;
            return Ok(TickEvent::Finished);
        }
        Ok(TickEvent::Rendered(idx))
    }

    /// Wait for the next scheduled tick. Pending forever when no timer is
    /// active; drivers guard this branch with `is_playing()`.
    pub async fn next_tick(&mut self) {
        match self.timer.as_mut() {
            Some(timer) => {
                timer.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }

    fn make_timer(&self) -> Interval {
        let period = Duration::from_secs_f64(BASE_FRAME_INTERVAL.as_secs_f64() / self.speed);
        let mut timer = interval(period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        timer
    }

    fn render(&mut self, index: usize) -> Result<(), Error> {
        let vector = match self.sequence.as_ref().and_then(|s| s.frame(index)) {
            Some(v) => v,
            None => return Ok(()),
        };
        let frame = codec::decode(vector)?;
        let canvas = self.canvas.as_mut().ok_or(Error::RenderUnavailable)?;
        draw_frame(canvas, &frame);
        Ok(())
    }
}
