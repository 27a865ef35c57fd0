//! Flipbook playback: frame timing math and the play/pause state machine.
//!
//! Elapsed time is always measured against a wall-clock anchor rather than
//! by counting refresh ticks, so a slow or irregular refresh cadence never
//! makes playback drift. Every derived field (frame index, progress, elapsed
//! seconds) comes out of [`FrameTiming::position`], whether the update came
//! from a timer tick or from a scrub.

use std::time::{Duration, Instant};

use crate::core::{RefreshTimer, SystemClock, TimeSource, DEFAULT_REFRESH_INTERVAL};
use crate::error::{PlayerError, PlayerResult};

/// Timing of a frame sequence played at a fixed rate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTiming {
    frame_count: usize,
    frame_duration_ms: f64,
    total_duration_ms: f64,
}

impl FrameTiming {
    /// Fails for a non-positive or non-finite frame rate, and for a rate so
    /// small that the durations overflow
    pub fn new(frame_count: usize, fps: f64) -> PlayerResult<Self> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(PlayerError::InvalidFrameRate(fps));
        }

        let frame_duration_ms = 1000.0 / fps;
        let total_duration_ms = frame_duration_ms * frame_count as f64;
        if !frame_duration_ms.is_finite() || !total_duration_ms.is_finite() {
            return Err(PlayerError::InvalidFrameRate(fps));
        }

        Ok(Self {
            frame_count,
            frame_duration_ms,
            total_duration_ms,
        })
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn frame_duration_ms(&self) -> f64 {
        self.frame_duration_ms
    }

    pub fn total_duration_ms(&self) -> f64 {
        self.total_duration_ms
    }

    pub fn total_seconds(&self) -> f64 {
        self.total_duration_ms / 1000.0
    }

    pub fn is_empty(&self) -> bool {
        self.frame_count == 0
    }

    /// Elapsed milliseconds for a progress percentage (clamped to 0..=100)
    pub fn elapsed_for_percent(&self, percent: f64) -> f64 {
        percent.clamp(0.0, 100.0) / 100.0 * self.total_duration_ms
    }

    /// Derive the full playback position from elapsed milliseconds
    ///
    /// Elapsed time is clamped to `[0, total]`. An empty sequence always
    /// maps to the zero position.
    pub fn position(&self, elapsed_ms: f64) -> PlaybackPosition {
        if self.is_empty() {
            return PlaybackPosition::default();
        }

        let elapsed_ms = elapsed_ms.clamp(0.0, self.total_duration_ms);
        let frame = (elapsed_ms / self.frame_duration_ms).floor() as usize;

        PlaybackPosition {
            frame_index: frame.min(self.frame_count - 1),
            progress_percent: elapsed_ms / self.total_duration_ms * 100.0,
            elapsed_seconds: elapsed_ms / 1000.0,
        }
    }
}

/// Where playback currently is
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlaybackPosition {
    pub frame_index: usize,
    pub progress_percent: f64,
    pub elapsed_seconds: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
}

/// Wall-clock reference for elapsed time: `elapsed = (now - instant) + offset`
#[derive(Debug, Clone, Copy)]
struct Anchor {
    instant: Instant,
    offset_ms: f64,
}

impl Anchor {
    fn elapsed_ms(&self, now: Instant) -> f64 {
        now.saturating_duration_since(self.instant).as_secs_f64() * 1000.0 + self.offset_ms
    }
}

/// Play/pause state machine for one frame sequence
///
/// Holding a [`RefreshTimer`] is what "playing" means: the timer is acquired
/// on [`start`](Self::start) and released on [`stop`](Self::stop), at the end
/// of the sequence, and when the playback is dropped.
#[derive(Debug)]
pub struct Playback<C: TimeSource = SystemClock> {
    clock: C,
    timing: FrameTiming,
    refresh_interval: Duration,
    position: PlaybackPosition,
    anchor: Option<Anchor>,
    timer: Option<RefreshTimer>,
}

impl Playback<SystemClock> {
    pub fn new(frame_count: usize, fps: f64) -> PlayerResult<Self> {
        Ok(Self::with_clock(FrameTiming::new(frame_count, fps)?, SystemClock))
    }
}

impl<C: TimeSource> Playback<C> {
    /// Stopped at frame 0
    pub fn with_clock(timing: FrameTiming, clock: C) -> Self {
        Self {
            clock,
            timing,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            position: PlaybackPosition::default(),
            anchor: None,
            timer: None,
        }
    }

    /// Change the refresh cadence; takes effect on the next start
    pub fn set_refresh_interval(&mut self, interval: Duration) -> PlayerResult<()> {
        if interval.is_zero() {
            return Err(PlayerError::InvalidRefreshInterval);
        }
        self.refresh_interval = interval;
        Ok(())
    }

    /// Cadence of the running timer, or the one the next start will use
    pub fn refresh_interval(&self) -> Duration {
        self.timer
            .as_ref()
            .map_or(self.refresh_interval, RefreshTimer::interval)
    }

    pub fn timing(&self) -> &FrameTiming {
        &self.timing
    }

    pub fn position(&self) -> PlaybackPosition {
        self.position
    }

    pub fn state(&self) -> PlaybackState {
        if self.timer.is_some() {
            PlaybackState::Playing
        } else {
            PlaybackState::Stopped
        }
    }

    pub fn is_playing(&self) -> bool {
        self.timer.is_some()
    }

    pub fn current_frame_index(&self) -> usize {
        self.position.frame_index
    }

    pub fn progress_percent(&self) -> f64 {
        self.position.progress_percent
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.position.elapsed_seconds
    }

    /// Begin a playback run anchored at the current instant
    pub fn start(&mut self) {
        if self.timing.is_empty() {
            log::debug!("start ignored: no frames");
            return;
        }

        let now = self.clock.now();
        self.anchor = Some(Anchor {
            instant: now,
            offset_ms: 0.0,
        });
        self.timer = Some(RefreshTimer::start(self.refresh_interval, now));
        log::debug!("playback started");
    }

    pub fn stop(&mut self) {
        if self.timer.take().is_some() {
            log::debug!("playback stopped at frame {}", self.position.frame_index);
        }
    }

    pub fn toggle(&mut self) {
        match self.state() {
            PlaybackState::Playing => self.stop(),
            PlaybackState::Stopped => self.start(),
        }
    }

    /// Recompute the position from the anchor; stops at the end of the sequence
    pub fn tick(&mut self) {
        if !self.is_playing() {
            return;
        }
        let Some(anchor) = self.anchor else {
            return;
        };

        let total = self.timing.total_duration_ms();
        let elapsed_ms = anchor.elapsed_ms(self.clock.now()).min(total);
        self.position = self.timing.position(elapsed_ms);

        if elapsed_ms >= total {
            log::debug!("end of sequence reached");
            self.stop();
        }
    }

    /// Run a tick if the refresh timer is due, returns whether it ran
    pub fn poll(&mut self) -> bool {
        let now = self.clock.now();
        let due = self.timer.as_mut().is_some_and(|timer| timer.poll(now));
        if due {
            self.tick();
        }
        due
    }

    /// Delay until the next refresh, `None` while stopped
    pub fn next_refresh(&self) -> Option<Duration> {
        let now = self.clock.now();
        self.timer.as_ref().map(|timer| timer.remaining(now))
    }

    /// Jump to a progress percentage without changing play/stop status
    pub fn scrub(&mut self, percent: f64) {
        if percent.is_nan() {
            log::warn!("scrub ignored: progress is NaN");
            return;
        }

        let target_ms = self.timing.elapsed_for_percent(percent);
        self.position = self.timing.position(target_ms);
        self.anchor = Some(Anchor {
            instant: self.clock.now(),
            offset_ms: target_ms,
        });
    }

    /// `"{elapsed}s / {total}s"` with two decimals each
    pub fn time_label(&self) -> String {
        format!(
            "{:.2}s / {:.2}s",
            self.position.elapsed_seconds,
            self.timing.total_seconds()
        )
    }
}

impl<C: TimeSource> Drop for Playback<C> {
    fn drop(&mut self) {
        self.stop();
    }
}
