//! Redraw pacing and frame-rate statistics for the harness loop.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Frame times averaged for the FPS readout.
const SAMPLES: usize = 60;

/// Longest gap counted as a frame; anything longer is a stall, not a frame.
const MAX_FRAME_TIME: f32 = 0.25;

#[derive(Clone, Debug)]
pub struct FrameClock {
    /// `None` redraws as fast as the event loop allows.
    interval: Option<Duration>,
    next_frame: Instant,
    last_frame: Option<Instant>,
    frame_times: VecDeque<f32>,
}

impl FrameClock {
    /// A clock aiming for `target_fps` redraws per second.  Zero, negative
    /// or non-finite targets leave the frame rate uncapped.
    pub fn new(target_fps: f32, now: Instant) -> Self {
        let interval = (target_fps.is_finite() && target_fps > 0.0)
            .then(|| Duration::try_from_secs_f64(1.0 / f64::from(target_fps)).ok())
            .flatten();
        Self {
            interval,
            next_frame: now,
            last_frame: None,
            frame_times: VecDeque::with_capacity(SAMPLES),
        }
    }

    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// When the next redraw is due.
    pub fn next_frame(&self) -> Instant {
        self.next_frame
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_frame
    }

    /// Record a frame drawn at `now` and schedule the next one.
    pub fn frame(&mut self, now: Instant) {
        if let Some(prev) = self.last_frame {
            let elapsed = now.saturating_duration_since(prev).as_secs_f32();
            if self.frame_times.len() >= SAMPLES {
                self.frame_times.pop_front();
            }
            self.frame_times.push_back(elapsed.min(MAX_FRAME_TIME));
        }
        self.last_frame = Some(now);
        self.next_frame = match self.interval {
            Some(interval) => now + interval,
            None => now,
        };
    }

    /// Average frames per second over the last `SAMPLES` frames, or 0 before
    /// two frames have been drawn.
    pub fn fps(&self) -> f32 {
        if self.frame_times.is_empty() {
            return 0.0;
        }
        let avg = self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32;
        if avg > 0.0 { 1.0 / avg } else { 0.0 }
    }
}
