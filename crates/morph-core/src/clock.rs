//! Wall-clock frame timing for native hosts.
//!
//! Browser hosts feed `time`/`dt` from `requestAnimationFrame` instead and
//! never construct a [`Clock`].

use std::time::{Duration, Instant};

/// Longest delta handed to the step; longer stalls (debugger, suspended
/// tab) are clipped so particles do not jump across the screen.
pub const MAX_DELTA: f32 = 0.1;

/// Elapsed/delta time tracking with pause, time scale and fixed delta.
#[derive(Debug)]
pub struct Clock {
    start: Instant,
    last_frame: Instant,
    elapsed_secs: f32,
    delta_secs: f32,
    frame_count: u64,
    paused: bool,
    pause_elapsed: Duration,
    fixed_delta: Option<f32>,
    time_scale: f32,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            paused: false,
            pause_elapsed: Duration::ZERO,
            fixed_delta: None,
            time_scale: 1.0,
        }
    }

    /// Advance to now. Call once per frame.
    ///
    /// Returns `(elapsed_time, delta_time)` in seconds.
    pub fn update(&mut self) -> (f32, f32) {
        let now = Instant::now();

        if self.paused {
            self.delta_secs = 0.0;
            return (self.elapsed_secs, self.delta_secs);
        }

        let raw_delta = now.duration_since(self.last_frame).as_secs_f32();
        self.delta_secs = (self.fixed_delta.unwrap_or(raw_delta) * self.time_scale).min(MAX_DELTA);
        self.last_frame = now;

        let raw_elapsed = now.duration_since(self.start).saturating_sub(self.pause_elapsed);
        self.elapsed_secs = raw_elapsed.as_secs_f32() * self.time_scale;

        self.frame_count += 1;
        (self.elapsed_secs, self.delta_secs)
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Instantaneous frames per second from the last delta.
    pub fn fps(&self) -> f32 {
        if self.delta_secs > 0.0 {
            1.0 / self.delta_secs
        } else {
            0.0
        }
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// While paused, `delta()` is 0 and `elapsed()` stops.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        if self.paused {
            let now = Instant::now();
            self.pause_elapsed += now.duration_since(self.last_frame);
            self.last_frame = now;
            self.paused = false;
        }
    }

    /// Use a fixed delta instead of measured frame time. `None` restores
    /// real timing.
    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        self.fixed_delta = delta;
    }

    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_delta() {
        let mut clock = Clock::new();
        clock.set_fixed_delta(Some(1.0 / 120.0));
        let (_, dt) = clock.update();
        assert!((dt - 1.0 / 120.0).abs() < 1e-7);
        assert_eq!(clock.frame(), 1);
    }

    #[test]
    fn test_paused_delta_is_zero() {
        let mut clock = Clock::new();
        clock.pause();
        let (_, dt) = clock.update();
        assert_eq!(dt, 0.0);
        assert_eq!(clock.frame(), 0);
    }

    #[test]
    fn test_delta_is_clipped() {
        let mut clock = Clock::new();
        clock.set_fixed_delta(Some(5.0));
        let (_, dt) = clock.update();
        assert_eq!(dt, MAX_DELTA);
    }
}
