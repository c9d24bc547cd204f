/// Frame timing statistics from measured wall-clock times.
///
/// Keeps exponential moving averages of the simulate and composite passes
/// and of the interval between frames. Nothing here is synthesised: with no
/// samples recorded every figure reads zero.
#[derive(Clone, Debug, Default)]
pub struct FrameStats {
    simulate_ema_ms: f32,
    composite_ema_ms: f32,
    interval_ema_ms: f32,
    frames: u64,
    last: StepStats,
}

/// Timing of a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StepStats {
    /// Simulation step time in milliseconds.
    pub simulate_ms: f32,
    /// Composite pass time in milliseconds (0 when nothing was drawn).
    pub composite_ms: f32,
    /// Time since the previous frame in milliseconds.
    pub interval_ms: f32,
    pub particle_count: u32,
}

/// EMA weight of the newest sample.
const EMA_ALPHA: f32 = 0.3;

impl FrameStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one frame's measurements into the averages.
    pub fn record(&mut self, step: StepStats) {
        if self.frames == 0 {
            self.simulate_ema_ms = step.simulate_ms;
            self.composite_ema_ms = step.composite_ms;
            self.interval_ema_ms = step.interval_ms;
        } else {
            self.simulate_ema_ms = ema(self.simulate_ema_ms, step.simulate_ms);
            self.composite_ema_ms = ema(self.composite_ema_ms, step.composite_ms);
            if step.interval_ms > 0.0 {
                self.interval_ema_ms = ema(self.interval_ema_ms, step.interval_ms);
            }
        }
        self.frames += 1;
        self.last = step;
    }

    pub fn simulate_ms(&self) -> f32 {
        self.simulate_ema_ms
    }

    pub fn composite_ms(&self) -> f32 {
        self.composite_ema_ms
    }

    /// Frames per second implied by the averaged frame interval.
    pub fn fps(&self) -> f32 {
        if self.interval_ema_ms > 0.0 {
            1000.0 / self.interval_ema_ms
        } else {
            0.0
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn last(&self) -> StepStats {
        self.last
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[inline]
fn ema(prev: f32, sample: f32) -> f32 {
    prev * (1.0 - EMA_ALPHA) + sample * EMA_ALPHA
}
