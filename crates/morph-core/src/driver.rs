use std::time::Instant;

use log::{debug, error, info, warn};

use crate::clock::Clock;
use crate::compositor::Framebuffer;
use crate::config::{CompositorConfig, MorphParams, MAX_PARTICLES, MIN_PARTICLES};
use crate::error::{MorphError, Result};
use crate::particle::{Particle, ParticleStore};
use crate::stats::{FrameStats, StepStats};
use crate::step::simulate;
use crate::uniforms::Uniforms;

/// Owns the particle store and runs frames.
///
/// Parameter edits are plain field writes that take effect at the next
/// frame's snapshot. Holding `&mut self` for the whole of a frame is what
/// keeps a step from seeing a half-applied edit.
pub struct FrameDriver {
    store: ParticleStore,
    params: MorphParams,
    compositor: CompositorConfig,
    framebuffer: Option<Framebuffer>,
    /// Created on the first [`FrameDriver::tick`]; browser hosts drive
    /// [`FrameDriver::frame_at`] directly and never touch it.
    clock: Option<Clock>,
    stats: FrameStats,
    last_uniforms: Option<Uniforms>,
}

impl FrameDriver {
    pub fn new(params: MorphParams) -> Result<Self> {
        ensure_nonzero(params.particle_count)?;
        let params = checked(params);
        let store = ParticleStore::new(params.particle_count)?;
        Ok(Self::from_store(store, params))
    }

    /// Like [`FrameDriver::new`] with a fixed store seed.
    pub fn with_seed(params: MorphParams, seed: u64) -> Result<Self> {
        ensure_nonzero(params.particle_count)?;
        let params = checked(params);
        let store = ParticleStore::with_seed(params.particle_count, seed)?;
        Ok(Self::from_store(store, params))
    }

    fn from_store(store: ParticleStore, params: MorphParams) -> Self {
        info!(
            "frame driver ready: {} particles, shape {}",
            store.len(),
            params.shape
        );
        Self {
            store,
            params,
            compositor: CompositorConfig::default(),
            framebuffer: None,
            clock: None,
            stats: FrameStats::new(),
            last_uniforms: None,
        }
    }

    pub fn params(&self) -> &MorphParams {
        &self.params
    }

    /// Replace the parameters; applied at the next frame.
    ///
    /// A changed `particle_count` is recorded but does not resize the store;
    /// call [`FrameDriver::reconfigure`] for that. While a framebuffer is
    /// attached its size wins over `screen_size`.
    pub fn set_params(&mut self, params: MorphParams) {
        let mut params = checked(params);
        if let Some(framebuffer) = &self.framebuffer {
            if params.screen_size != framebuffer.size() {
                debug!(
                    "screen size {:?} ignored; pinned to framebuffer {}x{}",
                    params.screen_size,
                    framebuffer.width(),
                    framebuffer.height()
                );
                params.screen_size = framebuffer.size();
            }
        }
        if params.particle_count != self.store.len() {
            debug!(
                "particle_count {} differs from store length {}; waiting for reconfigure",
                params.particle_count,
                self.store.len()
            );
        }
        self.params = params;
    }

    /// Mutate the parameters in place, clamping afterwards.
    pub fn update_params(&mut self, edit: impl FnOnce(&mut MorphParams)) {
        let mut params = self.params;
        edit(&mut params);
        self.set_params(params);
    }

    pub fn compositor_config(&self) -> &CompositorConfig {
        &self.compositor
    }

    pub fn set_compositor_config(&mut self, config: CompositorConfig) {
        self.compositor = config;
    }

    /// Stop the world and rebuild the store with `count` particles.
    ///
    /// Runs between frames only. A count of zero is rejected and the current
    /// store is kept; counts outside the supported range are accepted with a
    /// warning.
    pub fn reconfigure(&mut self, count: usize) -> Result<()> {
        ensure_nonzero(count)?;
        warn_unsupported_count(count);
        self.store.reconfigure(count)?;
        self.params.particle_count = count;
        self.last_uniforms = None;
        Ok(())
    }

    /// Attach a framebuffer of the given size; frames composite into it from
    /// now on. The screen size used for projection follows the framebuffer.
    pub fn enable_framebuffer(&mut self, width: u32, height: u32) -> Result<()> {
        let framebuffer = Framebuffer::new(width, height)?;
        self.params.screen_size = framebuffer.size();
        debug!("framebuffer attached: {}x{}", width, height);
        self.framebuffer = Some(framebuffer);
        Ok(())
    }

    pub fn disable_framebuffer(&mut self) {
        self.framebuffer = None;
    }

    /// Run one frame at an explicit time: snapshot, step every particle,
    /// then composite if a framebuffer is attached.
    ///
    /// Returns the uniforms the frame used.
    pub fn frame_at(&mut self, time: f32, delta_time: f32) -> Uniforms {
        let uniforms = Uniforms::snapshot(&self.params, time, delta_time, self.store.len());
        simulate(self.store.as_mut_slice(), &uniforms);
        self.composite();
        self.last_uniforms = Some(uniforms);
        uniforms
    }

    /// Redraw the current particles without stepping.
    pub fn composite(&mut self) {
        let Some(framebuffer) = self.framebuffer.as_mut() else {
            return;
        };
        if self.compositor.clear_each_frame {
            framebuffer.clear(self.compositor.background);
        }
        framebuffer.composite(self.store.as_slice(), &self.compositor);
    }

    /// Run one frame from the wall clock, timing each pass.
    pub fn tick(&mut self) -> StepStats {
        let clock = self.clock.get_or_insert_with(Clock::new);
        let (time, delta_time) = clock.update();
        let interval_ms = delta_time * 1000.0;

        let start = Instant::now();
        let uniforms = Uniforms::snapshot(&self.params, time, delta_time, self.store.len());
        simulate(self.store.as_mut_slice(), &uniforms);
        let simulate_ms = start.elapsed().as_secs_f32() * 1000.0;

        let start = Instant::now();
        self.composite();
        let composite_ms = if self.framebuffer.is_some() {
            start.elapsed().as_secs_f32() * 1000.0
        } else {
            0.0
        };

        self.last_uniforms = Some(uniforms);
        let step = StepStats {
            simulate_ms,
            composite_ms,
            interval_ms,
            particle_count: uniforms.particle_count,
        };
        self.stats.record(step);
        step
    }

    /// Fold externally measured timings into the stats, for hosts that
    /// call [`FrameDriver::frame_at`] with their own clock.
    pub fn record_timing(&mut self, step: StepStats) {
        self.stats.record(step);
    }

    pub fn clock_mut(&mut self) -> &mut Clock {
        self.clock.get_or_insert_with(Clock::new)
    }

    pub fn particles(&self) -> &[Particle] {
        self.store.as_slice()
    }

    pub fn store(&self) -> &ParticleStore {
        &self.store
    }

    pub fn framebuffer(&self) -> Option<&Framebuffer> {
        self.framebuffer.as_ref()
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Uniforms of the most recent frame, if any ran in this epoch.
    pub fn last_uniforms(&self) -> Option<&Uniforms> {
        self.last_uniforms.as_ref()
    }
}

fn ensure_nonzero(count: usize) -> Result<()> {
    if count == 0 {
        error!("particle store rejected: particle count must be at least 1");
        return Err(MorphError::InvalidParticleCount(count));
    }
    Ok(())
}

fn warn_unsupported_count(count: usize) {
    if !(MIN_PARTICLES..=MAX_PARTICLES).contains(&count) {
        warn!(
            "particle count {} outside supported range {}..={}",
            count, MIN_PARTICLES, MAX_PARTICLES
        );
    }
}

fn checked(params: MorphParams) -> MorphParams {
    warn_unsupported_count(params.particle_count);
    let clamped = params.clamped();
    if clamped != params {
        warn!("parameters clamped to supported ranges: {:?}", clamped);
    }
    clamped
}
