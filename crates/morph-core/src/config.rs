use glam::Vec2;

use crate::shapes::ShapeId;

pub const MIN_PARTICLES: usize = 500;
pub const MAX_PARTICLES: usize = 90_000;
pub const GROWTH_RANGE: (f32, f32) = (0.1, 5.0);
pub const COMPLEXITY_RANGE: (f32, f32) = (0.1, 3.0);
pub const MORPH_SPEED_RANGE: (f32, f32) = (0.1, 5.0);
pub const ROTATION_SPEED_RANGE: (f32, f32) = (0.0, 10.0);

/// Parameters edited by the presentation layer between frames.
///
/// The driver snapshots these into [`crate::uniforms::Uniforms`] once per
/// frame, so edits never land half-way through a step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MorphParams {
    pub particle_count: usize,
    /// Raw shape id. Ids outside `0..=22` evaluate as the spiral.
    pub shape: u32,
    pub growth_factor: f32,
    pub complexity: f32,
    pub morph_speed: f32,
    pub rotation_speed: f32,
    pub screen_size: Vec2,
}

impl Default for MorphParams {
    fn default() -> Self {
        Self {
            particle_count: 5000,
            shape: ShapeId::Spiral as u32,
            growth_factor: 1.0,
            complexity: 1.0,
            morph_speed: 1.0,
            rotation_speed: 1.0,
            screen_size: Vec2::new(1280.0, 720.0),
        }
    }
}

impl MorphParams {
    /// Clamp the float fields into their supported ranges.
    ///
    /// Non-finite values fall back to the default. The shape id is left
    /// alone; unknown ids degrade to the spiral at evaluation time. The
    /// particle count is passed through untouched: zero is rejected when a
    /// store is built, and counts outside `MIN_PARTICLES..=MAX_PARTICLES`
    /// are unsupported but still run.
    pub fn clamped(&self) -> Self {
        let d = Self::default();
        let screen_size = if self.screen_size.is_finite() {
            self.screen_size.max(Vec2::ONE)
        } else {
            d.screen_size
        };
        Self {
            particle_count: self.particle_count,
            shape: self.shape,
            growth_factor: clamp_or(self.growth_factor, GROWTH_RANGE, d.growth_factor),
            complexity: clamp_or(self.complexity, COMPLEXITY_RANGE, d.complexity),
            morph_speed: clamp_or(self.morph_speed, MORPH_SPEED_RANGE, d.morph_speed),
            rotation_speed: clamp_or(self.rotation_speed, ROTATION_SPEED_RANGE, d.rotation_speed),
            screen_size,
        }
    }
}

#[inline]
fn clamp_or(v: f32, (lo, hi): (f32, f32), fallback: f32) -> f32 {
    if v.is_finite() {
        v.clamp(lo, hi)
    } else {
        fallback
    }
}

/// Render-side settings for the software compositor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompositorConfig {
    /// Positions are divided by `screen_size * zoom` to reach NDC.
    pub zoom: f32,
    pub min_sprite_size: f32,
    /// Clamp shaded channels to `[0, 1]` before blending.
    pub clamp_color: bool,
    /// Fill with `background` before each frame. When off, sprites
    /// accumulate onto the previous frame.
    pub clear_each_frame: bool,
    pub background: [f32; 4],
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            zoom: 0.4,
            min_sprite_size: 1.0,
            clamp_color: true,
            clear_each_frame: true,
            background: [0.0, 0.0, 0.0, 1.0],
        }
    }
}
