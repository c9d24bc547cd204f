//! The per-frame simulation step.
//!
//! Every particle is updated from its own previous state and the frame's
//! [`Uniforms`] only, so the whole store can be updated in any order or all
//! at once.

use glam::Vec2;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::math::{rotate2, wrap_phase};
use crate::palette::particle_color;
use crate::particle::Particle;
use crate::shapes::{target_for, ShapeId, ShapeInput};
use crate::uniforms::Uniforms;

/// Smallest batch handed to a worker; mirrors a 32-wide compute group.
pub const DISPATCH_GROUP: usize = 32;

/// Global target spin in radians per second per unit of rotation speed.
const ROTATION_RATE: f32 = 0.1;

/// Sprite diameter before the velocity and oscillation terms.
#[inline]
pub fn base_size(growth_factor: f32) -> f32 {
    2.0 + growth_factor * 1.5
}

/// Target of particle `index` for this frame: the active shape, spun about
/// the origin by `time * rotation_speed * 0.1`.
pub fn target_position(index: u32, uniforms: &Uniforms) -> Vec2 {
    let input = ShapeInput::new(
        index,
        uniforms.particle_count,
        uniforms.time,
        uniforms.complexity,
        uniforms.growth_factor,
    );
    let target = target_for(ShapeId::from_raw(uniforms.shape_mode), &input);
    let spin = uniforms.time * uniforms.rotation_speed * ROTATION_RATE;
    if spin == 0.0 {
        target
    } else {
        rotate2(target, spin)
    }
}

/// Two layered sine/cosine jitter fields, in units per second.
#[inline]
fn organic_noise(pos: Vec2, time: f32) -> Vec2 {
    let coarse = Vec2::new(
        (pos.x * 0.02 + time * 1.2).sin() * (pos.y * 0.02 + time * 1.5).cos(),
        (pos.y * 0.02 + time * 1.2).sin() * (pos.x * 0.02 + time * 1.5).cos(),
    ) * 3.0;
    let fine = Vec2::new(
        (pos.y * 0.01 + time * 2.0).cos() * (pos.x * 0.01 - time * 1.6).sin(),
        (pos.x * 0.01 - time * 2.0).cos() * (pos.y * 0.01 + time * 1.6).sin(),
    ) * 2.0;
    coarse + fine
}

/// Update one particle in place.
///
/// 1. evaluate the shape target
/// 2. steer toward it at `morph_speed * 100 * dt`, snapping when closer
/// 3. advance the position
/// 4. add the organic jitter, scaled by `dt`
/// 5. recolour from the shape's palette
/// 6. resize from speed and an oscillation
/// 7. advance `life`, wrapped into `[0, 2π)`
pub fn update_particle(p: &mut Particle, index: u32, uniforms: &Uniforms) {
    let dt = uniforms.delta_time;
    let time = uniforms.time;

    let target = target_position(index, uniforms);

    let direction = target - p.position;
    let distance = direction.length();
    let move_speed = uniforms.morph_speed * 100.0 * dt;
    p.velocity = if distance > move_speed {
        direction / distance * move_speed
    } else {
        direction
    };
    p.position += p.velocity;

    p.position += organic_noise(p.position, time) * dt;

    let t = index as f32 / uniforms.particle_count.max(1) as f32;
    let shape = ShapeId::from_raw(uniforms.shape_mode);
    p.color = particle_color(shape, t, time);

    let size = base_size(uniforms.growth_factor)
        + 0.3 * p.velocity.length()
        + 0.8 * (time * 5.0 + t * 12.0).sin();
    p.size = size.max(1.0);

    p.life = wrap_phase(p.life + dt * 2.0);
}

/// Run the step over the whole store.
///
/// `particles.len()` should equal `uniforms.particle_count`; the count in
/// the uniforms is what normalises indices.
pub fn simulate(particles: &mut [Particle], uniforms: &Uniforms) {
    simulate_range(particles, 0, uniforms);
}

/// Run the step over a contiguous slice whose first element is particle
/// `first_index` of the full store.
pub fn simulate_range(particles: &mut [Particle], first_index: u32, uniforms: &Uniforms) {
    #[cfg(feature = "parallel")]
    particles
        .par_iter_mut()
        .enumerate()
        .with_min_len(DISPATCH_GROUP)
        .for_each(|(i, p)| update_particle(p, first_index + i as u32, uniforms));

    #[cfg(not(feature = "parallel"))]
    for (i, p) in particles.iter_mut().enumerate() {
        update_particle(p, first_index + i as u32, uniforms);
    }
}
