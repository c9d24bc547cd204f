use glam::Vec2;

use crate::math::ease_in_out_cubic;
use crate::particle::Particle;
use crate::shapes::{target_for, ShapeId, ShapeInput};
use crate::uniforms::Uniforms;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Cross-fade between two shapes for the same particle.
///
/// `mix` is eased with a cubic in/out curve, so `0` is exactly `a` and `1`
/// is exactly `b`.
pub fn blend(a: ShapeId, b: ShapeId, mix: f32, input: &ShapeInput) -> Vec2 {
    let from = target_for(a, input);
    let to = target_for(b, input);
    from.lerp(to, ease_in_out_cubic(mix))
}

/// Blend pass: write the cross-faded target of every particle into its
/// `target_position` scratch field.
///
/// Shape `a` is `uniforms.shape_mode`. Positions, velocities and colours
/// are left untouched; this only prepares targets for a consumer that wants
/// them.
pub fn write_blend_targets(particles: &mut [Particle], uniforms: &Uniforms, b: ShapeId, mix: f32) {
    let a = ShapeId::from_raw(uniforms.shape_mode);
    let write = |(i, p): (usize, &mut Particle)| {
        let input = ShapeInput::new(
            i as u32,
            uniforms.particle_count,
            uniforms.time,
            uniforms.complexity,
            uniforms.growth_factor,
        );
        p.target_position = blend(a, b, mix, &input);
    };

    #[cfg(feature = "parallel")]
    particles.par_iter_mut().enumerate().for_each(write);

    #[cfg(not(feature = "parallel"))]
    particles.iter_mut().enumerate().for_each(write);
}
