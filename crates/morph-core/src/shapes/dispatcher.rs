//! Shape dispatcher.
//!
//! Selects one of 23 shapes by id and returns the target position for the
//! particle at `index` out of `total`.

use glam::Vec2;

use crate::shapes::curves::*;
use crate::shapes::fractal::*;
use crate::shapes::structures::*;
use crate::shapes::{ShapeId, ShapeInput};

/// Compute the target position for particle `index` on shape `id`.
///
/// * `id` -- raw shape id (0..=22); anything else evaluates as the spiral.
/// * `index`, `total` -- particle index and particle count. A zero count is
///   treated as one.
/// * `time` -- animation time in seconds.
/// * `complexity` -- detail knob (turns, petals, iteration bounds).
/// * `growth` -- overall scale.
///
/// Pure: the same arguments always give the same point.
pub fn shape(id: u32, index: u32, total: u32, time: f32, complexity: f32, growth: f32) -> Vec2 {
    let input = ShapeInput::new(index, total, time, complexity, growth);
    target_for(ShapeId::from_raw(id), &input)
}

/// Typed form of [`shape`].
pub fn target_for(id: ShapeId, input: &ShapeInput) -> Vec2 {
    match id {
        ShapeId::Spiral => shape_spiral(input),
        ShapeId::Rose => shape_rose(input),
        ShapeId::Dna => shape_dna(input),
        ShapeId::Galaxy => shape_galaxy(input),
        ShapeId::Sierpinski => shape_sierpinski(input),
        ShapeId::Heart => shape_heart(input),
        ShapeId::Mandelbrot => shape_mandelbrot(input),
        ShapeId::Crystal => shape_crystal(input),
        ShapeId::Fibonacci => shape_fibonacci(input),
        ShapeId::Dragon => shape_dragon(input),
        ShapeId::Orbital => shape_orbital(input),
        ShapeId::Lissajous => shape_lissajous(input),
        ShapeId::Plasma => shape_plasma(input),
        ShapeId::Vortex => shape_vortex(input),
        ShapeId::Star => shape_star(input),
        ShapeId::Superformula => shape_superformula(input),
        ShapeId::Attractor => shape_attractor(input),
        ShapeId::Hypotrochoid => shape_hypotrochoid(input),
        ShapeId::Julia => shape_julia(input),
        ShapeId::TorusKnot => shape_torus_knot(input),
        ShapeId::Neural => shape_neural(input),
        ShapeId::Kaleidoscope => shape_kaleidoscope(input),
        ShapeId::BlackHole => shape_black_hole(input),
    }
}
