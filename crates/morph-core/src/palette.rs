//! Per-shape colour palettes.
//!
//! Each shape has its own closed-form hue as a function of the normalised
//! index `t` and time. Saturation and brightness oscillate gently and are
//! shared by all palettes.

use std::f32::consts::TAU;

use crate::math::{fract, hsv_to_rgb};
use crate::shapes::ShapeId;

/// Hue in `[0, 1)` for a particle at normalised index `t`.
pub fn hue(shape: ShapeId, t: f32, time: f32) -> f32 {
    let h = match shape {
        // full rainbow sweep
        ShapeId::Spiral => t + time * 0.1,
        ShapeId::Rose => 0.9 + 0.1 * (t * TAU + time).sin(),
        // green to blue band
        ShapeId::Dna => 0.33 + 0.33 * t + 0.05 * time.sin(),
        ShapeId::Galaxy => 0.6 + 0.25 * t + 0.05 * (time * 0.5).sin(),
        ShapeId::Sierpinski => 0.08 + 0.1 * (t * TAU * 3.0 + time).sin(),
        ShapeId::Heart => 0.97 + 0.04 * (time * 3.0 + t * TAU).sin(),
        ShapeId::Mandelbrot => t * 3.0 + time * 0.2,
        ShapeId::Crystal => 0.5 + 0.1 * (t * TAU * 4.0 + time).sin(),
        ShapeId::Fibonacci => 0.15 + 0.15 * t + 0.05 * time.sin(),
        ShapeId::Dragon => 0.02 + 0.12 * t + 0.03 * (time * 2.0).sin(),
        ShapeId::Orbital => 0.1 + 0.5 * t + 0.02 * time.sin(),
        ShapeId::Lissajous => 0.75 + 0.2 * (t * TAU + time * 0.5).sin(),
        // full spectrum oscillation
        ShapeId::Plasma => t + (time * 2.0 + t * 10.0).sin() * 0.5 + time * 0.3,
        ShapeId::Vortex => 0.55 + 0.15 * (t * 20.0 - time * 2.0).sin(),
        ShapeId::Star => 0.12 + 0.05 * (time * 4.0 + t * TAU).sin(),
        ShapeId::Superformula => t * 2.0 + time * 0.15,
        ShapeId::Attractor => 0.7 + 0.3 * t + 0.05 * (time * 0.7).sin(),
        ShapeId::Hypotrochoid => t * 4.0 + time * 0.25,
        ShapeId::Julia => 0.8 + 0.3 * (t * TAU * 2.0 + time * 0.7).sin(),
        ShapeId::TorusKnot => 0.45 + 0.35 * t + 0.05 * (time * 1.3).sin(),
        // electric blue pulses
        ShapeId::Neural => 0.55 + 0.1 * (time * 5.0 + t * 40.0).sin(),
        ShapeId::Kaleidoscope => t * 6.0 + time * 0.4,
        // hot orange near the hole, cooling outward
        ShapeId::BlackHole => 0.05 + 0.08 * (1.0 - t) + 0.03 * time.sin(),
    };
    fract(h)
}

/// RGBA colour of particle `t` on `shape` at `time`.
///
/// Alpha is `0.7 + 0.3 * sin(time * 4 + t * 8)`.
pub fn particle_color(shape: ShapeId, t: f32, time: f32) -> [f32; 4] {
    let h = hue(shape, t, time);
    let saturation = 0.8 + 0.2 * (time * 2.0 + t * 6.0).sin();
    let brightness = 0.9 + 0.1 * (time * 3.0 + t * 10.0).sin();
    let [r, g, b] = hsv_to_rgb(h, saturation, brightness);
    let alpha = 0.7 + 0.3 * (time * 4.0 + t * 8.0).sin();
    [r, g, b, alpha]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_palettes_in_range() {
        for shape in ShapeId::ALL {
            for i in 0..64 {
                let t = i as f32 / 64.0;
                let h = hue(shape, t, i as f32 * 0.37);
                assert!((0.0..1.0).contains(&h), "{:?} hue {} out of range", shape, h);
                let c = particle_color(shape, t, i as f32 * 0.37);
                for ch in &c[..3] {
                    assert!((0.0..=1.0).contains(ch), "{:?} channel {} out of range", shape, ch);
                }
                assert!((0.399..=1.001).contains(&c[3]), "{:?} alpha {}", shape, c[3]);
            }
        }
    }

    #[test]
    fn test_spiral_sweeps_the_rainbow() {
        let a = hue(ShapeId::Spiral, 0.0, 0.0);
        let b = hue(ShapeId::Spiral, 0.5, 0.0);
        assert!((a - 0.0).abs() < 1e-6 && (b - 0.5).abs() < 1e-6);
    }
}
