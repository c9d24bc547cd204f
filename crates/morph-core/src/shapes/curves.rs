//! Closed-form parametric curves.
//!
//! Each generator maps the normalised index `t` (plus time and the global
//! knobs) straight onto a point, with no iteration.

use std::f32::consts::{PI, TAU};

use glam::Vec2;

use crate::math::{fract, rotate2};
use crate::shapes::ShapeInput;

/// Golden angle in radians.
const GOLDEN_ANGLE: f32 = 2.399_963;

/// Archimedean spiral. `complexity` sets the number of turns (6 per unit).
pub fn shape_spiral(input: &ShapeInput) -> Vec2 {
    let t = input.t();
    let angle = t * input.complexity * 12.0 * PI + input.time * 0.5;
    let radius = t * input.growth * 120.0 * (1.0 + (input.time * 2.0).sin() * 0.3);
    Vec2::new(angle.cos(), angle.sin()) * radius
}

/// Rose curve `r = cos(k θ)` with `k = floor(2 + complexity * 2)` petals.
pub fn shape_rose(input: &ShapeInput) -> Vec2 {
    let t = input.t();
    let k = (2.0 + input.complexity * 2.0).floor();
    let theta = t * TAU + input.time * 0.3;
    // three nested copies fill the petals
    let layer = (input.index % 3) as f32;
    let pulse = 0.85 + 0.15 * (input.time * 1.5).sin();
    let r = (k * theta).cos() * 150.0 * input.growth * pulse * (1.0 - layer * 0.18);
    Vec2::new(theta.cos(), theta.sin()) * r
}

/// Beating heart curve, filled with concentric copies.
pub fn shape_heart(input: &ShapeInput) -> Vec2 {
    let theta = input.t() * TAU;
    let s = theta.sin();
    let x = 16.0 * s * s * s;
    let y = 13.0 * theta.cos()
        - 5.0 * (2.0 * theta).cos()
        - 2.0 * (3.0 * theta).cos()
        - (4.0 * theta).cos();

    let layers = ((1.0 + input.complexity * 2.0).floor() as u32).max(1);
    let layer = input.index % layers;
    let fill = 1.0 - layer as f32 / layers as f32 * 0.6;
    let beat = 1.0 + 0.1 * (input.time * 3.0).sin().powi(2);

    Vec2::new(x, y) * 8.0 * input.growth * beat * fill
}

/// Sunflower (Vogel) spiral: one seed per particle at the golden angle.
pub fn shape_fibonacci(input: &ShapeInput) -> Vec2 {
    let t = input.t();
    // fract keeps the angle small so large indices stay precise
    let angle = fract(input.index as f32 * (GOLDEN_ANGLE / TAU)) * TAU + input.time * 0.2;
    let ripple = 1.0 + 0.1 * (t * input.complexity * 20.0 + input.time * 2.0).sin();
    let radius = t.sqrt() * 200.0 * input.growth * ripple;
    Vec2::new(angle.cos(), angle.sin()) * radius
}

/// Lissajous figure with frequency ratio `a : a + 1`.
pub fn shape_lissajous(input: &ShapeInput) -> Vec2 {
    let theta = input.t() * TAU;
    let a = 3.0 + (input.complexity * 2.0).floor();
    let b = a + 1.0;
    let delta = input.time * 0.5;
    Vec2::new(
        (a * theta + delta).sin() * 180.0,
        (b * theta).sin() * 140.0,
    ) * input.growth
}

/// Star outline with `floor(5 + complexity * 2)` points and a breathing core.
pub fn shape_star(input: &ShapeInput) -> Vec2 {
    let points = (5.0 + input.complexity * 2.0).floor().max(3.0);
    let vertices = points * 2.0;
    let u = input.t() * vertices;
    let k = u.floor();
    let f = u - k;

    let outer = 160.0 * input.growth;
    let inner = 65.0 * input.growth * (1.0 + 0.2 * (input.time * 2.0).sin());
    let vertex = |k: f32| {
        let r = if (k as u32) % 2 == 0 { outer } else { inner };
        let a = k / vertices * TAU + PI * 0.5;
        Vec2::new(a.cos(), a.sin()) * r
    };

    let p = vertex(k).lerp(vertex(k + 1.0), f);
    rotate2(p, input.time * 0.3)
}

/// Superformula (Johan Gielis) with time-varying exponents.
pub fn shape_superformula(input: &ShapeInput) -> Vec2 {
    let theta = input.t() * TAU;
    let time = input.time;
    let m = (3.0 + input.complexity * 3.0).floor();
    let n1 = 0.6 + 0.3 * (time * 0.4).sin();
    let n2 = 1.7 + 0.7 * (time * 0.17).sin();
    let n3 = 1.7 + 0.7 * (time * 0.11).cos();
    let (x, y) = superformula(theta, m, n1, n2, n3);
    Vec2::new(x, y) * 110.0 * input.growth
}

/// Returns a 2D point on the superformula curve, with the radius capped at 2.5.
pub fn superformula(theta: f32, m: f32, n1: f32, n2: f32, n3: f32) -> (f32, f32) {
    let a = (m * theta / 4.0).cos().abs().powf(n2);
    let b = (m * theta / 4.0).sin().abs().powf(n3);
    let sum = (a + b).max(1e-6);
    let r = sum.powf(-1.0 / n1.max(0.1)).min(2.5);
    (r * theta.cos(), r * theta.sin())
}

/// Hypotrochoid (spirograph) with `k - 1` loops; closes over one turn.
pub fn shape_hypotrochoid(input: &ShapeInput) -> Vec2 {
    let k = (3.0 + input.complexity * 2.0).floor();
    let big_r = 1.0_f32;
    let r = big_r / k;
    let d = r * (1.8 + 0.6 * (input.time * 0.7).sin());
    let theta = input.t() * TAU;
    let ratio = (big_r - r) / r;

    let p = Vec2::new(
        (big_r - r) * theta.cos() + d * (ratio * theta).cos(),
        (big_r - r) * theta.sin() - d * (ratio * theta).sin(),
    );
    rotate2(p, input.time * 0.2) * 150.0 * input.growth
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spiral_origin_at_index_zero() {
        let p = shape_spiral(&ShapeInput::new(0, 100, 3.0, 1.0, 1.0));
        assert!(p.length() < 1e-6, "spiral should start at the origin: {:?}", p);
    }

    #[test]
    fn test_superformula_at_zero() {
        // cos(0)=1, sin(0)=0 -> r = 1 for n1 = 1
        let (x, y) = superformula(0.0, 6.0, 1.0, 1.0, 1.0);
        assert!((x - 1.0).abs() < 1e-4, "superformula(0) x should be ~1.0: {}", x);
        assert!(y.abs() < 1e-4, "superformula(0) y should be ~0.0: {}", y);
    }

    #[test]
    fn test_star_outer_vertex() {
        // index 0 sits on the first outer vertex, straight up at time 0
        let p = shape_star(&ShapeInput::new(0, 1000, 0.0, 1.0, 1.0));
        assert!((p - Vec2::new(0.0, 160.0)).length() < 1e-3, "got {:?}", p);
    }

    #[test]
    fn test_fibonacci_radius_grows_with_index() {
        let near = shape_fibonacci(&ShapeInput::new(10, 1000, 0.0, 1.0, 1.0)).length();
        let far = shape_fibonacci(&ShapeInput::new(900, 1000, 0.0, 1.0, 1.0)).length();
        assert!(far > near, "outer seeds should be further out: {} vs {}", near, far);
    }
}
