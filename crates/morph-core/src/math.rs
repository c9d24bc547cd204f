//! GLSL-style scalar helpers shared by the shape library, the simulation
//! step and the compositor.

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};

/// GLSL `fract`: always returns a value in `[0, 1)`, also for negative input.
#[inline]
pub fn fract(x: f32) -> f32 {
    let f = x - x.floor();
    // x - floor(x) can round up to 1.0 for tiny negative x
    if f >= 1.0 {
        0.0
    } else {
        f
    }
}

/// Smooth interpolation - port of GLSL smoothstep.
///
/// Equal edges degrade to a hard step instead of dividing by zero.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge0 == edge1 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Linear interpolation between `a` and `b`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Cubic ease used for shape cross-fades.
#[inline]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Rotate `p` counter-clockwise by `angle` radians.
#[inline]
pub fn rotate2(p: Vec2, angle: f32) -> Vec2 {
    let (s, c) = angle.sin_cos();
    Vec2::new(p.x * c - p.y * s, p.x * s + p.y * c)
}

/// Rotate about the X axis, then about the Y axis.
#[inline]
pub fn rotate_xy(p: Vec3, angle_x: f32, angle_y: f32) -> Vec3 {
    let (sx, cx) = angle_x.sin_cos();
    let p = Vec3::new(p.x, p.y * cx - p.z * sx, p.y * sx + p.z * cx);
    let (sy, cy) = angle_y.sin_cos();
    Vec3::new(p.x * cy + p.z * sy, p.y, -p.x * sy + p.z * cy)
}

/// Cheap perspective divide `1 / (1 + z * k)`, projecting onto the XY plane.
///
/// The denominator is kept away from zero so points behind the eye stay finite.
#[inline]
pub fn project(p: Vec3, k: f32) -> Vec2 {
    let w = (1.0 + p.z * k).max(0.1);
    Vec2::new(p.x, p.y) / w
}

/// Wrap an angle into `[0, 2π)`.
#[inline]
pub fn wrap_phase(x: f32) -> f32 {
    let w = x.rem_euclid(TAU);
    if w >= TAU || !w.is_finite() {
        0.0
    } else {
        w
    }
}

/// Standard six-sector HSV to RGB conversion.
///
/// `h` is taken modulo 1; `s` and `v` are clamped to `[0, 1]`.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> [f32; 3] {
    let h = fract(h) * 6.0;
    let s = s.clamp(0.0, 1.0);
    let v = v.clamp(0.0, 1.0);

    let sector = h.floor();
    let f = h - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    match sector as u32 {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}
