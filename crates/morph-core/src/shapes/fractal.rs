//! Iterative shapes: escape-time fractals, the chaos-game triangle, the
//! dragon curve and a strange attractor.
//!
//! Every loop is bounded by `floor(base + complexity * scale)` so the cost per
//! particle stays fixed regardless of where the particle lands.

use std::f32::consts::TAU;

use glam::Vec2;

use crate::math::rotate2;
use crate::shapes::ShapeInput;

const ESCAPE_RADIUS_SQ: f32 = 4.0;
const MAX_ESCAPE_ITER: u32 = 20;

/// Grid-cell coordinate of a particle, mapped to `[-1, 1]^2`.
fn grid_uv(input: &ShapeInput) -> Vec2 {
    let side = input.grid_side();
    let gx = input.index % side;
    let gy = input.index / side;
    let denom = (side.max(2) - 1) as f32;
    Vec2::new(gx as f32 / denom, gy as f32 / denom) * 2.0 - Vec2::ONE
}

/// Iterate `z -> z^2 + c` until `|z|^2 > 4`; returns the iteration reached.
fn escape_time(mut z: Vec2, c: Vec2, max_iter: u32) -> u32 {
    for i in 0..max_iter {
        if z.length_squared() > ESCAPE_RADIUS_SQ {
            return i;
        }
        z = Vec2::new(z.x * z.x - z.y * z.y + c.x, 2.0 * z.x * z.y + c.y);
    }
    max_iter
}

/// Sierpinski triangle via the chaos game, reading the index in base 3.
///
/// Each base-3 digit of the index picks the corner to halve toward, so
/// particle `i` always lands on the same sub-triangle.
pub fn shape_sierpinski(input: &ShapeInput) -> Vec2 {
    const CORNERS: [Vec2; 3] = [
        Vec2::new(0.0, 1.0),
        Vec2::new(-0.866_025_4, -0.5),
        Vec2::new(0.866_025_4, -0.5),
    ];
    let iterations = input.iterations(6.0, 2.0, 1, 12);

    let mut digits = input.index;
    let mut p = Vec2::ZERO;
    for _ in 0..iterations {
        p = (p + CORNERS[(digits % 3) as usize]) * 0.5;
        digits /= 3;
    }

    let breathe = 1.0 + 0.05 * (input.time * 2.0).sin();
    rotate2(p, input.time * 0.1) * 180.0 * input.growth * breathe
}

/// Mandelbrot set by escape time over a grid of `c` values.
///
/// Bounded points keep their `c` position; escaping points are pulled toward
/// the origin in proportion to how fast they escaped.
pub fn shape_mandelbrot(input: &ShapeInput) -> Vec2 {
    let max_iter = input.iterations(10.0, 3.4, 1, MAX_ESCAPE_ITER);
    let zoom = 1.0 + 0.2 * (input.time * 0.3).sin();
    let uv = grid_uv(input);
    let c = Vec2::new(uv.x * 1.5 - 0.7, uv.y * 1.3) / zoom;

    let n = escape_time(Vec2::ZERO, c, max_iter);
    let depth = n as f32 / max_iter as f32;

    let p = (c + Vec2::new(0.7, 0.0)) * (0.35 + 0.65 * depth);
    rotate2(p, (input.time * 0.2).sin() * 0.1) * 140.0 * input.growth
}

/// Julia set for an animated `c`, sampled on a grid of starting points.
pub fn shape_julia(input: &ShapeInput) -> Vec2 {
    let max_iter = input.iterations(8.0, 4.0, 1, MAX_ESCAPE_ITER);
    let c = Vec2::new(
        -0.7 + 0.2 * (input.time * 0.3).cos(),
        0.27 + 0.1 * (input.time * 0.4).sin(),
    );
    let z0 = grid_uv(input) * 1.6;

    let n = escape_time(z0, c, max_iter);
    let depth = (n as f32 / max_iter as f32).sqrt();

    z0 * (0.25 + 0.75 * depth) * 120.0 * input.growth
}

/// Heighway dragon curve with `floor(4 + complexity)` folds (4..=7).
///
/// Turn `k` (1-based) goes right when the bit above the lowest set bit of
/// `k` is set, left otherwise.
pub fn shape_dragon(input: &ShapeInput) -> Vec2 {
    const DIRS: [Vec2; 4] = [
        Vec2::new(1.0, 0.0),
        Vec2::new(0.0, 1.0),
        Vec2::new(-1.0, 0.0),
        Vec2::new(0.0, -1.0),
    ];
    let folds = input.iterations(4.0, 1.0, 4, 7);
    let segments = 1u32 << folds;

    let u = input.t() * segments as f32;
    let seg = (u.floor() as u32).min(segments - 1);
    let f = u - seg as f32;

    let mut p = Vec2::ZERO;
    let mut dir = 0usize;
    let mut here = Vec2::ZERO;
    let mut here_dir = 0usize;
    for k in 0..segments {
        if k == seg {
            here = p;
            here_dir = dir;
        }
        p += DIRS[dir];
        let turn = k + 1;
        if ((turn & turn.wrapping_neg()) << 1) & turn != 0 {
            dir = (dir + 3) % 4;
        } else {
            dir = (dir + 1) % 4;
        }
    }
    let end = p;

    let local = here + DIRS[here_dir] * f - end * 0.5;
    let scale = 220.0 * input.growth / (segments as f32).sqrt();
    rotate2(local, input.time * 0.15) * scale
}

/// Clifford attractor reached by a short iteration from a `t`-derived seed.
pub fn shape_attractor(input: &ShapeInput) -> Vec2 {
    let t = input.t();
    let a = -1.4 + 0.1 * (input.time * 0.1).sin();
    let b = 1.6 + 0.1 * (input.time * 0.13).cos();
    let c = 1.0_f32;
    let d = 0.7_f32;
    let iterations = input.iterations(6.0, 4.0, 1, 18);

    let mut p = Vec2::new((t * TAU * 7.0).sin(), (t * TAU * 3.0).cos());
    for _ in 0..iterations {
        p = Vec2::new(
            (a * p.y).sin() + c * (a * p.x).cos(),
            (b * p.x).sin() + d * (b * p.y).cos(),
        );
    }
    p * 90.0 * input.growth
}
