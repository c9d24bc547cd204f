//! Structural shapes built from integer decompositions of the raw index.
//!
//! These split `index` into sub-ids (strand, arm, cluster, grid cell, layer,
//! node, edge) with modulo and division, then place each sub-structure
//! analytically. The decomposition is what gives each shape its identity.

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use crate::math::{fract, project, rotate2, rotate_xy};
use crate::shapes::ShapeInput;

/// Double helix seen side-on, with base-pair rungs.
///
/// Of every 10 particles, 8 alternate between the two strands and 2 sit on
/// the rung joining them.
pub fn shape_dna(input: &ShapeInput) -> Vec2 {
    let t = input.t();
    let g = input.growth;
    let turns = 2.0 + input.complexity * 2.0;
    let theta = t * TAU * turns + input.time * 2.0;
    let y = (t - 0.5) * 440.0 * g;
    let width = 70.0 * g;

    let slot = input.index % 10;
    if slot < 8 {
        let strand = (slot % 2) as f32;
        let x = (theta + strand * PI).sin() * width;
        Vec2::new(x, y)
    } else {
        let a = theta.sin() * width;
        let b = (theta + PI).sin() * width;
        let along = ((input.index / 10) % 8) as f32 / 7.0;
        Vec2::new(a + (b - a) * along, y)
    }
}

/// Barred spiral galaxy with `floor(2 + complexity * 2)` arms.
///
/// `index % arms` picks the arm; every ninth particle falls into the bulge.
/// Inner stars orbit faster than outer ones.
pub fn shape_galaxy(input: &ShapeInput) -> Vec2 {
    let t = input.t();
    let arms = ((2.0 + input.complexity * 2.0).floor() as u32).max(1);
    let arm = input.index % arms;
    let r_norm = t.powf(0.7);

    let spread = ((input.index / arms) % 7) as f32 / 6.0 - 0.5;
    let mut angle = arm as f32 * TAU / arms as f32
        + r_norm * 3.5
        + spread * 0.35 * (1.0 - r_norm * 0.5);
    angle -= input.time * 0.3 * (1.0 - 0.5 * r_norm);

    let mut r = r_norm * 220.0 * input.growth;
    if input.index % 9 == 0 {
        r *= 0.25;
    }
    Vec2::new(angle.cos(), angle.sin()) * r
}

/// Cubic crystal lattice rotated about two axes and projected.
///
/// The raw index is split into `(x, y, z)` cell coordinates of a cube with
/// side `ceil(cbrt(total))`.
pub fn shape_crystal(input: &ShapeInput) -> Vec2 {
    let mut side = ((input.total as f32).cbrt().floor() as u32).max(1);
    while (side as u64).pow(3) < input.total as u64 {
        side += 1;
    }
    let gx = input.index % side;
    let gy = (input.index / side) % side;
    let gz = input.index / (side * side);

    let half = (side as f32 - 1.0) * 0.5;
    let norm = (side as f32 * 0.5).max(1.0);
    let cell = Vec3::new(gx as f32 - half, gy as f32 - half, gz as f32 - half) / norm;

    // higher complexity shears alternate layers into a twinned crystal
    let shear = (gz % 2) as f32 * 0.15 * input.complexity;
    let cell = cell + Vec3::new(shear, 0.0, 0.0);

    let pulse = 1.0 + 0.05 * (input.time * 2.0 + (gx + gy + gz) as f32).sin();
    let p = cell * 150.0 * input.growth * pulse;

    let p = rotate_xy(p, input.time * 0.3, input.time * 0.2);
    project(p, 0.002)
}

/// Sun with planets on Kepler-like orbits, each carrying a moon.
///
/// `index % (planets + 1)` is the cluster id (0 is the sun). Inside a planet
/// cluster, `(index / (planets + 1)) % 16` is the node id: nodes 0..12 form
/// the planet body, 12..16 its moon.
pub fn shape_orbital(input: &ShapeInput) -> Vec2 {
    let g = input.growth;
    let planets = ((3.0 + input.complexity * 2.0).floor() as u32).max(1);
    let clusters = planets + 1;
    let cluster = input.index % clusters;
    let member = input.index / clusters;

    if cluster == 0 {
        let u = fract(member as f32 * 0.618_034);
        let a = fract(member as f32 * 0.381_966) * TAU + input.time * 0.5;
        return Vec2::new(a.cos(), a.sin()) * u.sqrt() * 25.0 * g;
    }

    let k = cluster as f32;
    let orbit_r = 40.0 + k * 28.0;
    let omega = 1.5 / (orbit_r / 40.0).powf(1.5);
    let orbit_a = input.time * omega + k * 2.1;
    let center = Vec2::new(orbit_a.cos(), orbit_a.sin()) * orbit_r * g;

    let node = member % 16;
    if node < 12 {
        let ring = (node % 4 + 1) as f32 / 4.0;
        let a = (node / 4) as f32 * TAU / 3.0 + ring * 1.7 + input.time;
        center + Vec2::new(a.cos(), a.sin()) * ring * 6.0 * g
    } else {
        let a = input.time * 4.0 + k + (node - 12) as f32 * 0.05;
        center + Vec2::new(a.cos(), a.sin()) * 14.0 * g
    }
}

/// Grid displaced by an interference of travelling sine fields.
pub fn shape_plasma(input: &ShapeInput) -> Vec2 {
    let side = input.grid_side();
    let denom = (side.max(2) - 1) as f32;
    let u = (input.index % side) as f32 / denom * 2.0 - 1.0;
    let v = (input.index / side) as f32 / denom * 2.0 - 1.0;
    let c = input.complexity;
    let time = input.time;

    let field = (u * 4.0 * c + time).sin()
        + (v * 3.0 * c - time * 1.3).sin()
        + ((u + v) * 3.0 + time * 0.7).sin()
        + ((u * u + v * v).sqrt() * 5.0 - time * 2.0).sin();

    let base = Vec2::new(u, v) * 200.0 * input.growth;
    base + Vec2::new(field.cos(), field.sin()) * 15.0 * input.growth
}

/// Whirlpool: the angular speed rises toward the centre.
pub fn shape_vortex(input: &ShapeInput) -> Vec2 {
    let t = input.t();
    let winds = 4.0 + input.complexity * 4.0;
    let angle = t * TAU * winds + input.time * 2.0 / (0.2 + t);
    let r = t.sqrt() * 220.0 * input.growth * (1.0 + 0.1 * (input.time * 3.0 + t * 20.0).sin());
    Vec2::new(angle.cos(), angle.sin() * 0.8) * r
}

/// `(2, q)` torus knot, `q` odd, rotated in 3D and projected.
pub fn shape_torus_knot(input: &ShapeInput) -> Vec2 {
    let q = 2.0 * (1.0 + input.complexity).floor() + 1.0;
    let p = 2.0_f32;
    let theta = input.t() * TAU;

    let r = (q * theta).cos() + 2.0;
    let tube = (input.index % 3) as f32 * 0.08;
    let pos = Vec3::new(
        r * (p * theta).cos(),
        r * (p * theta).sin(),
        -(q * theta).sin() + tube,
    ) * 60.0 * input.growth;

    let pos = rotate_xy(pos, input.time * 0.4, input.time * 0.25);
    project(pos, 0.003)
}

/// Feed-forward network: nodes in layers, signals travelling along edges.
///
/// One particle in four belongs to a node (`(index / 4) % nodes`), the rest
/// ride edges `(layer, from, to)` decoded from `(index / 4) % edges`.
pub fn shape_neural(input: &ShapeInput) -> Vec2 {
    let g = input.growth;
    let layers = ((3.0 + input.complexity).floor() as u32).max(2);
    let per_layer = ((5.0 + input.complexity).floor() as u32).max(2);
    let nodes = layers * per_layer;
    let edges = (layers - 1) * per_layer * per_layer;

    let node_pos = |layer: u32, node: u32| {
        Vec2::new(
            (layer as f32 / (layers - 1) as f32 - 0.5) * 400.0 * g,
            (node as f32 / (per_layer - 1) as f32 - 0.5) * 260.0 * g,
        )
    };

    let slot = input.index / 4;
    if input.index % 4 == 0 {
        let id = slot % nodes;
        let ring = slot / nodes;
        let center = node_pos(id / per_layer, id % per_layer);
        let a = fract(ring as f32 * 0.381_966) * TAU + input.time;
        let pulse = 1.0 + 0.3 * (input.time * 4.0 + id as f32).sin();
        center + Vec2::new(a.cos(), a.sin()) * 8.0 * g * pulse
    } else {
        let edge = slot % edges;
        let layer = edge / (per_layer * per_layer);
        let from = (edge / per_layer) % per_layer;
        let to = edge % per_layer;
        let lane = slot / edges + input.index % 4;
        let s = fract(lane as f32 * 0.137 + input.time * 0.4 + edge as f32 * 0.071);
        node_pos(layer, from).lerp(node_pos(layer + 1, to), s)
    }
}

/// Kaleidoscope: a pattern in one wedge, mirrored across `2 * floor(3 + 2c)`
/// sectors chosen by `index % sectors`.
pub fn shape_kaleidoscope(input: &ShapeInput) -> Vec2 {
    let t = input.t();
    let sectors = (2.0 * (3.0 + input.complexity * 2.0).floor()).max(2.0) as u32;
    let sector = input.index % sectors;
    let wedge = TAU / sectors as f32;

    let mut local = fract(t * 13.0) * wedge;
    if sector % 2 == 1 {
        local = wedge - local;
    }
    let radial = 0.2 + 0.8 * fract(t * 7.0);
    let pattern = 0.8 + 0.2 * (local * sectors as f32 + radial * 6.0 + input.time * 2.0).sin();

    let angle = sector as f32 * wedge + local + input.time * 0.2;
    Vec2::new(angle.cos(), angle.sin()) * radial * pattern * 200.0 * input.growth
}

/// Tilted accretion disk around a black hole, with a photon ring and the far
/// side of the disk lensed up over the shadow.
pub fn shape_black_hole(input: &ShapeInput) -> Vec2 {
    let g = input.growth;
    let r_in = 45.0 * g;
    let r_out = 210.0 * g;
    let member = input.index / 5;

    if input.index % 5 == 0 {
        let a = fract(member as f32 * 0.618_034) * TAU + input.time * 3.0;
        let r = r_in * 0.75;
        return Vec2::new(a.cos(), a.sin()) * r;
    }

    let u = fract(member as f32 * 0.754_877);
    let r = r_in + (r_out - r_in) * u * u;
    let omega = 2.0 / (r / r_in).powf(1.5);
    let a = fract(member as f32 * 0.569_840) * TAU + input.time * omega * (1.0 + input.complexity * 0.3);

    let mut p = Vec2::new(a.cos() * r, a.sin() * r * 0.3);
    if a.sin() > 0.0 {
        p.y += r_in * 1.2 * (-(r - r_in) / r_in).exp();
    }
    rotate2(p, -0.2)
}
