//! Software point-sprite compositor.
//!
//! Maps particles to screen-space sprites, shades each covered pixel with a
//! layered ring/spiral/sparkle pattern and blends the result source-over
//! onto whatever the framebuffer already holds.

use glam::Vec2;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::CompositorConfig;
use crate::error::{MorphError, Result};
use crate::math::smoothstep;
use crate::particle::Particle;

/// Rows per raster band. Bands are shaded independently.
const BAND_ROWS: usize = 16;

/// One draw call: a shaded disc centred at `center` (NDC, y up).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    pub center: Vec2,
    /// Diameter in pixels.
    pub diameter: f32,
    pub color: [f32; 4],
    pub phase: f32,
}

/// Normalised display coordinates of a simulation position.
///
/// A fixed fit factor, not fitted to the content bounds.
#[inline]
pub fn to_ndc(position: Vec2, screen_size: Vec2, zoom: f32) -> Vec2 {
    position / (screen_size * zoom)
}

/// Build the draw list for a frame, in particle order.
pub fn sprites(particles: &[Particle], screen_size: Vec2, config: &CompositorConfig) -> Vec<Sprite> {
    particles
        .iter()
        .map(|p| Sprite {
            center: to_ndc(p.position, screen_size, config.zoom),
            diameter: p.size.max(config.min_sprite_size),
            color: p.color,
            phase: p.life,
        })
        .collect()
}

/// Shade one pixel of a sprite.
///
/// `point_coord` is the pixel's position inside the sprite's bounding
/// square, in `[0, 1]^2` with the origin at the top-left. Returns `None`
/// outside the inscribed disc. The result is not clamped.
pub fn shade(point_coord: Vec2, color: [f32; 4], phase: f32) -> Option<[f32; 4]> {
    let uv = point_coord - Vec2::splat(0.5);
    // 0 at the centre, 1 on the inscribed circle
    let dist = uv.length() * 2.0;
    if dist > 1.0 {
        return None;
    }
    let angle = uv.y.atan2(uv.x);

    let core = core_band(dist);
    let ring1 = smoothstep(0.1, 0.2, dist) * (1.0 - smoothstep(0.3, 0.4, dist));
    let ring2 = smoothstep(0.3, 0.4, dist) * (1.0 - smoothstep(0.5, 0.6, dist));
    let glow = smoothstep(0.5, 0.6, dist) * (1.0 - smoothstep(0.6, 0.8, dist));

    let intensity = (core
        + sparkle(dist, angle, phase)
        + ring1 * spiral(angle, phase) * 0.7
        + ring2 * ripple(dist, phase) * 0.45
        + glow * 0.2)
        .max(0.0);

    let aberration = aberration(phase);

    Some([
        color[0] * intensity + aberration[0],
        color[1] * intensity + aberration[1],
        color[2] * intensity + aberration[2],
        color[3] * intensity.min(1.0),
    ])
}

#[inline]
fn core_band(dist: f32) -> f32 {
    1.0 - smoothstep(0.0, 0.2, dist)
}

/// Six-armed angular modulation of the inner ring, in `[0.4, 1]`.
#[inline]
fn spiral(angle: f32, phase: f32) -> f32 {
    0.4 + 0.6 * (0.5 + 0.5 * (angle * 6.0 + phase * 2.0).sin())
}

/// Radial ripple of the outer ring, in `[0.6, 1]`.
#[inline]
fn ripple(dist: f32, phase: f32) -> f32 {
    0.6 + 0.4 * (0.5 + 0.5 * (dist * 20.0 + phase).sin())
}

/// Sparkle contribution, confined to the core band.
#[inline]
fn sparkle(dist: f32, angle: f32, phase: f32) -> f32 {
    (dist * 30.0 + phase * 3.0).sin() * (angle * 8.0).cos() * 0.15 * core_band(dist)
}

/// Per-channel offset driven by the particle's phase, not a spatial shift.
#[inline]
fn aberration(phase: f32) -> [f32; 3] {
    [
        (phase * 2.0).sin() * 0.05,
        (phase * 2.0 + 2.094).sin() * 0.05,
        (phase * 2.0 + 4.189).sin() * 0.05,
    ]
}

/// Source-over blend (`srcAlpha`, `1 - srcAlpha`).
#[inline]
fn blend_over(dst: &mut [f32; 4], src: [f32; 4], clamp: bool) {
    let src = if clamp {
        src.map(|c| c.clamp(0.0, 1.0))
    } else {
        src
    };
    let a = src[3].clamp(0.0, 1.0);
    let inv = 1.0 - a;
    dst[0] = src[0] * a + dst[0] * inv;
    dst[1] = src[1] * a + dst[1] * inv;
    dst[2] = src[2] * a + dst[2] * inv;
    dst[3] = a + dst[3] * inv;
}

/// Pixel-space footprint of a sprite.
#[derive(Clone, Copy)]
struct Footprint {
    /// Top-left corner of the bounding square, in pixels.
    origin: Vec2,
    diameter: f32,
    x0: usize,
    x1: usize,
    y0: usize,
    y1: usize,
}

impl Footprint {
    fn of(sprite: &Sprite, width: usize, height: usize) -> Option<Self> {
        if !sprite.center.is_finite() || !sprite.diameter.is_finite() || sprite.diameter <= 0.0 {
            return None;
        }
        let center = Vec2::new(
            (sprite.center.x * 0.5 + 0.5) * width as f32,
            (0.5 - sprite.center.y * 0.5) * height as f32,
        );
        let radius = sprite.diameter * 0.5;
        let min = center - Vec2::splat(radius);
        let max = center + Vec2::splat(radius);
        if max.x <= 0.0 || max.y <= 0.0 || min.x >= width as f32 || min.y >= height as f32 {
            return None;
        }
        Some(Self {
            origin: min,
            diameter: sprite.diameter,
            x0: min.x.floor().max(0.0) as usize,
            x1: (max.x.ceil() as usize).min(width),
            y0: min.y.floor().max(0.0) as usize,
            y1: (max.y.ceil() as usize).min(height),
        })
    }

    #[inline]
    fn point_coord(&self, x: usize, y: usize) -> Vec2 {
        (Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - self.origin) / self.diameter
    }
}

#[derive(Clone, Copy)]
struct Draw {
    footprint: Footprint,
    color: [f32; 4],
    phase: f32,
}

/// Linear RGBA framebuffer that sprites are composited onto.
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<[f32; 4]>,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(MorphError::FramebufferSize { width, height });
        }
        let len = width as usize * height as usize;
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|_| MorphError::Allocation { count: len })?;
        pixels.resize(len, [0.0, 0.0, 0.0, 1.0]);
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    pub fn clear(&mut self, color: [f32; 4]) {
        self.pixels.fill(color);
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[f32; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y as usize * self.width as usize + x as usize).copied()
    }

    pub fn pixels(&self) -> &[[f32; 4]] {
        &self.pixels
    }

    /// Draw every particle, treating the framebuffer size as the screen size.
    pub fn composite(&mut self, particles: &[Particle], config: &CompositorConfig) {
        let draws = sprites(particles, self.size(), config);
        self.draw(&draws, config);
    }

    /// Rasterise a draw list in order.
    ///
    /// Sprites are binned into horizontal bands and bands are shaded
    /// concurrently; within a band sprites keep their submission order, so
    /// the result equals a sequential draw.
    pub fn draw(&mut self, draws: &[Sprite], config: &CompositorConfig) {
        let width = self.width as usize;
        let height = self.height as usize;
        let band_count = height.div_ceil(BAND_ROWS);

        let mut bands: Vec<Vec<Draw>> = vec![Vec::new(); band_count];
        for sprite in draws {
            let Some(footprint) = Footprint::of(sprite, width, height) else {
                continue;
            };
            let draw = Draw {
                footprint,
                color: sprite.color,
                phase: sprite.phase,
            };
            for band in (footprint.y0 / BAND_ROWS)..footprint.y1.div_ceil(BAND_ROWS) {
                bands[band].push(draw);
            }
        }

        let clamp = config.clamp_color;
        let shade_band = |(band, (rows, items)): (usize, (&mut [[f32; 4]], &Vec<Draw>))| {
            let row0 = band * BAND_ROWS;
            let rows_in_band = rows.len() / width;
            for draw in items {
                let fp = &draw.footprint;
                let y_end = fp.y1.min(row0 + rows_in_band);
                for y in fp.y0.max(row0)..y_end {
                    let row = &mut rows[(y - row0) * width..(y - row0 + 1) * width];
                    for (x, dst) in row.iter_mut().enumerate().take(fp.x1).skip(fp.x0) {
                        if let Some(src) = shade(fp.point_coord(x, y), draw.color, draw.phase) {
                            blend_over(dst, src, clamp);
                        }
                    }
                }
            }
        };

        #[cfg(feature = "parallel")]
        self.pixels
            .par_chunks_mut(width * BAND_ROWS)
            .zip(bands.par_iter())
            .enumerate()
            .for_each(shade_band);

        #[cfg(not(feature = "parallel"))]
        self.pixels
            .chunks_mut(width * BAND_ROWS)
            .zip(bands.iter())
            .enumerate()
            .for_each(shade_band);
    }

    /// 8-bit RGBA copy for display or upload.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        self.write_rgba8(&mut out);
        out
    }

    /// Write 8-bit RGBA into `out`, replacing its contents.
    pub fn write_rgba8(&self, out: &mut Vec<u8>) {
        out.clear();
        out.extend(
            self.pixels
                .iter()
                .flat_map(|px| px.map(|c| (c.clamp(0.0, 1.0) * 255.0 + 0.5) as u8)),
        );
    }

    /// Raw linear float pixels for upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}
