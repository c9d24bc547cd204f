/// Shape generators.
///
/// Contains 8 parametric curves, 5 iterative fractal/attractor shapes,
/// 10 structural shapes (lattices, orbits, fields), a dispatcher that selects
/// among them, and a cross-fade between any two.
pub mod curves;
pub mod dispatcher;
pub mod fractal;
pub mod morph;
pub mod structures;

pub use dispatcher::{shape, target_for};

/// The 23 target shapes, by wire id.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeId {
    Spiral = 0,
    Rose = 1,
    Dna = 2,
    Galaxy = 3,
    Sierpinski = 4,
    Heart = 5,
    Mandelbrot = 6,
    Crystal = 7,
    Fibonacci = 8,
    Dragon = 9,
    Orbital = 10,
    Lissajous = 11,
    Plasma = 12,
    Vortex = 13,
    Star = 14,
    Superformula = 15,
    Attractor = 16,
    Hypotrochoid = 17,
    Julia = 18,
    TorusKnot = 19,
    Neural = 20,
    Kaleidoscope = 21,
    BlackHole = 22,
}

impl ShapeId {
    pub const COUNT: usize = 23;

    pub const ALL: [ShapeId; Self::COUNT] = [
        ShapeId::Spiral,
        ShapeId::Rose,
        ShapeId::Dna,
        ShapeId::Galaxy,
        ShapeId::Sierpinski,
        ShapeId::Heart,
        ShapeId::Mandelbrot,
        ShapeId::Crystal,
        ShapeId::Fibonacci,
        ShapeId::Dragon,
        ShapeId::Orbital,
        ShapeId::Lissajous,
        ShapeId::Plasma,
        ShapeId::Vortex,
        ShapeId::Star,
        ShapeId::Superformula,
        ShapeId::Attractor,
        ShapeId::Hypotrochoid,
        ShapeId::Julia,
        ShapeId::TorusKnot,
        ShapeId::Neural,
        ShapeId::Kaleidoscope,
        ShapeId::BlackHole,
    ];

    /// Map a raw id to a shape. Unknown ids fall back to [`ShapeId::Spiral`].
    pub fn from_raw(id: u32) -> Self {
        Self::ALL
            .get(id as usize)
            .copied()
            .unwrap_or(ShapeId::Spiral)
    }

    pub fn name(self) -> &'static str {
        match self {
            ShapeId::Spiral => "Spiral",
            ShapeId::Rose => "Rose",
            ShapeId::Dna => "DNA Helix",
            ShapeId::Galaxy => "Galaxy",
            ShapeId::Sierpinski => "Sierpinski",
            ShapeId::Heart => "Heart",
            ShapeId::Mandelbrot => "Mandelbrot",
            ShapeId::Crystal => "Crystal Lattice",
            ShapeId::Fibonacci => "Fibonacci",
            ShapeId::Dragon => "Dragon Curve",
            ShapeId::Orbital => "Orbital System",
            ShapeId::Lissajous => "Lissajous",
            ShapeId::Plasma => "Plasma",
            ShapeId::Vortex => "Vortex",
            ShapeId::Star => "Star",
            ShapeId::Superformula => "Superformula",
            ShapeId::Attractor => "Clifford Attractor",
            ShapeId::Hypotrochoid => "Hypotrochoid",
            ShapeId::Julia => "Julia",
            ShapeId::TorusKnot => "Torus Knot",
            ShapeId::Neural => "Neural Network",
            ShapeId::Kaleidoscope => "Kaleidoscope",
            ShapeId::BlackHole => "Black Hole",
        }
    }
}

/// Arguments shared by every shape generator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeInput {
    pub index: u32,
    pub total: u32,
    pub time: f32,
    pub complexity: f32,
    pub growth: f32,
}

impl ShapeInput {
    pub fn new(index: u32, total: u32, time: f32, complexity: f32, growth: f32) -> Self {
        Self {
            index,
            total: total.max(1),
            time,
            complexity,
            growth,
        }
    }

    /// Normalised index in `[0, 1)`.
    #[inline]
    pub fn t(&self) -> f32 {
        let t = self.index as f32 / self.total as f32;
        t.clamp(0.0, 1.0)
    }

    /// Loop bound `floor(base + complexity * scale)`, clamped to `[min, max]`.
    #[inline]
    pub fn iterations(&self, base: f32, scale: f32, min: u32, max: u32) -> u32 {
        let n = (base + self.complexity.max(0.0) * scale).floor();
        (n.max(0.0) as u32).clamp(min, max)
    }

    /// Side of the smallest square grid holding `total` cells.
    #[inline]
    pub fn grid_side(&self) -> u32 {
        ((self.total as f32).sqrt().ceil() as u32).max(1)
    }
}
