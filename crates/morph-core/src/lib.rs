//! Particle morphing engine.
//!
//! Tens of thousands of particles steer toward one of 23 procedurally
//! generated target shapes, then get drawn as shaded point sprites. The
//! per-particle step runs data-parallel with rayon when the `parallel`
//! feature is on.

pub mod clock;
pub mod compositor;
pub mod config;
pub mod driver;
pub mod error;
pub mod math;
pub mod palette;
pub mod particle;
pub mod shapes;
pub mod stats;
pub mod step;
pub mod uniforms;

pub use compositor::{Framebuffer, Sprite};
pub use config::{CompositorConfig, MorphParams};
pub use driver::FrameDriver;
pub use error::{MorphError, Result};
pub use particle::{Particle, ParticleStore};
pub use shapes::{shape, ShapeId, ShapeInput};
pub use stats::{FrameStats, StepStats};
pub use uniforms::Uniforms;
