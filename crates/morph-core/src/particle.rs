use std::f32::consts::TAU;

use glam::Vec2;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{MorphError, Result};

/// GPU-compatible particle: 56 bytes, no padding.
///
/// `target_position`, `phase` and `shape_index` are reserved for the blend
/// pass and per-particle shape assignment; the main step leaves them alone.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub color: [f32; 4],
    /// Phase accumulator in `[0, 2π)`, also fed to the sprite shader.
    pub life: f32,
    pub size: f32,
    pub target_position: Vec2,
    pub phase: f32,
    pub shape_index: u32,
}

impl Particle {
    fn random(rng: &mut impl Rng) -> Self {
        Self {
            position: Vec2::new(rng.gen_range(-400.0..400.0), rng.gen_range(-400.0..400.0)),
            velocity: Vec2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)),
            color: [
                rng.gen_range(0.3..1.0),
                rng.gen_range(0.3..1.0),
                rng.gen_range(0.3..1.0),
                1.0,
            ],
            life: rng.gen_range(0.0..TAU),
            size: rng.gen_range(2.0..6.0),
            target_position: Vec2::ZERO,
            phase: 0.0,
            shape_index: 0,
        }
    }
}

/// Contiguous particle array for one simulation epoch.
///
/// The length is fixed for the life of an epoch; [`ParticleStore::reconfigure`]
/// replaces the whole array rather than resizing it.
pub struct ParticleStore {
    particles: Vec<Particle>,
    seed: u64,
    epoch: u64,
}

impl ParticleStore {
    /// Allocate `count` particles seeded from OS entropy.
    pub fn new(count: usize) -> Result<Self> {
        Self::with_seed(count, rand::random())
    }

    /// Allocate `count` particles from a fixed seed.
    pub fn with_seed(count: usize, seed: u64) -> Result<Self> {
        let particles = Self::allocate(count, seed)?;
        debug!("particle store created: {} particles, seed {:#018x}", count, seed);
        Ok(Self {
            particles,
            seed,
            epoch: 0,
        })
    }

    fn allocate(count: usize, seed: u64) -> Result<Vec<Particle>> {
        if count == 0 {
            return Err(MorphError::InvalidParticleCount(count));
        }
        let mut particles = Vec::new();
        particles
            .try_reserve_exact(count)
            .map_err(|_| MorphError::Allocation { count })?;

        let mut rng = StdRng::seed_from_u64(seed);
        particles.extend((0..count).map(|_| Particle::random(&mut rng)));
        Ok(particles)
    }

    /// Tear down and rebuild the store with `count` fresh particles.
    ///
    /// Always starts a new epoch with a new seed, even when `count` matches
    /// the current length. On failure the previous store is left intact.
    pub fn reconfigure(&mut self, count: usize) -> Result<()> {
        let seed = rand::random();
        self.reconfigure_with_seed(count, seed)
    }

    pub fn reconfigure_with_seed(&mut self, count: usize, seed: u64) -> Result<()> {
        let particles = Self::allocate(count, seed)?;
        info!(
            "particle store reconfigured: {} -> {} particles (epoch {}, seed {:#018x})",
            self.particles.len(),
            count,
            self.epoch + 1,
            seed
        );
        self.particles = particles;
        self.seed = seed;
        self.epoch += 1;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of reconfigurations since creation.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    pub fn as_mut_slice(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Raw bytes for upload to a GPU storage buffer.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.particles)
    }
}
