//! Error types for reconfiguration and framebuffer setup.
//!
//! The per-frame path never fails; only structural operations that allocate
//! return a [`Result`].

use thiserror::Error;

/// Errors surfaced by stop-the-world operations.
#[derive(Debug, Error)]
pub enum MorphError {
    /// A particle store cannot hold zero particles.
    #[error("invalid particle count: {0} (must be at least 1)")]
    InvalidParticleCount(usize),

    /// The allocator refused storage for the requested store.
    #[error("failed to allocate storage for {count} particles")]
    Allocation { count: usize },

    /// A framebuffer needs a non-zero area.
    #[error("invalid framebuffer size {width}x{height}")]
    FramebufferSize { width: u32, height: u32 },
}

pub type Result<T> = std::result::Result<T, MorphError>;
