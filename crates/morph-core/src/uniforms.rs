use glam::Vec2;

use crate::config::MorphParams;

/// Per-frame parameter snapshot shared read-only by every particle update.
///
/// Layout matches a 40-byte uniform buffer so the same value can be handed
/// to a GPU kernel.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Uniforms {
    pub time: f32,
    pub delta_time: f32,
    pub particle_count: u32,
    pub rotation_speed: f32,
    pub screen_size: Vec2,
    pub shape_mode: u32,
    pub growth_factor: f32,
    pub complexity: f32,
    pub morph_speed: f32,
}

impl Uniforms {
    /// Freeze `params` for one frame.
    ///
    /// `particle_count` is the length of the store actually being stepped,
    /// which may differ from `params.particle_count` until the next
    /// reconfiguration.
    pub fn snapshot(params: &MorphParams, time: f32, delta_time: f32, particle_count: usize) -> Self {
        Self {
            time,
            delta_time: delta_time.max(0.0),
            particle_count: particle_count.min(u32::MAX as usize) as u32,
            rotation_speed: params.rotation_speed,
            screen_size: params.screen_size,
            shape_mode: params.shape,
            growth_factor: params.growth_factor,
            complexity: params.complexity,
            morph_speed: params.morph_speed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_layout() {
        assert_eq!(std::mem::size_of::<Uniforms>(), 40);
    }

    #[test]
    fn test_snapshot_copies_params() {
        let params = MorphParams {
            shape: 7,
            growth_factor: 2.5,
            ..MorphParams::default()
        };
        let u = Uniforms::snapshot(&params, 1.5, 0.016, 1234);
        assert_eq!(u.shape_mode, 7);
        assert_eq!(u.growth_factor, 2.5);
        assert_eq!(u.particle_count, 1234);
        assert_eq!(u.time, 1.5);
    }

    #[test]
    fn test_negative_delta_is_zeroed() {
        let u = Uniforms::snapshot(&MorphParams::default(), 0.0, -1.0, 10);
        assert_eq!(u.delta_time, 0.0);
    }
}
