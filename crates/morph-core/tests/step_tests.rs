use glam::Vec2;
use morph_core::config::MorphParams;
use morph_core::math::rotate2;
use morph_core::particle::{Particle, ParticleStore};
use morph_core::shapes::{shape, ShapeId};
use morph_core::step::{simulate, simulate_range, target_position, update_particle};
use morph_core::uniforms::Uniforms;

fn uniforms(params: &MorphParams, time: f32, dt: f32, count: usize) -> Uniforms {
    Uniforms::snapshot(params, time, dt, count)
}

fn still_params() -> MorphParams {
    MorphParams {
        rotation_speed: 0.0,
        ..MorphParams::default()
    }
}

#[test]
fn test_steering_is_capped_by_morph_speed() {
    let params = still_params();
    let u = uniforms(&params, 0.0, 0.016, 1000);
    let target = target_position(500, &u);

    let mut p: Particle = bytemuck::Zeroable::zeroed();
    p.position = target + Vec2::new(400.0, 300.0);
    update_particle(&mut p, 500, &u);

    // morph_speed * 100 * dt
    let cap = 1.0 * 100.0 * 0.016;
    assert!(
        (p.velocity.length() - cap).abs() < 1e-4,
        "velocity {} should equal the cap {}",
        p.velocity.length(),
        cap
    );
    let toward = (target - (target + Vec2::new(400.0, 300.0))).normalize();
    assert!(p.velocity.normalize().dot(toward) > 0.9999);
}

#[test]
fn test_close_particle_snaps_to_target() {
    let params = still_params();
    let u = uniforms(&params, 0.0, 0.016, 1000);
    let target = target_position(500, &u);

    let mut p: Particle = bytemuck::Zeroable::zeroed();
    p.position = target + Vec2::new(0.5, -0.5);
    update_particle(&mut p, 500, &u);

    assert!((p.velocity - Vec2::new(-0.5, 0.5)).length() < 1e-4);
    // only the dt-scaled jitter separates it from the target
    let jitter_bound = 7.1 * 0.016;
    assert!(
        (p.position - target).length() <= jitter_bound,
        "after snapping, {:?} is too far from {:?}",
        p.position,
        target
    );
}

#[test]
fn test_convergence_toward_spiral_point() {
    let params = still_params();
    let mut p: Particle = bytemuck::Zeroable::zeroed();
    p.position = Vec2::new(-300.0, 200.0);

    let dt = 1.0 / 60.0;
    for frame in 0..600 {
        // time frozen at zero so the target holds still
        let u = uniforms(&params, 0.0, dt, 1000);
        update_particle(&mut p, 500, &u);
        if frame == 599 {
            let target = target_position(500, &u);
            assert!(
                (p.position - target).length() < 1.0,
                "particle at {:?} did not reach {:?}",
                p.position,
                target
            );
        }
    }
}

#[test]
fn test_life_stays_wrapped() {
    let params = MorphParams::default();
    let mut store = ParticleStore::with_seed(256, 11).unwrap();
    for frame in 0..400 {
        let u = uniforms(&params, frame as f32 * 0.05, 0.05, store.len());
        simulate(store.as_mut_slice(), &u);
    }
    for p in store.as_slice() {
        assert!(
            (0.0..std::f32::consts::TAU).contains(&p.life),
            "life {} escaped [0, 2π)",
            p.life
        );
    }
}

#[test]
fn test_sizes_and_colours_after_step() {
    let params = MorphParams {
        growth_factor: 0.1,
        ..MorphParams::default()
    };
    let mut store = ParticleStore::with_seed(512, 21).unwrap();
    let u = uniforms(&params, 2.0, 0.016, store.len());
    simulate(store.as_mut_slice(), &u);
    for p in store.as_slice() {
        assert!(p.size >= 1.0, "size {} below floor", p.size);
        assert!(p.color.iter().all(|c| c.is_finite()));
        assert!((0.399..=1.001).contains(&p.color[3]), "alpha {}", p.color[3]);
    }
}

#[test]
fn test_particles_update_independently() {
    let params = MorphParams {
        shape: ShapeId::Galaxy as u32,
        ..MorphParams::default()
    };
    let full_store = ParticleStore::with_seed(1000, 5).unwrap();
    let mut full = full_store.as_slice().to_vec();
    let mut part = full.clone();

    let u = uniforms(&params, 1.25, 0.016, full.len());
    simulate(&mut full, &u);
    // step only particles 300..700; the rest must stay untouched and the
    // stepped ones must match the full run exactly
    simulate_range(&mut part[300..700], 300, &u);

    assert_eq!(&full[300..700], &part[300..700]);
    assert_eq!(&part[..300], &full_store.as_slice()[..300]);
    assert_eq!(&part[700..], &full_store.as_slice()[700..]);
}

#[test]
fn test_reserved_fields_untouched_by_step() {
    let params = MorphParams::default();
    let mut store = ParticleStore::with_seed(64, 2).unwrap();
    for p in store.as_mut_slice() {
        p.phase = 0.25;
        p.shape_index = 7;
        p.target_position = Vec2::new(1.0, 2.0);
    }
    let u = uniforms(&params, 0.5, 0.016, store.len());
    simulate(store.as_mut_slice(), &u);
    for p in store.as_slice() {
        assert_eq!(p.phase, 0.25);
        assert_eq!(p.shape_index, 7);
        assert_eq!(p.target_position, Vec2::new(1.0, 2.0));
    }
}

#[test]
fn test_morph_speed_scales_step() {
    let slow = MorphParams {
        morph_speed: 0.5,
        ..still_params()
    };
    let fast = MorphParams {
        morph_speed: 4.0,
        ..still_params()
    };
    let start = Vec2::new(900.0, 900.0);
    let step = |params: &MorphParams| {
        let mut p: Particle = bytemuck::Zeroable::zeroed();
        p.position = start;
        update_particle(&mut p, 10, &uniforms(params, 0.0, 0.016, 100));
        p.velocity.length()
    };
    assert!((step(&fast) / step(&slow) - 8.0).abs() < 1e-3);
}

#[test]
fn test_rotated_target_is_spun_shape_point() {
    let params = MorphParams {
        rotation_speed: 3.0,
        ..MorphParams::default()
    };
    let u = uniforms(&params, 2.0, 0.016, 1000);
    let base = shape(u.shape_mode, 500, 1000, u.time, u.complexity, u.growth_factor);
    let expected = rotate2(base, 2.0 * 3.0 * 0.1);
    let target = target_position(500, &u);
    assert!((target - expected).length() < 1e-3, "{:?} vs {:?}", target, expected);

    let still = uniforms(&still_params(), 2.0, 0.016, 1000);
    assert!((target_position(500, &still) - base).length() < 1e-4);
}

#[test]
fn test_steering_cap_holds_under_rotation() {
    let params = MorphParams {
        rotation_speed: 10.0,
        ..MorphParams::default()
    };
    let u = uniforms(&params, 3.5, 0.016, 1000);
    let target = target_position(250, &u);

    let start = target + Vec2::new(-350.0, 120.0);
    let mut p: Particle = bytemuck::Zeroable::zeroed();
    p.position = start;
    update_particle(&mut p, 250, &u);

    let cap = 1.0 * 100.0 * 0.016;
    assert!((p.velocity.length() - cap).abs() < 1e-4, "velocity {}", p.velocity.length());
    let toward = (target - start).normalize();
    assert!(
        p.velocity.normalize().dot(toward) > 0.9999,
        "velocity should aim at the rotated target"
    );
}
