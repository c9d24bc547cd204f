use morph_core::config::{MorphParams, MAX_PARTICLES};
use morph_core::driver::FrameDriver;
use morph_core::error::MorphError;
use morph_core::particle::ParticleStore;
use morph_core::shapes::ShapeId;

fn params(count: usize) -> MorphParams {
    MorphParams {
        particle_count: count,
        ..MorphParams::default()
    }
}

#[test]
fn test_store_rejects_zero_particles() {
    assert!(matches!(
        ParticleStore::new(0),
        Err(MorphError::InvalidParticleCount(0))
    ));
}

#[test]
fn test_driver_construction_rejects_zero_particles() {
    let result = FrameDriver::new(MorphParams {
        particle_count: 0,
        ..MorphParams::default()
    });
    assert!(
        matches!(result, Err(MorphError::InvalidParticleCount(0))),
        "a zero count must fail instead of being raised to 1"
    );
}

#[test]
fn test_driver_rejects_zero_particles() {
    let mut driver = FrameDriver::with_seed(params(2000), 1).unwrap();
    let err = driver.reconfigure(0).unwrap_err();
    assert!(matches!(err, MorphError::InvalidParticleCount(0)));
    assert_eq!(driver.particles().len(), 2000, "failed reconfigure must keep the store");
}

#[test]
fn test_reconfigure_grows_store_mid_run() {
    let mut driver = FrameDriver::with_seed(params(2000), 42).unwrap();
    let mut time = 0.0;
    for _ in 0..100 {
        time += 1.0 / 60.0;
        driver.frame_at(time, 1.0 / 60.0);
    }
    assert_eq!(driver.particles().len(), 2000);

    driver.reconfigure(5000).unwrap();
    assert_eq!(driver.particles().len(), 5000);
    assert_eq!(driver.params().particle_count, 5000);
    assert_eq!(driver.store().epoch(), 1);

    // fresh store: exactly the initial state for the new seed, nothing
    // carried over from the stepped particles
    let fresh = ParticleStore::with_seed(5000, driver.store().seed()).unwrap();
    assert_eq!(driver.particles(), fresh.as_slice());
    for p in driver.particles() {
        assert!(p.velocity.x.abs() <= 1.0 && p.velocity.y.abs() <= 1.0);
        assert!((0.0..std::f32::consts::TAU).contains(&p.life));
    }

    let u = driver.frame_at(time + 1.0 / 60.0, 1.0 / 60.0);
    assert_eq!(u.particle_count, 5000);
}

#[test]
fn test_reconfigure_same_count_reseeds() {
    let mut driver = FrameDriver::with_seed(params(1000), 7).unwrap();
    let seed_before = driver.store().seed();
    let before = driver.particles().to_vec();

    driver.reconfigure(1000).unwrap();
    assert_eq!(driver.particles().len(), 1000);
    assert_eq!(driver.store().epoch(), 1);
    // a new seed is drawn; collisions with the old one are astronomically
    // unlikely but the particle contents are the real check
    if driver.store().seed() != seed_before {
        assert_ne!(driver.particles(), &before[..]);
    }
}

#[test]
fn test_out_of_range_count_is_accepted() {
    let mut driver = FrameDriver::with_seed(params(1000), 3).unwrap();
    driver.reconfigure(10).unwrap();
    assert_eq!(driver.particles().len(), 10);
    driver.reconfigure(MAX_PARTICLES + 10).unwrap();
    assert_eq!(driver.particles().len(), MAX_PARTICLES + 10);
}

#[test]
fn test_param_edits_apply_at_next_frame() {
    let mut driver = FrameDriver::with_seed(params(1000), 9).unwrap();
    let u = driver.frame_at(0.1, 0.016);
    assert_eq!(u.shape_mode, ShapeId::Spiral as u32);

    driver.update_params(|p| p.shape = ShapeId::Heart as u32);
    let u = driver.frame_at(0.2, 0.016);
    assert_eq!(u.shape_mode, ShapeId::Heart as u32);
}

#[test]
fn test_frames_keep_particles_finite() {
    let mut driver = FrameDriver::with_seed(params(1500), 13).unwrap();
    let mut time = 0.0;
    for id in ShapeId::ALL {
        driver.update_params(|p| p.shape = id as u32);
        for _ in 0..10 {
            time += 1.0 / 30.0;
            driver.frame_at(time, 1.0 / 30.0);
        }
        for p in driver.particles() {
            assert!(
                p.position.is_finite() && p.velocity.is_finite(),
                "{:?} produced a non-finite particle",
                id
            );
        }
    }
}

#[test]
fn test_frame_composites_into_framebuffer() {
    let mut driver = FrameDriver::with_seed(params(2000), 17).unwrap();
    driver.enable_framebuffer(160, 120).unwrap();
    for i in 0..30 {
        driver.frame_at(i as f32 / 60.0, 1.0 / 60.0);
    }
    let framebuffer = driver.framebuffer().unwrap();
    let lit = framebuffer
        .pixels()
        .iter()
        .filter(|px| px[0] + px[1] + px[2] > 0.05)
        .count();
    assert!(lit > 0, "no particle reached the framebuffer");
}

#[test]
fn test_stats_empty_without_timing() {
    let mut driver = FrameDriver::with_seed(params(500), 1).unwrap();
    driver.frame_at(0.0, 0.016);
    assert_eq!(driver.stats().fps(), 0.0, "fps must come from measured frames only");
}
