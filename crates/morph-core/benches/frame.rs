use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use morph_core::compositor::Framebuffer;
use morph_core::config::{CompositorConfig, MorphParams};
use morph_core::particle::ParticleStore;
use morph_core::shapes::{ShapeId, shape};
use morph_core::step::simulate;
use morph_core::uniforms::Uniforms;

fn shape_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("shape");
    let total = 10_000u32;
    group.throughput(Throughput::Elements(total as u64));

    for id in [ShapeId::Spiral, ShapeId::Mandelbrot, ShapeId::Dragon, ShapeId::Attractor] {
        group.bench_with_input(BenchmarkId::from_parameter(id.name()), &id, |b, &id| {
            b.iter(|| {
                for index in 0..total {
                    black_box(shape(id as u32, index, total, 1.5, 1.0, 1.0));
                }
            })
        });
    }
    group.finish();
}

fn simulate_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulate");

    for count in [5_000usize, 30_000, 90_000] {
        let params = MorphParams {
            particle_count: count,
            shape: ShapeId::Galaxy as u32,
            ..MorphParams::default()
        };
        let mut store = ParticleStore::with_seed(count, 1).unwrap();
        let uniforms = Uniforms::snapshot(&params, 1.0, 1.0 / 60.0, count);

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| simulate(black_box(store.as_mut_slice()), &uniforms))
        });
    }
    group.finish();
}

fn composite_benchmark(c: &mut Criterion) {
    let count = 30_000;
    let params = MorphParams {
        particle_count: count,
        ..MorphParams::default()
    };
    let mut store = ParticleStore::with_seed(count, 2).unwrap();
    simulate(
        store.as_mut_slice(),
        &Uniforms::snapshot(&params, 1.0, 1.0 / 60.0, count),
    );
    let config = CompositorConfig::default();
    let mut framebuffer = Framebuffer::new(1280, 720).unwrap();

    c.bench_function("composite_30k_720p", |b| {
        b.iter(|| {
            framebuffer.clear(config.background);
            framebuffer.composite(black_box(store.as_slice()), &config);
        })
    });
}

criterion_group!(
    benches,
    shape_benchmark,
    simulate_benchmark,
    composite_benchmark
);
criterion_main!(benches);
