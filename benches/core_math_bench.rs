use criterion::{Criterion, criterion_group, criterion_main};
use schlieren_figures::api::{FigureEngine, FigureEngineConfig};
use schlieren_figures::core::fields::{HEATED_AIR_INDEX, trace_ray_through_lattice};
use schlieren_figures::core::sampling::linspace;
use schlieren_figures::core::{LinearScale, OceanProfile, PixelSpan, PycnoclineScenario};
use schlieren_figures::figures::{FigureContext, FigureId};
use schlieren_figures::render::NullRenderer;
use std::hint::black_box;

fn bench_linear_scale_round_trip(c: &mut Criterion) {
    let span = PixelSpan::new(80.0, 1840.0);
    let scale = LinearScale::new(0.0, 10_000.0).expect("valid scale");

    c.bench_function("linear_scale_round_trip", |b| {
        b.iter(|| {
            let px = scale
                .domain_to_pixel(black_box(4_321.123), span)
                .expect("to pixel");
            let _ = scale.pixel_to_domain(px, span).expect("from pixel");
        })
    });
}

fn bench_index_field_200x160(c: &mut Criterion) {
    c.bench_function("index_field_200x160", |b| {
        b.iter(|| {
            let field = HEATED_AIR_INDEX
                .field(linspace(0.0, 10.0, 200), linspace(0.0, 8.0, 160))
                .expect("field");
            let _ = trace_ray_through_lattice(
                black_box(&field),
                &linspace(0.0, 10.0, 200),
                3.0,
                4.0,
                0.01,
                (3.0, 7.0),
            );
        })
    });
}

fn bench_ocean_profile_simulation(c: &mut Criterion) {
    let scenario = PycnoclineScenario {
        samples: 2_000,
        ..PycnoclineScenario::default()
    };

    c.bench_function("ocean_profile_2k", |b| {
        b.iter(|| {
            let _ = OceanProfile::simulate(black_box(&scenario)).expect("profile");
        })
    });
}

fn bench_overview_frame_build(c: &mut Criterion) {
    let engine = FigureEngine::new(NullRenderer::default(), FigureEngineConfig::new(100.0))
        .expect("engine init");
    let figure = FigureId::SchlierenOverview
        .build(&FigureContext::default())
        .expect("figure");

    c.bench_function("overview_frame_build", |b| {
        b.iter(|| {
            let _ = engine
                .build_render_frame(black_box(&figure))
                .expect("frame build should succeed");
        })
    });
}

criterion_group!(
    benches,
    bench_linear_scale_round_trip,
    bench_index_field_200x160,
    bench_ocean_profile_simulation,
    bench_overview_frame_build
);
criterion_main!(benches);
