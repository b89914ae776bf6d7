use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rastrum::light::Light;
use rastrum::prelude::*;
use rastrum::render::{FaceShader, FrameBuffer, ScanlineRasterizer, ScreenPoint, ScreenTriangle};
use rastrum::shading::LightingContext;

const BUFFER_WIDTH: u32 = 800;
const BUFFER_HEIGHT: u32 = 600;

fn screen_triangle(points: [(i32, i32); 3]) -> ScreenTriangle {
    ScreenTriangle::new(points.map(|(x, y)| ScreenPoint::new(x, y)), [0.5; 3])
}

fn view_positions() -> [Vec3; 3] {
    [
        Vec3::new(-1.0, -1.0, -4.0),
        Vec3::new(1.0, -1.0, -4.5),
        Vec3::new(0.0, 1.0, -5.0),
    ]
}

fn benchmark_single_triangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_triangle");

    let lights = [
        Light::point(Vec3::new(-5.0, 5.0, 0.0)).to_view(&Mat4::identity()),
        Light::spot(Vec3::ZERO, Vec3::FORWARD, 12).to_view(&Mat4::identity()),
    ];
    let fog = Fog::default();
    let ctx = LightingContext::new(LightingCoefficients::default(), &lights, Some(&fog));
    let normals = [Vec3::BACK, Vec3::new(0.3, 0.0, 1.0).normalize(), Vec3::UP];
    let rasterizer = ScanlineRasterizer::new();

    let sizes = [
        ("small", screen_triangle([(100, 100), (120, 100), (110, 120)])),
        ("medium", screen_triangle([(100, 100), (300, 100), (200, 300)])),
        ("large", screen_triangle([(50, 50), (750, 100), (400, 550)])),
    ];

    for mode in [ShadingMode::Flat, ShadingMode::Gouraud, ShadingMode::Phong] {
        let shader = FaceShader::new(mode, view_positions(), normals, Color::new(154, 205, 50), ctx);
        for (name, triangle) in &sizes {
            group.bench_with_input(
                BenchmarkId::new(mode.to_string(), name),
                triangle,
                |b, tri| {
                    let mut color = vec![0u32; (BUFFER_WIDTH * BUFFER_HEIGHT) as usize];
                    let mut depth = vec![f32::INFINITY; (BUFFER_WIDTH * BUFFER_HEIGHT) as usize];
                    b.iter(|| {
                        depth.fill(f32::INFINITY);
                        let mut fb =
                            FrameBuffer::new(&mut color, &mut depth, BUFFER_WIDTH, BUFFER_HEIGHT);
                        rasterizer.fill_triangle(black_box(tri), &shader, &mut fb)
                    });
                },
            );
        }
    }

    group.finish();
}

fn benchmark_arena_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("arena_frame");
    group.sample_size(20);

    let Ok(setup) = SceneConfig::arena().and_then(|config| config.build()) else {
        panic!("built-in arena scene should build");
    };

    for mode in [ShadingMode::Flat, ShadingMode::Gouraud, ShadingMode::Phong] {
        let mut config = setup.render.clone();
        config.shading = mode;
        group.bench_function(BenchmarkId::from_parameter(mode), |b| {
            let mut surface = Surface::new(BUFFER_WIDTH, BUFFER_HEIGHT);
            let mut depth = DepthBuffer::default();
            b.iter(|| {
                surface.clear(setup.background);
                render(
                    black_box(&setup.scene),
                    setup.camera(),
                    &config,
                    &mut surface,
                    &mut depth,
                )
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_single_triangle, benchmark_arena_frame);
criterion_main!(benches);
