use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use redraster::colors::{pack_rgb, Color};
use redraster::math::vec3::Vec3;
use redraster::mesh::MeshTriangle;
use redraster::render::{Renderer, ScanlineRasterizer, ScreenPoint, ScreenTriangle, TexturePoint};
use redraster::texture::TextureImage;
use redraster::{Engine, RenderContext, Scene};
use redraster::camera::Camera;

const BUFFER_WIDTH: u32 = 800;
const BUFFER_HEIGHT: u32 = 600;

fn point(x: f32, y: f32, u: f32, v: f32) -> ScreenPoint {
    ScreenPoint::new(x, y, -2.0).with_texture(TexturePoint::new(u, v))
}

fn small_triangle() -> ScreenTriangle {
    ScreenTriangle::new(
        point(100.0, 100.0, 0.0, 0.0),
        point(120.0, 100.0, 63.0, 0.0),
        point(110.0, 120.0, 31.0, 63.0),
    )
}

fn medium_triangle() -> ScreenTriangle {
    ScreenTriangle::new(
        point(100.0, 100.0, 0.0, 0.0),
        point(300.0, 100.0, 63.0, 0.0),
        point(200.0, 300.0, 31.0, 63.0),
    )
}

fn large_triangle() -> ScreenTriangle {
    ScreenTriangle::new(
        point(50.0, 50.0, 0.0, 0.0),
        point(750.0, 100.0, 63.0, 0.0),
        point(400.0, 550.0, 31.0, 63.0),
    )
}

fn checker_texture() -> TextureImage {
    let data = (0..64 * 64)
        .map(|i| {
            if (i % 64 / 8 + i / 64 / 8) % 2 == 0 {
                pack_rgb(220, 220, 220)
            } else {
                pack_rgb(40, 40, 40)
            }
        })
        .collect();
    TextureImage::from_pixels(64, 64, data).expect("64x64 texture")
}

fn benchmark_draw_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw_modes");

    let rasterizer = ScanlineRasterizer::new();
    let texture = checker_texture();
    let color = pack_rgb(255, 0, 0);

    for (name, triangle) in [
        ("small", small_triangle()),
        ("medium", medium_triangle()),
        ("large", large_triangle()),
    ] {
        group.bench_with_input(BenchmarkId::new("stroked", name), &triangle, |b, tri| {
            let mut renderer = Renderer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
            b.iter(|| {
                renderer.clear();
                let mut fb = renderer.as_framebuffer();
                rasterizer.draw_stroked(black_box(tri), &mut fb, color);
            });
        });

        group.bench_with_input(BenchmarkId::new("filled", name), &triangle, |b, tri| {
            let mut renderer = Renderer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
            b.iter(|| {
                renderer.clear();
                let mut fb = renderer.as_framebuffer();
                rasterizer.draw_filled(black_box(tri), &mut fb, color, false);
            });
        });

        group.bench_with_input(BenchmarkId::new("textured", name), &triangle, |b, tri| {
            let mut renderer = Renderer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
            b.iter(|| {
                renderer.clear();
                let mut fb = renderer.as_framebuffer();
                rasterizer.draw_textured(black_box(tri), &mut fb, &texture, false);
            });
        });
    }

    group.finish();
}

fn benchmark_full_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_frame");

    // A 20x20 grid of small triangles in the z = 0 plane
    let triangles: Vec<MeshTriangle> = (0..20)
        .flat_map(|row| {
            (0..20).map(move |col| {
                let x = col as f32 * 0.4 - 4.0;
                let y = row as f32 * 0.3 - 3.0;
                MeshTriangle::new(
                    [
                        Vec3::new(x, y, 0.0),
                        Vec3::new(x + 0.35, y, 0.0),
                        Vec3::new(x + 0.175, y + 0.25, 0.0),
                    ],
                    Color::rgb(200, 50, 50),
                )
            })
        })
        .collect();
    let scene = Scene::new("grid", triangles);
    let engine = Engine::new(BUFFER_WIDTH, BUFFER_HEIGHT);

    group.bench_function("render_400_triangles", |b| {
        let mut ctx = RenderContext::new(Camera::default(), BUFFER_WIDTH, BUFFER_HEIGHT);
        b.iter(|| engine.render_frame(&mut ctx, black_box(&scene)));
    });

    group.finish();
}

criterion_group!(benches, benchmark_draw_modes, benchmark_full_frame);
criterion_main!(benches);
