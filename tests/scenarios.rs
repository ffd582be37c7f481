use approx::assert_relative_eq;
use redraster::camera::Camera;
use redraster::colors::{self, pack_rgb};
use redraster::mesh::{self, SceneOptions};
use redraster::render::rasterizer::{interpolate, row_spans, steps_for};
use redraster::render::{Renderer, ScanlineRasterizer, ScreenPoint, ScreenTriangle, TexturePoint};
use redraster::texture::TextureImage;
use redraster::{Engine, RenderContext, Scene};

fn p(x: f32, y: f32, depth: f32) -> ScreenPoint {
    ScreenPoint::new(x, y, depth)
}

#[test]
fn flat_triangle_fills_one_row() {
    let mut renderer = Renderer::new(16, 4);
    let color = pack_rgb(12, 34, 56);
    {
        let mut fb = renderer.as_framebuffer();
        let tri = ScreenTriangle::new(p(0.0, 0.0, -5.0), p(10.0, 0.0, -5.0), p(5.0, 0.0, -5.0));
        ScanlineRasterizer::new().draw_filled(&tri, &mut fb, color, false);
    }

    for x in 0..16 {
        let expected = if x <= 10 { color } else { colors::BACKGROUND };
        assert_eq!(renderer.color_buffer().pixel(x, 0), Some(expected), "x = {x}");
        if x <= 10 {
            assert_relative_eq!(renderer.depth_buffer()[x as usize], 0.2);
        }
    }
    assert!((16..64).all(|i| renderer.depth_buffer()[i] == 0.0));
}

#[test]
fn spans_cover_every_row_once() {
    let tri = ScreenTriangle::new(p(3.0, 1.0, -1.0), p(9.0, 13.0, -1.0), p(0.0, 6.0, -1.0)).sorted();
    let spans = row_spans(&tri);
    assert_eq!(spans.len(), 13);
    for (row, (start, end)) in spans.rows().enumerate() {
        assert_eq!(start.y, 1.0 + row as f32);
        assert_eq!(end.y, 1.0 + row as f32);
    }
}

#[test]
fn interpolation_hits_both_endpoints() {
    let a = p(2.0, 3.0, -1.0).with_texture(TexturePoint::new(0.0, 10.0));
    let b = p(17.0, -4.0, -9.0).with_texture(TexturePoint::new(40.0, 0.0));
    let steps = steps_for(&a, &b) + 1;
    assert_eq!(steps_for(&a, &b), steps_for(&b, &a));

    let line = interpolate(a, b, steps);
    assert_eq!(line.len(), steps);
    assert_eq!(line[0], a);
    let last = line[steps - 1];
    assert_eq!((last.x, last.y), (17.0, -4.0));
    assert_relative_eq!(last.depth, -9.0, epsilon = 1e-5);
    assert_eq!(last.texture_point, Some(TexturePoint::new(40.0, 0.0)));
}

fn straddling_triangle() -> ScreenTriangle {
    // Rows 5..=20 cross x = 0: the left edge runs from (-20, 0) to (5, 25).
    ScreenTriangle::new(
        p(-20.0, 0.0, -1.0).with_texture(TexturePoint::new(0.0, 0.0)),
        p(20.0, 10.0, -1.0).with_texture(TexturePoint::new(3.0, 1.0)),
        p(5.0, 25.0, -1.0).with_texture(TexturePoint::new(1.0, 3.0)),
    )
}

#[test]
fn off_screen_vertex_is_clamped() {
    let fill = pack_rgb(200, 40, 90);
    let mut renderer = Renderer::new(32, 32);
    {
        let mut fb = renderer.as_framebuffer();
        ScanlineRasterizer::new().draw_filled(&straddling_triangle(), &mut fb, fill, false);
    }

    let buffer = renderer.color_buffer();
    for y in 6..=18 {
        assert_eq!(buffer.pixel(0, y), Some(fill), "y = {y}");
        assert_eq!(buffer.pixel(-1, y), None);
    }
    // Rows above the crossing lie entirely left of the buffer.
    assert_eq!(buffer.pixel(0, 2), Some(colors::BACKGROUND));
    assert!(buffer.pixels().iter().all(|&px| px == fill || px == colors::BACKGROUND));
}

#[test]
fn off_screen_vertex_is_textured_up_to_the_edge() {
    let texel = pack_rgb(30, 160, 220);
    let texture = TextureImage::solid(4, 4, texel).unwrap();
    let mut renderer = Renderer::new(32, 32);
    {
        let mut fb = renderer.as_framebuffer();
        ScanlineRasterizer::new().draw_textured(&straddling_triangle(), &mut fb, &texture, false);
    }

    let buffer = renderer.color_buffer();
    for y in 6..=18 {
        assert_eq!(buffer.pixel(0, y), Some(texel), "y = {y}");
        assert_relative_eq!(renderer.depth_buffer()[(y * 32) as usize], 1.0);
    }
    assert_eq!(buffer.pixel(0, 2), Some(colors::BACKGROUND));
}

#[test]
fn uniform_texture_colors_every_covered_pixel() {
    let green = pack_rgb(0, 180, 0);
    let texture = TextureImage::solid(8, 8, green).unwrap();
    let tri = ScreenTriangle::new(
        p(4.0, 2.0, -1.0).with_texture(TexturePoint::new(0.0, 0.0)),
        p(28.0, 9.0, -1.0).with_texture(TexturePoint::new(7.0, 2.0)),
        p(12.0, 27.0, -1.0).with_texture(TexturePoint::new(3.0, 7.0)),
    );

    let mut renderer = Renderer::new(32, 32);
    {
        let mut fb = renderer.as_framebuffer();
        ScanlineRasterizer::new().draw_textured(&tri, &mut fb, &texture, false);
    }
    let written: Vec<u32> = renderer
        .color_buffer()
        .pixels()
        .iter()
        .zip(renderer.depth_buffer())
        .filter(|(_, &depth)| depth > 0.0)
        .map(|(&px, _)| px)
        .collect();
    assert!(!written.is_empty());
    assert!(written.iter().all(|&px| px == green));
}

#[test]
fn loaded_scene_renders_and_saves() {
    let mtl = "newmtl Red\nKd 1 0 0\n";
    let obj = "mtllib box.mtl\nv -1 -1 0\nv 1 -1 0\nv 0 1 0\nusemtl Red\nf 1 2 3\n";
    let triangles = mesh::load_obj_buf(&mut obj.as_bytes(), mtl, &SceneOptions::default()).unwrap();
    let scene = Scene::new("box", triangles);

    let engine = Engine::new(64, 48);
    let mut ctx = RenderContext::new(Camera::default(), 64, 48);
    ctx.camera.look_at(redraster::math::vec3::Vec3::ZERO);
    let stats = engine.render_frame(&mut ctx, &scene);
    assert_eq!(stats.drawn, 1);
    assert_eq!(ctx.renderer.color_buffer().pixel(32, 24), Some(pack_rgb(255, 0, 0)));

    let dir = std::env::temp_dir().join(format!("redraster-scenario-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("frame.ppm");
    ctx.renderer.save_ppm(&path).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"P6"));
    // Header plus 3 bytes per pixel.
    assert!(bytes.len() >= 64 * 48 * 3);
    std::fs::remove_dir_all(&dir).ok();
}
