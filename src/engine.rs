//! Frame renderer.
//!
//! [`Engine::render_frame`] draws one complete frame into a [`RenderContext`]:
//! both buffers are cleared, every scene triangle is projected and rasterized
//! according to its material, and the demo overlay is drawn last. Triangles
//! are independent and drawn in scene order; the depth test makes the result
//! order independent.

use log::trace;

use crate::camera::Camera;
use crate::colors::MaterialKind;
use crate::demo::DemoTriangle;
use crate::projection::Projector;
use crate::render::{DrawMode, FrameBuffer, Renderer, ScanlineRasterizer};
use crate::scene::Scene;
use crate::texture::TextureImage;

/// Mutable per-frame state: the camera written by input handling and the
/// buffers written by the renderer.
pub struct RenderContext {
    pub camera: Camera,
    pub renderer: Renderer,
    overlay: Vec<DemoTriangle>,
}

impl RenderContext {
    pub fn new(camera: Camera, width: u32, height: u32) -> Self {
        Self {
            camera,
            renderer: Renderer::new(width, height),
            overlay: Vec::new(),
        }
    }

    pub fn push_overlay(&mut self, demo: DemoTriangle) {
        self.overlay.push(demo);
    }

    pub fn clear_overlay(&mut self) {
        self.overlay.clear();
    }

    pub fn overlay(&self) -> &[DemoTriangle] {
        &self.overlay
    }
}

/// Counters for one rendered frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub drawn: usize,
    pub skipped: usize,
}

pub struct Engine {
    projector: Projector,
    rasterizer: ScanlineRasterizer,
}

impl Engine {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            projector: Projector::new(width, height),
            rasterizer: ScanlineRasterizer::new(),
        }
    }

    pub fn render_frame(&self, ctx: &mut RenderContext, scene: &Scene) -> FrameStats {
        ctx.renderer.clear();
        let camera = &ctx.camera;
        let mut buffer = ctx.renderer.as_framebuffer();
        let mut stats = FrameStats::default();

        for face in scene.triangles() {
            let Some(triangle) = self.projector.project(face, camera) else {
                stats.skipped += 1;
                continue;
            };
            match (face.color.kind(), scene.texture()) {
                (MaterialKind::Textured, Some(texture)) => {
                    self.rasterizer
                        .draw_textured(&triangle, &mut buffer, texture, false);
                }
                _ => {
                    self.rasterizer
                        .draw_filled(&triangle, &mut buffer, face.color.pack(), false);
                }
            }
            stats.drawn += 1;
        }

        for demo in &ctx.overlay {
            self.draw_demo(demo, &mut buffer, scene.texture());
        }

        trace!(
            "frame: {} drawn, {} skipped, {} overlay",
            stats.drawn,
            stats.skipped,
            ctx.overlay.len()
        );
        stats
    }

    fn draw_demo(&self, demo: &DemoTriangle, buffer: &mut FrameBuffer, texture: Option<&TextureImage>) {
        match (demo.mode, texture) {
            (DrawMode::Stroked, _) => self.rasterizer.draw_stroked(&demo.triangle, buffer, demo.color),
            (DrawMode::Filled, _) => self
                .rasterizer
                .draw_filled(&demo.triangle, buffer, demo.color, true),
            (DrawMode::Textured, Some(texture)) => self
                .rasterizer
                .draw_textured(&demo.triangle, buffer, texture, true),
            // Nothing to sample from, keep the outline only.
            (DrawMode::Textured, None) => self.rasterizer.draw_stroked(&demo.triangle, buffer, demo.color),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{self, Color};
    use crate::math::vec3::Vec3;
    use crate::mesh::MeshTriangle;
    use crate::render::{ScreenPoint, ScreenTriangle, TexturePoint};

    const W: u32 = 64;
    const H: u32 = 48;

    fn square(z: f32, color: Color) -> MeshTriangle {
        MeshTriangle::new(
            [
                Vec3::new(-2.0, -2.0, z),
                Vec3::new(2.0, -2.0, z),
                Vec3::new(0.0, 2.0, z),
            ],
            color,
        )
    }

    fn centre(ctx: &RenderContext) -> Option<u32> {
        ctx.renderer
            .color_buffer()
            .pixel((W / 2) as i32, (H / 2) as i32)
    }

    #[test]
    fn nearer_triangle_wins_in_any_order() {
        let engine = Engine::new(W, H);
        let near = square(0.0, Color::rgb(255, 0, 0));
        let far = square(-5.0, Color::rgb(0, 0, 255));

        for triangles in [vec![near.clone(), far.clone()], vec![far, near]] {
            let mut ctx = RenderContext::new(Camera::default(), W, H);
            let stats = engine.render_frame(&mut ctx, &Scene::new("pair", triangles));
            assert_eq!(stats.drawn, 2);
            assert_eq!(centre(&ctx), Some(colors::pack_rgb(255, 0, 0)));
        }
    }

    #[test]
    fn triangles_behind_camera_are_skipped() {
        let engine = Engine::new(W, H);
        let mut ctx = RenderContext::new(Camera::default(), W, H);
        let scene = Scene::new("behind", vec![square(20.0, Color::default())]);
        let stats = engine.render_frame(&mut ctx, &scene);
        assert_eq!(stats, FrameStats { drawn: 0, skipped: 1 });
        assert!(ctx.renderer.color_buffer().pixels().iter().all(|&p| p == colors::BACKGROUND));
    }

    #[test]
    fn textured_material_samples_the_scene_texture() {
        let engine = Engine::new(W, H);
        let texture = TextureImage::solid(4, 4, colors::pack_rgb(0, 200, 0)).unwrap();
        let face = square(0.0, Color::rgb(255, 0, 0).with_kind(MaterialKind::Textured)).with_texture([
            TexturePoint::new(0.0, 0.0),
            TexturePoint::new(3.0, 0.0),
            TexturePoint::new(0.0, 3.0),
        ]);

        let mut ctx = RenderContext::new(Camera::default(), W, H);
        let scene = Scene::new("tex", vec![face.clone()]).with_texture(texture);
        engine.render_frame(&mut ctx, &scene);
        assert_eq!(centre(&ctx), Some(colors::pack_rgb(0, 200, 0)));

        // Without a texture the face falls back to its flat color.
        let mut ctx = RenderContext::new(Camera::default(), W, H);
        engine.render_frame(&mut ctx, &Scene::new("flat", vec![face]));
        assert_eq!(centre(&ctx), Some(colors::pack_rgb(255, 0, 0)));
    }

    #[test]
    fn overlay_persists_until_cleared() {
        let engine = Engine::new(W, H);
        let mut ctx = RenderContext::new(Camera::default(), W, H);
        let point = |x, y| ScreenPoint::new(x, y, -1.0);
        ctx.push_overlay(DemoTriangle {
            triangle: ScreenTriangle::new(point(0.0, 0.0), point(20.0, 0.0), point(0.0, 20.0)),
            mode: DrawMode::Filled,
            color: colors::pack_rgb(9, 9, 9),
        });

        let scene = Scene::default();
        for _ in 0..2 {
            engine.render_frame(&mut ctx, &scene);
            assert_eq!(ctx.renderer.color_buffer().pixel(5, 5), Some(colors::pack_rgb(9, 9, 9)));
        }

        ctx.clear_overlay();
        engine.render_frame(&mut ctx, &scene);
        assert_eq!(ctx.renderer.color_buffer().pixel(5, 5), Some(colors::BACKGROUND));
    }
}
