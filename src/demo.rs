//! Demo triangles drawn straight in screen space on top of the scene.
//!
//! The random generators pick vertices anywhere in the window and a depth in
//! front of the camera. The textured demo is a fixed triangle mapped to a fixed
//! region of the texture.

use rand::Rng;

use crate::colors;
use crate::render::{DrawMode, ScreenPoint, ScreenTriangle, TexturePoint};

/// Depth range (distance in front of the camera) of random demo vertices.
const DEPTH_RANGE: std::ops::Range<f32> = 0.1..10.0;

/// One overlay entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemoTriangle {
    pub triangle: ScreenTriangle,
    pub mode: DrawMode,
    pub color: u32,
}

fn random_point<R: Rng + ?Sized>(rng: &mut R, width: u32, height: u32) -> ScreenPoint {
    ScreenPoint::new(
        rng.random_range(0..width.max(1)) as f32,
        rng.random_range(0..height.max(1)) as f32,
        -rng.random_range(DEPTH_RANGE),
    )
}

/// A random triangle inside a `width` x `height` window with a random color.
pub fn random_triangle<R: Rng + ?Sized>(rng: &mut R, mode: DrawMode, width: u32, height: u32) -> DemoTriangle {
    let triangle = ScreenTriangle::new(
        random_point(rng, width, height),
        random_point(rng, width, height),
        random_point(rng, width, height),
    );
    let color = colors::pack_rgb(rng.random(), rng.random(), rng.random());
    DemoTriangle {
        triangle,
        mode,
        color,
    }
}

/// The fixed textured triangle.
pub fn textured_triangle() -> DemoTriangle {
    let corner = |x, y, u, v| ScreenPoint::new(x, y, -1.0).with_texture(TexturePoint::new(u, v));
    DemoTriangle {
        triangle: ScreenTriangle::new(
            corner(160.0, 10.0, 195.0, 5.0),
            corner(300.0, 230.0, 395.0, 380.0),
            corner(10.0, 150.0, 65.0, 330.0),
        ),
        mode: DrawMode::Textured,
        color: colors::OUTLINE,
    }
}

/// Builds the demo triangle requested by a draw command.
pub fn for_mode<R: Rng + ?Sized>(rng: &mut R, mode: DrawMode, width: u32, height: u32) -> DemoTriangle {
    match mode {
        DrawMode::Textured => textured_triangle(),
        _ => random_triangle(rng, mode, width, height),
    }
}
