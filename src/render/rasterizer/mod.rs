//! Screen-space triangle rasterization.
//!
//! Triangles arrive here already projected: each [`ScreenPoint`] carries rounded
//! screen coordinates, its camera-space depth and (optionally) a texture coordinate
//! in texture-pixel units. [`ScanlineRasterizer`] draws them in one of three modes:
//!
//! - [`DrawMode::Stroked`]: the three edges only
//! - [`DrawMode::Filled`]: row-by-row solid fill
//! - [`DrawMode::Textured`]: row-by-row fill sampling a [`TextureImage`](crate::texture::TextureImage)
//!
//! All fragments go through the depth-testing [`FrameBuffer`](super::framebuffer::FrameBuffer).

mod draw;
pub mod interpolate;
pub mod scanline;

pub use draw::ScanlineRasterizer;
pub use interpolate::{interpolate, interpolate_range, steps_for, Interpolate};
pub use scanline::{row_spans, row_starts_and_ends, RowSpans};

use std::ops::Index;

/// A texture coordinate in texture-pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TexturePoint {
    pub u: f32,
    pub v: f32,
}

impl TexturePoint {
    pub const fn new(u: f32, v: f32) -> Self {
        Self { u, v }
    }
}

/// A projected vertex ready for rasterization.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
    /// Camera-space z; negative in front of the camera.
    pub depth: f32,
    pub texture_point: Option<TexturePoint>,
}

impl ScreenPoint {
    pub const fn new(x: f32, y: f32, depth: f32) -> Self {
        Self {
            x,
            y,
            depth,
            texture_point: None,
        }
    }

    pub fn with_texture(self, texture_point: TexturePoint) -> Self {
        Self {
            texture_point: Some(texture_point),
            ..self
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.depth.is_finite()
    }
}

/// Three screen points. Fill paths sort them by ascending `y` first.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenTriangle {
    pub vertices: [ScreenPoint; 3],
}

impl ScreenTriangle {
    pub fn new(p0: ScreenPoint, p1: ScreenPoint, p2: ScreenPoint) -> Self {
        Self {
            vertices: [p0, p1, p2],
        }
    }

    /// Sorts the vertices by ascending `y` with a fixed two-swap bubble pass.
    ///
    /// Vertices with equal `y` keep their relative order.
    pub fn sort_vertices(&mut self) {
        let v = &mut self.vertices;
        if v[0].y > v[1].y {
            v.swap(0, 1);
        }
        if v[1].y > v[2].y {
            v.swap(1, 2);
            if v[0].y > v[1].y {
                v.swap(0, 1);
            }
        }
    }

    pub fn sorted(mut self) -> Self {
        self.sort_vertices();
        self
    }

    pub fn is_sorted(&self) -> bool {
        self.vertices[0].y <= self.vertices[1].y && self.vertices[1].y <= self.vertices[2].y
    }

    pub fn is_finite(&self) -> bool {
        self.vertices.iter().all(ScreenPoint::is_finite)
    }
}

impl Index<usize> for ScreenTriangle {
    type Output = ScreenPoint;

    fn index(&self, index: usize) -> &Self::Output {
        &self.vertices[index]
    }
}

/// How a triangle is put on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    /// Edges only, single color.
    Stroked,
    /// Solid fill, single color.
    Filled,
    /// Fill sampled from a texture with affine (screen-linear) coordinates.
    Textured,
}

impl std::fmt::Display for DrawMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DrawMode::Stroked => write!(f, "Stroked"),
            DrawMode::Filled => write!(f, "Filled"),
            DrawMode::Textured => write!(f, "Textured"),
        }
    }
}
