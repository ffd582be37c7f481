//! A CPU-based software scanline rasterizer.
//!
//! Triangles of an OBJ scene are projected through a pinhole camera, filled row
//! by row (solid or textured) and composited with a per-pixel depth test. SDL2 is
//! used only for the window, input and presentation.
//!
//! # Quick Start
//!
//! ```ignore
//! use redraster::prelude::*;
//!
//! let scene = Scene::load("models/textured-cornell-box.obj", &SceneOptions::default())?;
//! let engine = Engine::new(640, 480);
//! let mut ctx = RenderContext::new(Camera::default(), 640, 480);
//! engine.render_frame(&mut ctx, &scene);
//! ctx.renderer.save_ppm("output.ppm")?;
//! ```

pub mod app;
pub mod camera;
pub mod colors;
pub mod config;
pub mod demo;
pub mod engine;
pub mod input;
pub mod math;
pub mod mesh;
pub mod projection;
pub mod render;
pub mod scene;
pub mod texture;
pub mod window;

pub use engine::{Engine, FrameStats, RenderContext};
pub use mesh::{LoadError, MeshTriangle, SceneOptions};
pub use scene::Scene;

/// Prelude module for convenient imports.
pub mod prelude {
    // Camera
    pub use crate::camera::{Camera, CameraController};

    // Engine
    pub use crate::engine::{Engine, RenderContext};

    // Scene
    pub use crate::colors::{Color, MaterialKind};
    pub use crate::mesh::{MeshTriangle, SceneOptions};
    pub use crate::scene::Scene;
    pub use crate::texture::TextureImage;

    // Projection
    pub use crate::projection::Projector;

    // Math
    pub use crate::math::mat3::Mat3;
    pub use crate::math::vec3::Vec3;

    // Rendering
    pub use crate::render::{DrawMode, FrameBuffer, Renderer, ScanlineRasterizer, ScreenPoint, ScreenTriangle, TexturePoint};

    // Window & Input
    pub use crate::input::{Axis, Command, LoopControl};
    pub use crate::window::{FrameLimiter, Window, WindowEvent};
}
