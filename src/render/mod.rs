//! Rasterization and depth compositing.

pub mod framebuffer;
pub mod rasterizer;
pub mod renderer;

pub use framebuffer::{ColorBuffer, FrameBuffer, PixelSink};
pub use rasterizer::{DrawMode, ScanlineRasterizer, ScreenPoint, ScreenTriangle, TexturePoint};
pub use renderer::Renderer;
