//! Owner of the per-frame color and depth buffers.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use image::{ExtendedColorType, ImageEncoder};

use super::framebuffer::{ColorBuffer, FrameBuffer, PixelSink};
use crate::colors;

pub struct Renderer {
    color_buffer: ColorBuffer,
    depth_buffer: Vec<f32>,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            color_buffer: ColorBuffer::new(width, height),
            depth_buffer: vec![0.0; width as usize * height as usize], // 0.0 = nothing drawn yet
        }
    }

    pub fn width(&self) -> u32 {
        self.color_buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.color_buffer.height()
    }

    /// Reset both buffers for a new frame.
    pub fn clear(&mut self) {
        self.color_buffer.clear(colors::BACKGROUND);
        self.depth_buffer.fill(0.0);
    }

    pub fn color_buffer(&self) -> &ColorBuffer {
        &self.color_buffer
    }

    /// Stored `1 / -z` per pixel, row-major.
    pub fn depth_buffer(&self) -> &[f32] {
        &self.depth_buffer
    }

    /// Get a depth-testing FrameBuffer view into the color and depth buffers.
    pub fn as_framebuffer(&mut self) -> FrameBuffer<'_> {
        FrameBuffer::new(&mut self.color_buffer, &mut self.depth_buffer)
    }

    /// Returns the color buffer as ARGB8888 bytes for presentation.
    pub fn as_bytes(&self) -> &[u8] {
        self.color_buffer.as_bytes()
    }

    /// Writes the color buffer as a binary PPM (P6).
    pub fn save_ppm<P: AsRef<Path>>(&self, path: P) -> Result<(), image::ImageError> {
        let file = BufWriter::new(File::create(path)?);
        PnmEncoder::new(file)
            .with_subtype(PnmSubtype::Pixmap(SampleEncoding::Binary))
            .write_image(
                &self.color_buffer.to_rgb_bytes(),
                self.width(),
                self.height(),
                ExtendedColorType::Rgb8,
            )
    }
}
