//! Pixel sinks and the depth-testing frame buffer view.
//!
//! The depth buffer stores `1 / -z` for each pixel, where `z` is the camera-space
//! depth of the fragment (negative in front of the camera). That value grows as
//! geometry approaches the camera, so a buffer cleared to 0.0 means "nothing drawn"
//! and a fragment wins when its value is strictly greater than the stored one.

use crate::colors;

/// Destination for resolved pixel colors.
///
/// Callers guarantee `x < width()` and `y < height()`; [`FrameBuffer`] performs the
/// bounds check before forwarding.
pub trait PixelSink {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn set_pixel(&mut self, x: u32, y: u32, color: u32);
}

/// Owned ARGB8888 color buffer, row-major.
#[derive(Debug, Clone)]
pub struct ColorBuffer {
    pixels: Vec<u32>,
    width: u32,
    height: u32,
}

impl ColorBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![colors::BACKGROUND; width as usize * height as usize],
            width,
            height,
        }
    }

    pub fn clear(&mut self, color: u32) {
        self.pixels.fill(color);
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(self.pixels[(y as u32 * self.width + x as u32) as usize])
        } else {
            None
        }
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Tightly packed RGB bytes, alpha dropped.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|&argb| colors::unpack_rgb(argb))
            .collect()
    }

    /// Native-endian ARGB8888 bytes for streaming to the display.
    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: u32 has no padding and u8 has alignment 1, so the pixel slice
        // can be viewed as 4 * len bytes for as long as it is borrowed.
        unsafe {
            std::slice::from_raw_parts(self.pixels.as_ptr() as *const u8, self.pixels.len() * 4)
        }
    }
}

impl PixelSink for ColorBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn set_pixel(&mut self, x: u32, y: u32, color: u32) {
        self.pixels[(y * self.width + x) as usize] = color;
    }
}

/// A view pairing a pixel sink with its depth buffer.
///
/// This is a borrowed view, not an owning type - it's created for the duration of
/// one frame (or one demo draw) and dropped before the buffers are presented.
pub struct FrameBuffer<'a> {
    sink: &'a mut dyn PixelSink,
    depth_buffer: &'a mut [f32],
    width: u32,
    height: u32,
}

impl<'a> FrameBuffer<'a> {
    /// Create a new FrameBuffer view over a sink and a matching depth buffer.
    pub fn new(sink: &'a mut dyn PixelSink, depth_buffer: &'a mut [f32]) -> Self {
        let width = sink.width();
        let height = sink.height();
        debug_assert_eq!(
            depth_buffer.len(),
            (width * height) as usize,
            "Depth buffer size doesn't match dimensions"
        );
        Self {
            sink,
            depth_buffer,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Depth-test and write one fragment.
    ///
    /// `depth` is the camera-space z of the fragment. Fragments outside the buffer
    /// are dropped without touching it. Returns whether the fragment was written.
    #[inline]
    pub fn plot(&mut self, x: f32, y: f32, depth: f32, color: u32) -> bool {
        // Written so that NaN coordinates fall into the rejecting branch.
        if !(x >= 0.0 && x < self.width as f32 && y >= 0.0 && y < self.height as f32) {
            return false;
        }
        let (px, py) = (x as u32, y as u32);
        let idx = (py * self.width + px) as usize;
        let key = 1.0 / -depth;
        if key > self.depth_buffer[idx] {
            self.depth_buffer[idx] = key;
            self.sink.set_pixel(px, py, color);
            true
        } else {
            false
        }
    }

    /// Stored `1 / -z` at (x, y), or None if out of bounds.
    pub fn depth_at(&self, x: i32, y: i32) -> Option<f32> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(self.depth_buffer[(y as u32 * self.width + x as u32) as usize])
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn closer_fragment_wins_regardless_of_order() {
        let mut near_first = ColorBuffer::new(4, 4);
        let mut depth = vec![0.0; 16];
        {
            let mut fb = FrameBuffer::new(&mut near_first, &mut depth);
            assert!(fb.plot(1.0, 1.0, -2.0, 0xFFAA0000));
            assert!(!fb.plot(1.0, 1.0, -5.0, 0xFF00BB00));
        }

        let mut far_first = ColorBuffer::new(4, 4);
        let mut depth2 = vec![0.0; 16];
        {
            let mut fb = FrameBuffer::new(&mut far_first, &mut depth2);
            assert!(fb.plot(1.0, 1.0, -5.0, 0xFF00BB00));
            assert!(fb.plot(1.0, 1.0, -2.0, 0xFFAA0000));
        }

        assert_eq!(near_first.pixel(1, 1), Some(0xFFAA0000));
        assert_eq!(far_first.pixel(1, 1), Some(0xFFAA0000));
        assert_eq!(depth, depth2);
        assert_relative_eq!(depth[5], 0.5);
    }

    #[test]
    fn equal_depth_keeps_first_fragment() {
        let mut buffer = ColorBuffer::new(2, 2);
        let mut depth = vec![0.0; 4];
        let mut fb = FrameBuffer::new(&mut buffer, &mut depth);
        assert!(fb.plot(0.0, 0.0, -3.0, 0xFF111111));
        assert!(!fb.plot(0.0, 0.0, -3.0, 0xFF222222));
        drop(fb);
        assert_eq!(buffer.pixel(0, 0), Some(0xFF111111));
    }

    #[test]
    fn out_of_bounds_fragments_are_dropped() {
        let mut buffer = ColorBuffer::new(3, 2);
        let mut depth = vec![0.0; 6];
        let mut fb = FrameBuffer::new(&mut buffer, &mut depth);
        assert!(!fb.plot(-1.0, 0.0, -1.0, 0xFFFFFFFF));
        assert!(!fb.plot(3.0, 0.0, -1.0, 0xFFFFFFFF));
        assert!(!fb.plot(0.0, 2.0, -1.0, 0xFFFFFFFF));
        assert!(!fb.plot(f32::NAN, 0.0, -1.0, 0xFFFFFFFF));
        drop(fb);
        assert!(depth.iter().all(|&d| d == 0.0));
        assert!(buffer.pixels().iter().all(|&p| p == colors::BACKGROUND));
    }

    #[test]
    fn geometry_behind_camera_never_passes() {
        let mut buffer = ColorBuffer::new(1, 1);
        let mut depth = vec![0.0; 1];
        let mut fb = FrameBuffer::new(&mut buffer, &mut depth);
        assert!(!fb.plot(0.0, 0.0, 4.0, 0xFFFFFFFF));
        assert_eq!(fb.depth_at(0, 0), Some(0.0));
    }

    #[test]
    fn rgb_bytes_drop_alpha() {
        let mut buffer = ColorBuffer::new(2, 1);
        buffer.set_pixel(1, 0, 0xFF102030);
        assert_eq!(buffer.to_rgb_bytes(), vec![0, 0, 0, 0x10, 0x20, 0x30]);
        assert_eq!(buffer.as_bytes().len(), 8);
    }
}
