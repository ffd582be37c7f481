use std::ops::Range;

use log::trace;

use super::interpolate::{interpolate_range, steps_for};
use super::scanline::visible_row_spans;
use super::{ScreenPoint, ScreenTriangle};
use crate::colors;
use crate::render::framebuffer::FrameBuffer;
use crate::texture::TextureImage;

/// Scanline triangle rasterizer with per-pixel depth testing.
///
/// Every draw reduces to lines: an edge for stroking, one line per row for
/// filling. A line between two points is sampled with [`steps_for`] + 1 points so
/// no pixel along the faster-varying axis is skipped, and each sample carries its
/// own interpolated depth into [`FrameBuffer::plot`].
///
/// Only the rows and samples that can land inside the buffer are generated, so a
/// vertex projected far off-screen costs no more than the visible part of the
/// triangle. Triangles with a non-finite coordinate are ignored.
pub struct ScanlineRasterizer;

impl ScanlineRasterizer {
    pub fn new() -> Self {
        Self
    }

    /// Draws a solid line from `from` to `to`.
    pub fn draw_line(&self, buffer: &mut FrameBuffer, from: ScreenPoint, to: ScreenPoint, color: u32) {
        let steps = steps_for(&from, &to);
        self.draw_line_with(buffer, from, to, steps, |_| color);
    }

    /// Draws the samples of a `steps + 1` point walk from `from` to `to` that
    /// fall in `window`, coloring sample `i` with `shade(i)`.
    fn draw_line_with(
        &self,
        buffer: &mut FrameBuffer,
        from: ScreenPoint,
        to: ScreenPoint,
        steps: usize,
        shade: impl Fn(usize) -> u32,
    ) {
        let window = visible_samples(&from, &to, steps + 1, buffer.width(), buffer.height());
        let points = interpolate_range(from, to, steps + 1, window.clone());
        for (i, point) in window.zip(points.iter()) {
            buffer.plot(point.x, point.y, point.depth, shade(i));
        }
    }

    /// Draws the three edges of a triangle. Interior pixels are untouched.
    pub fn draw_stroked(&self, triangle: &ScreenTriangle, buffer: &mut FrameBuffer, color: u32) {
        if !triangle.is_finite() {
            return;
        }
        let [p0, p1, p2] = triangle.vertices;
        self.draw_line(buffer, p0, p1, color);
        self.draw_line(buffer, p0, p2, color);
        self.draw_line(buffer, p1, p2, color);
    }

    /// Fills a triangle with a solid color, row by row.
    ///
    /// With `outline` set, the edges are stroked in [`colors::OUTLINE`] before any
    /// row is filled. Rows are clamped horizontally to `[0, width]`; rows lying
    /// entirely off either side are skipped.
    pub fn draw_filled(
        &self,
        triangle: &ScreenTriangle,
        buffer: &mut FrameBuffer,
        color: u32,
        outline: bool,
    ) {
        if !triangle.is_finite() {
            return;
        }
        let triangle = triangle.sorted();
        let spans = visible_row_spans(&triangle, buffer.height());
        if spans.is_empty() {
            trace!("triangle rows {}..={} are off-screen", triangle[0].y, triangle[2].y);
        }

        if outline {
            self.draw_stroked(&triangle, buffer, colors::OUTLINE);
        }

        let width = buffer.width() as f32;
        for (start, end) in spans.rows() {
            let (mut start, mut end) = (*start, *end);
            if start.x.max(end.x) < 0.0 || start.x.min(end.x) > width {
                continue;
            }
            start.x = start.x.clamp(0.0, width);
            end.x = end.x.clamp(0.0, width);
            self.draw_line(buffer, start, end, color);
        }
    }

    /// Fills a triangle by sampling `texture` at screen-linearly interpolated
    /// texture coordinates (no division by depth).
    ///
    /// Vertices without a texture coordinate sample the texture origin.
    pub fn draw_textured(
        &self,
        triangle: &ScreenTriangle,
        buffer: &mut FrameBuffer,
        texture: &TextureImage,
        outline: bool,
    ) {
        if !triangle.is_finite() {
            return;
        }
        let triangle = triangle.sorted();
        let spans = visible_row_spans(&triangle, buffer.height());
        if spans.is_empty() {
            trace!("triangle rows {}..={} are off-screen", triangle[0].y, triangle[2].y);
        }

        if outline {
            self.draw_stroked(&triangle, buffer, colors::OUTLINE);
        }

        for (start, end) in spans.rows() {
            let steps = steps_for(start, end);
            let window = visible_samples(start, end, steps + 1, buffer.width(), buffer.height());
            let samples = interpolate_range(
                start.texture_point.unwrap_or_default(),
                end.texture_point.unwrap_or_default(),
                steps + 1,
                window.clone(),
            );
            self.draw_line_with(buffer, *start, *end, steps, |i| {
                let tp = samples[i - window.start];
                texture.sample(tp.u, tp.v)
            });
        }
    }
}

/// Indices of a `samples` point walk from `from` to `to` that can land inside a
/// `width` x `height` buffer, padded by one sample on each side for rounding.
fn visible_samples(from: &ScreenPoint, to: &ScreenPoint, samples: usize, width: u32, height: u32) -> Range<usize> {
    if samples < 2 {
        return 0..samples;
    }
    let segments = (samples - 1) as f32;
    let (mut lo, mut hi) = (0.0_f32, segments);
    for (start, end, extent) in [(from.x, to.x, width as f32), (from.y, to.y, height as f32)] {
        let delta = (end - start) / segments;
        if delta == 0.0 {
            if start < -0.5 || start >= extent - 0.5 {
                return 0..0;
            }
            continue;
        }
        // start + i * delta must round into [0, extent)
        let a = (-0.5 - start) / delta;
        let b = (extent - 0.5 - start) / delta;
        lo = lo.max(a.min(b));
        hi = hi.min(a.max(b));
    }
    if lo > hi {
        return 0..0;
    }
    let first = (lo.floor() - 1.0).max(0.0) as usize;
    let last = (hi.ceil() + 1.0).min(segments) as usize;
    first..last + 1
}

impl Default for ScanlineRasterizer {
    fn default() -> Self {
        Self::new()
    }
}
