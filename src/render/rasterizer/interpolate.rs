//! Uniform linear interpolation between two attribute-bearing points.
//!
//! One algorithm serves every point type: [`interpolate`] walks from `from` to `to`
//! in `steps - 1` equal increments and asks the point type to produce the point at
//! each increment. Screen-space positions and texture coordinates are rounded to the
//! nearest pixel at every step; depth keeps full precision.
//!
//! ```text
//!   from                                   to
//!    o-------o-------o-------o-------o-------o
//!    0       1       2      ...          steps-1
//! ```

use std::ops::Range;

use super::{ScreenPoint, TexturePoint};

/// A point whose attributes can be linearly interpolated.
pub trait Interpolate: Copy {
    /// Horizontal screen (or texture) coordinate.
    fn x(&self) -> f32;
    /// Vertical screen (or texture) coordinate.
    fn y(&self) -> f32;
    /// The point `i` increments along the walk towards `to`, where the walk is
    /// divided into `segments` equal increments.
    fn step_towards(&self, to: &Self, i: usize, segments: f32) -> Self;
}

/// Produce exactly `steps` points from `from` to `to`, both ends included.
///
/// Drawing paths always pass at least 2. A single step yields just `from` and zero
/// steps yields nothing.
pub fn interpolate<P: Interpolate>(from: P, to: P, steps: usize) -> Vec<P> {
    interpolate_range(from, to, steps, 0..steps)
}

/// The points of `interpolate(from, to, steps)` whose indices fall in `indices`.
///
/// Each point is computed directly from its index, so a short window of a very
/// long walk costs only the window.
pub fn interpolate_range<P: Interpolate>(from: P, to: P, steps: usize, indices: Range<usize>) -> Vec<P> {
    let indices = indices.start.min(steps)..indices.end.min(steps);
    match steps {
        0 => Vec::new(),
        1 => indices.map(|_| from.step_towards(&to, 0, 1.0)).collect(),
        _ => {
            let segments = (steps - 1) as f32;
            indices
                .map(|i| from.step_towards(&to, i, segments))
                .collect()
        }
    }
}

/// Chebyshev distance between two points, floored at 1.
///
/// Stepping along whichever axis varies fastest visits every pixel of a line
/// exactly once, so `steps_for(a, b) + 1` samples cover the whole segment.
pub fn steps_for<P: Interpolate>(a: &P, b: &P) -> usize {
    let dx = (a.x() - b.x()).abs();
    let dy = (a.y() - b.y()).abs();
    dx.max(dy).max(1.0) as usize
}

#[inline]
fn lerp(from: f32, to: f32, i: usize, segments: f32) -> f32 {
    from + i as f32 * ((to - from) / segments)
}

impl Interpolate for TexturePoint {
    fn x(&self) -> f32 {
        self.u
    }

    fn y(&self) -> f32 {
        self.v
    }

    fn step_towards(&self, to: &Self, i: usize, segments: f32) -> Self {
        TexturePoint::new(
            lerp(self.u, to.u, i, segments).round(),
            lerp(self.v, to.v, i, segments).round(),
        )
    }
}

impl Interpolate for ScreenPoint {
    fn x(&self) -> f32 {
        self.x
    }

    fn y(&self) -> f32 {
        self.y
    }

    fn step_towards(&self, to: &Self, i: usize, segments: f32) -> Self {
        // The texture coordinate follows its own walk between the two endpoint
        // texture coordinates; it is only carried when both ends have one.
        let texture_point = match (self.texture_point, to.texture_point) {
            (Some(from_tp), Some(to_tp)) => Some(from_tp.step_towards(&to_tp, i, segments)),
            _ => None,
        };
        ScreenPoint {
            x: lerp(self.x, to.x, i, segments).round(),
            y: lerp(self.y, to.y, i, segments).round(),
            depth: lerp(self.depth, to.depth, i, segments),
            texture_point,
        }
    }
}
