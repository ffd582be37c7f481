//! Per-row span construction for scanline filling.
//!
//! A triangle sorted by ascending `y` is split at its middle vertex into two halves
//! that share the middle row:
//!
//! ```text
//!          p0
//!          /\            height1 = p1.y - p0.y + 1
//!         /  \
//!     p1 /____\ <- shared row
//!        \     \
//!         \     \        height2 = p2.y - p1.y + 1
//!          \_____\
//!                p2
//! ```
//!
//! Row starts walk the short edges (p0 -> p1, then p1 -> p2) and row ends walk the
//! long edge (p0 -> p2). Both walks are produced by the line interpolator with one
//! sample per row, so each boundary carries its own depth and texture coordinate.

use std::ops::Range;

use super::interpolate::{interpolate, interpolate_range, Interpolate};
use super::{ScreenPoint, ScreenTriangle};

/// Left/right (or right/left) boundaries of every row of a triangle, top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct RowSpans<P> {
    pub starts: Vec<P>,
    pub ends: Vec<P>,
}

impl<P> RowSpans<P> {
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// Iterate `(start, end)` pairs from the top row down.
    pub fn rows(&self) -> impl Iterator<Item = (&P, &P)> {
        self.starts.iter().zip(self.ends.iter())
    }
}

/// Number of rows each half of a sorted triangle spans, shared row included.
pub fn half_heights<P: Interpolate>(p0: &P, p1: &P, p2: &P) -> (usize, usize) {
    let height1 = (p1.y() - p0.y()).round().max(0.0) as usize + 1;
    let height2 = (p2.y() - p1.y()).round().max(0.0) as usize + 1;
    (height1, height2)
}

/// Build the row spans of three vertices already sorted by ascending `y`.
pub fn row_starts_and_ends<P: Interpolate>(p0: P, p1: P, p2: P) -> RowSpans<P> {
    rows_between(p0, p1, p2, 0..usize::MAX)
}

/// Like [`row_starts_and_ends`], restricted to the rows whose offset from the top
/// row falls in `rows`. Rows outside the window are never computed.
pub fn rows_between<P: Interpolate>(p0: P, p1: P, p2: P, rows: Range<usize>) -> RowSpans<P> {
    let (height1, height2) = half_heights(&p0, &p1, &p2);

    if height1 == 1 && height2 == 1 {
        if !rows.contains(&0) {
            return RowSpans {
                starts: Vec::new(),
                ends: Vec::new(),
            };
        }
        // Every vertex lies on one row: span the extreme vertices so the whole
        // shared line is covered.
        let left = [p1, p2]
            .into_iter()
            .fold(p0, |best, p| if p.x() < best.x() { p } else { best });
        let right = [p1, p2]
            .into_iter()
            .fold(p0, |best, p| if p.x() > best.x() { p } else { best });
        return RowSpans {
            starts: interpolate(left, left, 1),
            ends: interpolate(right, right, 1),
        };
    }

    let total = height1 + height2 - 1;
    let rows = rows.start.min(total)..rows.end.min(total);

    // With a lower half, its first point replaces the last upper one on the shared row.
    let upper = if height2 > 1 { height1 - 1 } else { height1 };
    let mut starts = interpolate_range(p0, p1, height1, rows.start.min(upper)..rows.end.min(upper));
    if height2 > 1 {
        let lower = rows.start.max(upper) - upper..rows.end.max(upper) - upper;
        starts.extend(interpolate_range(p1, p2, height2, lower));
    }
    let ends = interpolate_range(p0, p2, total, rows);

    RowSpans { starts, ends }
}

/// Row spans of a screen triangle, which must already be sorted by `y`.
pub fn row_spans(triangle: &ScreenTriangle) -> RowSpans<ScreenPoint> {
    debug_assert!(triangle.is_sorted(), "row spans need a y-sorted triangle");
    let [p0, p1, p2] = triangle.vertices;
    row_starts_and_ends(p0, p1, p2)
}

/// Row spans of a sorted screen triangle, limited to rows `0..height`.
pub fn visible_row_spans(triangle: &ScreenTriangle, height: u32) -> RowSpans<ScreenPoint> {
    debug_assert!(triangle.is_sorted(), "row spans need a y-sorted triangle");
    let [p0, p1, p2] = triangle.vertices;
    // Rows sit at p0.y, p0.y + 1, ...
    let first = (-p0.y).max(0.0) as usize;
    let last = (height as f32 - p0.y).max(0.0) as usize;
    rows_between(p0, p1, p2, first..last)
}
