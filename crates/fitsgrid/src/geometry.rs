//! The nine canonical sample positions of an image.

use crate::config::CutoutSize;

/// Cells per grid side.
pub const GRID_SIDE: usize = 3;

/// Number of sample positions (and grid cells).
pub const GRID_CELLS: usize = GRID_SIDE * GRID_SIDE;

/// Center of a cutout window, in image pixel coordinates.
///
/// `x` is the column, `y` the row counted from the first stored row, which
/// is displayed at the bottom. Coordinates may be negative when the image
/// is smaller than half a cutout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplePosition {
    pub x: i64,
    pub y: i64,
}

impl SamplePosition {
    pub const fn new(x: i64, y: i64) -> Self {
        SamplePosition { x, y }
    }
}

/// Half-open pixel range `[start, end)` of a window along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: i64,
    pub end: i64,
}

impl Span {
    /// Span of `len` pixels starting `len / 2` before `center`.
    pub fn centered(center: i64, len: usize) -> Self {
        let start = center - (len / 2) as i64;
        Span {
            start,
            end: start + len as i64,
        }
    }

    /// Returns `true` if the span lies within `[0, limit)`.
    pub fn inside(&self, limit: usize) -> bool {
        self.start >= 0 && self.end <= limit as i64
    }

    /// Overlap with `[0, limit)` as `(image_range, window_offset)`, or
    /// `None` if the span misses the image entirely.
    pub fn overlap(&self, limit: usize) -> Option<(std::ops::Range<usize>, usize)> {
        let lo = self.start.max(0);
        let hi = self.end.min(limit as i64);
        if lo >= hi {
            return None;
        }
        Some((lo as usize..hi as usize, (lo - self.start) as usize))
    }
}

/// The nine sample positions for an image of `width` x `height`.
///
/// Horizontal anchors are `hw`, `width / 2` and `width - hw`; vertical
/// anchors are `height - hh` (top), `height / 2` and `hh` (bottom), where
/// `hw`/`hh` are half the cutout size. Positions are enumerated row-major
/// from top-left to bottom-right, so index `i` is grid cell `i`.
pub fn sample_positions(
    width: usize,
    height: usize,
    cutout: CutoutSize,
) -> [SamplePosition; GRID_CELLS] {
    let (w, h) = (width as i64, height as i64);
    let hw = cutout.half_width() as i64;
    let hh = cutout.half_height() as i64;

    let columns = [hw, w / 2, w - hw];
    let rows = [h - hh, h / 2, hh];

    let mut out = [SamplePosition::new(0, 0); GRID_CELLS];
    for (r, &y) in rows.iter().enumerate() {
        for (c, &x) in columns.iter().enumerate() {
            out[r * GRID_SIDE + c] = SamplePosition::new(x, y);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: CutoutSize = CutoutSize::new(500, 500);

    #[test]
    fn positions_1500_square() {
        let expected = [
            (250, 1250),
            (750, 1250),
            (1250, 1250),
            (250, 750),
            (750, 750),
            (1250, 750),
            (250, 250),
            (750, 250),
            (1250, 250),
        ];
        let got: Vec<(i64, i64)> = sample_positions(1500, 1500, SQUARE)
            .iter()
            .map(|p| (p.x, p.y))
            .collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn positions_rectangular_odd() {
        let p = sample_positions(2049, 1001, SQUARE);
        assert_eq!(p[0], SamplePosition::new(250, 751));
        assert_eq!(p[4], SamplePosition::new(1024, 500));
        assert_eq!(p[8], SamplePosition::new(1799, 250));
    }

    #[test]
    fn positions_are_deterministic() {
        assert_eq!(
            sample_positions(4096, 4096, SQUARE),
            sample_positions(4096, 4096, SQUARE)
        );
    }

    #[test]
    fn small_image_gives_negative_anchors() {
        let p = sample_positions(200, 300, SQUARE);
        assert_eq!(p[2].x, -50);
        assert_eq!(p[0].y, 50);
    }

    #[test]
    fn corner_windows_touch_edges() {
        for p in sample_positions(1500, 1200, SQUARE) {
            let xs = Span::centered(p.x, SQUARE.width);
            let ys = Span::centered(p.y, SQUARE.height);
            assert!(xs.inside(1500), "{p:?}");
            assert!(ys.inside(1200), "{p:?}");
        }
        let p = sample_positions(1500, 1200, SQUARE);
        assert_eq!(Span::centered(p[0].x, 500).start, 0);
        assert_eq!(Span::centered(p[0].y, 500).end, 1200);
        assert_eq!(Span::centered(p[8].x, 500).end, 1500);
        assert_eq!(Span::centered(p[8].y, 500).start, 0);
    }

    #[test]
    fn span_overlap() {
        let s = Span::centered(100, 500);
        assert_eq!(s, Span { start: -150, end: 350 });
        assert_eq!(s.overlap(300), Some((0..300, 150)));
        assert_eq!(Span::centered(1000, 10).overlap(300), None);
        assert_eq!(Span::centered(50, 10).overlap(300), Some((45..55, 0)));
    }
}
