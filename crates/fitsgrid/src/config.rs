//! Immutable render configuration, built once at startup.

use crate::norm::SymLogNorm;

/// Width and height of every cutout, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CutoutSize {
    pub width: usize,
    pub height: usize,
}

impl CutoutSize {
    pub const fn new(width: usize, height: usize) -> Self {
        CutoutSize { width, height }
    }

    pub const fn half_width(&self) -> usize {
        self.width / 2
    }

    pub const fn half_height(&self) -> usize {
        self.height / 2
    }
}

/// Cutout size used for every image.
pub const CUTOUT_SIZE: CutoutSize = CutoutSize::new(500, 500);

/// Background gap around and between grid cells, in pixels.
pub const CELL_GAP: usize = 10;

/// Canvas background, also used for pixels with no data.
pub const BACKGROUND: u8 = u8::MAX;

/// What to do when a cutout window reaches past the image edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryMode {
    /// Keep the full cutout size and fill outside pixels with NaN.
    #[default]
    Partial,
    /// Reject the image with a geometry error.
    Strict,
}

/// Everything a [`GridRenderer`](crate::GridRenderer) needs, shared read-only
/// across all rendered files.
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    pub cutout: CutoutSize,
    pub norm: SymLogNorm,
    pub boundary: BoundaryMode,
    pub gap: usize,
    pub background: u8,
}

impl GridConfig {
    /// Standard configuration with the given boundary policy.
    pub fn new(boundary: BoundaryMode) -> Self {
        GridConfig {
            boundary,
            ..Self::default()
        }
    }

    /// Side lengths `(width, height)` of the composed 3x3 canvas.
    pub fn canvas_size(&self) -> (usize, usize) {
        (
            3 * self.cutout.width + 4 * self.gap,
            3 * self.cutout.height + 4 * self.gap,
        )
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            cutout: CUTOUT_SIZE,
            norm: SymLogNorm::default(),
            boundary: BoundaryMode::Partial,
            gap: CELL_GAP,
            background: BACKGROUND,
        }
    }
}
