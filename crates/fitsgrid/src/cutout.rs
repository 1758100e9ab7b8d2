//! Fixed-size window extraction.

use ndarray::{s, Array2, ArrayView2};

use crate::config::{BoundaryMode, CutoutSize};
use crate::error::{Error, Result};
use crate::geometry::{SamplePosition, Span};

/// A window of exactly [`CutoutSize`] taken from an image.
///
/// `data` has shape `(height, width)` with row 0 at the bottom, like the
/// source image.
#[derive(Debug, Clone, PartialEq)]
pub struct Cutout {
    pub position: SamplePosition,
    pub data: Array2<f64>,
}

impl Cutout {
    /// Extract the window centered at `position`.
    ///
    /// The window spans `[pos - size/2, pos - size/2 + size)` on each axis.
    /// In [`BoundaryMode::Partial`] pixels outside the image are NaN; in
    /// [`BoundaryMode::Strict`] a window that leaves the image is a
    /// [`Error::Geometry`].
    pub fn extract(
        image: ArrayView2<'_, f64>,
        position: SamplePosition,
        size: CutoutSize,
        mode: BoundaryMode,
    ) -> Result<Self> {
        let (height, width) = image.dim();
        let xs = Span::centered(position.x, size.width);
        let ys = Span::centered(position.y, size.height);

        if mode == BoundaryMode::Strict && !(xs.inside(width) && ys.inside(height)) {
            return Err(Error::Geometry {
                width,
                height,
                x: position.x,
                y: position.y,
                cutout: size,
            });
        }

        let mut data = Array2::from_elem((size.height, size.width), f64::NAN);
        if let (Some((cols, col_off)), Some((rows, row_off))) =
            (xs.overlap(width), ys.overlap(height))
        {
            let (nrows, ncols) = (rows.len(), cols.len());
            data.slice_mut(s![row_off..row_off + nrows, col_off..col_off + ncols])
                .assign(&image.slice(s![rows, cols]));
        }

        Ok(Cutout { position, data })
    }

    /// Returns `true` if every pixel came from the image.
    pub fn is_complete(&self) -> bool {
        !self.data.iter().any(|v| v.is_nan())
    }
}
