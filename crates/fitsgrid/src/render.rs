//! Composing nine background-subtracted cutouts into one grid image.

use std::path::Path;

use image::{GrayImage, Luma};
use ndarray::ArrayView2;
use tracing::{debug, info};

use crate::config::GridConfig;
use crate::cutout::Cutout;
use crate::error::{Error, Result};
use crate::geometry::{sample_positions, GRID_SIDE};
use crate::stats::subtract_median;

/// Output of one render: the nine cutouts after median subtraction, in
/// grid order, and the composed grayscale canvas.
#[derive(Debug, Clone)]
pub struct RenderedGrid {
    pub cutouts: Vec<Cutout>,
    pub canvas: GrayImage,
}

/// Renders 3x3 cutout grids under a fixed configuration.
#[derive(Debug, Clone)]
pub struct GridRenderer<'a> {
    config: &'a GridConfig,
}

impl<'a> GridRenderer<'a> {
    pub fn new(config: &'a GridConfig) -> Self {
        GridRenderer { config }
    }

    /// Load the image at `path` and render its grid.
    ///
    /// `hdu` selects a specific HDU; `None` takes the first one with image
    /// data.
    pub fn render(&self, path: &Path, hdu: Option<usize>) -> Result<RenderedGrid> {
        let image = fitsgrid_io::load_image(path, hdu).map_err(|source| Error::Load {
            path: path.to_path_buf(),
            source,
        })?;
        let grid = self.render_image(image.view())?;
        info!(path = %path.display(), "rendered grid");
        Ok(grid)
    }

    /// Render the grid for an in-memory `(height, width)` image.
    pub fn render_image(&self, image: ArrayView2<'_, f64>) -> Result<RenderedGrid> {
        let (height, width) = image.dim();
        let cfg = self.config;

        let cutouts = sample_positions(width, height, cfg.cutout)
            .into_iter()
            .map(|pos| {
                let mut cutout = Cutout::extract(image, pos, cfg.cutout, cfg.boundary)?;
                let median = subtract_median(&mut cutout.data);
                debug!(x = pos.x, y = pos.y, ?median, "extracted cutout");
                Ok(cutout)
            })
            .collect::<Result<Vec<_>>>()?;

        let canvas = self.compose(&cutouts);
        Ok(RenderedGrid { cutouts, canvas })
    }

    /// Lay the cutouts out row-major on a canvas with `gap`-pixel borders.
    ///
    /// Each cell is drawn with image row 0 at the bottom.
    fn compose(&self, cutouts: &[Cutout]) -> GrayImage {
        let cfg = self.config;
        let (cw, ch) = cfg.canvas_size();
        let mut canvas = GrayImage::from_pixel(cw as u32, ch as u32, Luma([cfg.background]));

        for (i, cutout) in cutouts.iter().enumerate() {
            let (row, col) = (i / GRID_SIDE, i % GRID_SIDE);
            let left = cfg.gap + col * (cfg.cutout.width + cfg.gap);
            let top = cfg.gap + row * (cfg.cutout.height + cfg.gap);
            let rows = cutout.data.nrows();

            for ((r, c), &v) in cutout.data.indexed_iter() {
                let level = cfg.norm.gray(v).unwrap_or(cfg.background);
                let x = left + c;
                let y = top + (rows - 1 - r);
                canvas.put_pixel(x as u32, y as u32, Luma([level]));
            }
        }
        canvas
    }
}
