//! Writing rendered grids to disk.

use std::path::{Path, PathBuf};

use image::ImageFormat;
use tracing::info;

use crate::error::{Error, Result};
use crate::render::RenderedGrid;

const FITS_SUFFIXES: [&str; 3] = [".fits", ".fit", ".fts"];

/// File stem of `input` with `.gz` and the FITS extension removed.
fn fits_stem(input: &Path) -> String {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = name.strip_suffix(".gz").unwrap_or(&name);
    let lower = name.to_ascii_lowercase();
    FITS_SUFFIXES
        .iter()
        .find(|suffix| lower.ends_with(*suffix))
        .map(|suffix| &name[..name.len() - suffix.len()])
        .unwrap_or(name)
        .to_string()
}

/// Where the grid for `input` is written: `<dir>/<stem>.grid.png`, with
/// `dir` defaulting to the input's own directory.
pub fn grid_path(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let dir = output_dir
        .map(Path::to_path_buf)
        .or_else(|| input.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    dir.join(format!("{}.grid.png", fits_stem(input)))
}

/// Encode the grid canvas as PNG at `path`.
pub fn write_png(grid: &RenderedGrid, path: &Path) -> Result<()> {
    grid.canvas
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| Error::Output {
            path: path.to_path_buf(),
            source,
        })?;
    info!(path = %path.display(), "wrote grid");
    Ok(())
}
