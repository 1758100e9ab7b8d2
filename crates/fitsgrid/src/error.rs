use std::path::PathBuf;

use thiserror::Error;

use crate::config::CutoutSize;

/// Errors surfaced while rendering a grid.
#[derive(Debug, Error)]
pub enum Error {
    /// The file is missing, unreadable, or holds no 2D image.
    #[error("failed to load {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: fitsgrid_io::Error,
    },

    /// A cutout window does not fit inside the image (strict mode only).
    #[error(
        "{width}x{height} image cannot hold a {}x{} cutout at ({x}, {y})",
        .cutout.width,
        .cutout.height
    )]
    Geometry {
        width: usize,
        height: usize,
        x: i64,
        y: i64,
        cutout: CutoutSize,
    },

    /// The rendered grid could not be written.
    #[error("failed to write {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_geometry() {
        let e = Error::Geometry {
            width: 300,
            height: 200,
            x: 250,
            y: 100,
            cutout: CutoutSize::new(500, 500),
        };
        assert_eq!(
            e.to_string(),
            "300x200 image cannot hold a 500x500 cutout at (250, 100)"
        );
    }

    #[test]
    fn display_load_includes_path_and_cause() {
        let e = Error::Load {
            path: PathBuf::from("/data/frame.fits"),
            source: fitsgrid_io::Error::NoImage,
        };
        assert_eq!(
            e.to_string(),
            "failed to load /data/frame.fits: no image data found in any HDU"
        );
    }
}
