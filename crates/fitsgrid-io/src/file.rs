//! Whole-file access: read bytes, inflate if needed, walk HDUs, pick an image.

use std::path::Path;

use ndarray::Array2;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::gzip::{gunzip, is_gzip};
use crate::hdu::{parse_hdus, Hdu};
use crate::image::read_image_2d;

/// A FITS file held in memory together with its parsed HDU table.
#[derive(Debug, Clone)]
pub struct FitsFile {
    bytes: Vec<u8>,
    hdus: Vec<Hdu>,
}

impl FitsFile {
    /// Read and parse a FITS file from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        debug!(path = %path.display(), len = bytes.len(), "read FITS file");
        Self::from_bytes(bytes)
    }

    /// Parse an in-memory FITS byte stream, inflating gzip-wrapped input.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let bytes = if is_gzip(&bytes) {
            let inflated = gunzip(&bytes)?;
            debug!(
                compressed = bytes.len(),
                inflated = inflated.len(),
                "inflated gzip stream"
            );
            inflated
        } else {
            bytes
        };
        let hdus = parse_hdus(&bytes)?;
        Ok(FitsFile { bytes, hdus })
    }

    /// All HDUs, primary first.
    pub fn hdus(&self) -> &[Hdu] {
        &self.hdus
    }

    /// Index of the first HDU carrying non-empty image data.
    pub fn first_image_index(&self) -> Option<usize> {
        self.hdus.iter().position(Hdu::has_image_data)
    }

    /// Read the HDU at `index` as a calibrated 2D array.
    pub fn read_2d(&self, index: usize) -> Result<Array2<f64>> {
        let hdu = self.hdus.get(index).ok_or(Error::HduOutOfRange {
            index,
            count: self.hdus.len(),
        })?;
        if !hdu.has_image_data() {
            return Err(Error::NotAnImage(index));
        }
        read_image_2d(&self.bytes, hdu)
    }

    /// Read the first image HDU as a 2D array.
    pub fn read_first_2d(&self) -> Result<Array2<f64>> {
        let index = self.first_image_index().ok_or(Error::NoImage)?;
        self.read_2d(index)
    }
}

/// Load a 2D image from `path`.
///
/// With `hdu = None` the first HDU holding image data is used, skipping an
/// empty primary array; otherwise the given HDU index is read.
pub fn load_image(path: impl AsRef<Path>, hdu: Option<usize>) -> Result<Array2<f64>> {
    let path = path.as_ref();
    let file = FitsFile::open(path)?;
    let index = match hdu {
        Some(index) => index,
        None => file.first_image_index().ok_or(Error::NoImage)?,
    };
    let image = file.read_2d(index)?;
    let (height, width) = image.dim();
    info!(path = %path.display(), hdu = index, width, height, "loaded image");
    Ok(image)
}
