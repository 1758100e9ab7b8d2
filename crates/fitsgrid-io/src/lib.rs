//! Reading 2D images out of FITS files.
//!
//! The reader walks every HDU in a file, decodes big-endian pixel data for
//! all standard BITPIX types, applies BSCALE/BZERO calibration and maps BLANK
//! pixels to NaN. Gzip-wrapped files are inflated transparently.

pub mod block;
pub mod error;
pub mod file;
pub mod gzip;
pub mod hdu;
pub mod header;
pub mod image;
pub mod value;

pub use block::{BLOCK_SIZE, CARDS_PER_BLOCK, CARD_SIZE};
pub use error::{Error, Result};
pub use file::{load_image, FitsFile};
