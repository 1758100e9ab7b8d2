use thiserror::Error;

/// All errors that can occur while reading a FITS image.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed FITS header block.
    #[error("invalid FITS header: {0}")]
    InvalidHeader(&'static str),
    /// Premature end of data while reading.
    #[error("unexpected end of file")]
    UnexpectedEof,
    /// Unrecognized BITPIX value.
    #[error("invalid BITPIX value: {0}")]
    InvalidBitpix(i64),
    /// Malformed keyword name in a header card.
    #[error("invalid keyword name")]
    InvalidKeyword,
    /// A required keyword was not found in the header.
    #[error("missing required keyword: {0}")]
    MissingKeyword(&'static str),
    /// A gzip-wrapped file could not be inflated.
    #[error("failed to decompress gzip stream")]
    Decompression,
    /// No HDU in the file carries image data.
    #[error("no image data found in any HDU")]
    NoImage,
    /// The selected HDU is an image but not a 2D one.
    #[error("expected a 2D image, found axes {0:?}")]
    NotTwoDimensional(Vec<usize>),
    /// The requested HDU is not an image HDU.
    #[error("HDU {0} is not an image")]
    NotAnImage(usize),
    /// The requested HDU index does not exist.
    #[error("HDU index {index} out of range (file has {count} HDUs)")]
    HduOutOfRange { index: usize, count: usize },
    /// An I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;
