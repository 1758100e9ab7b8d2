//! FITS record geometry: every header and data segment occupies whole
//! 2880-byte blocks.

pub const BLOCK_SIZE: usize = 2880;

/// One header card.
pub const CARD_SIZE: usize = 80;

pub const CARDS_PER_BLOCK: usize = BLOCK_SIZE / CARD_SIZE;

/// Headers are space-padded to a block boundary.
pub const HEADER_PAD_BYTE: u8 = b' ';

/// Data segments are zero-padded to a block boundary.
pub const DATA_PAD_BYTE: u8 = 0;

/// Bytes on disk taken by a segment of `len` bytes once padded.
pub const fn padded_byte_len(len: usize) -> usize {
    len.div_ceil(BLOCK_SIZE) * BLOCK_SIZE
}

/// [`padded_byte_len`] that returns `None` instead of overflowing.
pub const fn checked_padded_byte_len(len: usize) -> Option<usize> {
    len.div_ceil(BLOCK_SIZE).checked_mul(BLOCK_SIZE)
}
