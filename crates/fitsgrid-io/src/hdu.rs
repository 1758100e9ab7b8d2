//! Walking the Header Data Units of a FITS byte stream.

use tracing::debug;

use crate::block::checked_padded_byte_len;
use crate::error::{Error, Result};
use crate::header::{card_integer, card_logical, card_string, parse_header_blocks, Card};

/// Describes the kind and shape of data in a single HDU.
#[derive(Debug, Clone, PartialEq)]
pub enum HduInfo {
    /// Primary array or IMAGE extension.
    Image {
        /// BITPIX value (8, 16, 32, 64, -32, -64).
        bitpix: i64,
        /// Axis dimensions (NAXIS1, NAXIS2, ...).
        naxes: Vec<usize>,
    },
    /// Anything else: tables, random groups, tile-compressed images.
    /// Their data segments are skipped.
    Other {
        /// XTENSION value, or `"GROUPS"` for a random-groups primary.
        kind: String,
    },
}

/// A single Header Data Unit parsed from a FITS byte stream.
#[derive(Debug, Clone)]
pub struct Hdu {
    /// Parsed metadata describing the HDU type and shape.
    pub info: HduInfo,
    /// Byte offset where the data segment begins.
    pub data_start: usize,
    /// Length of the data segment in bytes (unpadded).
    pub data_len: usize,
    /// All header cards parsed from this HDU.
    pub cards: Vec<Card>,
}

impl Hdu {
    /// Returns `true` if this is an image HDU with at least one pixel.
    pub fn has_image_data(&self) -> bool {
        matches!(self.info, HduInfo::Image { .. }) && self.data_len > 0
    }
}

fn naxes(cards: &[Card]) -> Result<Vec<usize>> {
    let naxis = card_integer(cards, "NAXIS").ok_or(Error::MissingKeyword("NAXIS"))?;
    if naxis < 0 {
        return Err(Error::InvalidHeader("negative NAXIS"));
    }
    (1..=naxis)
        .map(|i| {
            let dim = card_integer(cards, &format!("NAXIS{i}"))
                .ok_or(Error::MissingKeyword("NAXISn"))?;
            usize::try_from(dim).map_err(|_| Error::InvalidHeader("negative NAXISn"))
        })
        .collect()
}

fn bitpix(cards: &[Card]) -> Result<i64> {
    let bitpix = card_integer(cards, "BITPIX").ok_or(Error::MissingKeyword("BITPIX"))?;
    match bitpix {
        8 | 16 | 32 | 64 | -32 | -64 => Ok(bitpix),
        other => Err(Error::InvalidBitpix(other)),
    }
}

/// Data segment size: `|BITPIX|/8 * GCOUNT * (PCOUNT + NAXIS1 * ... * NAXISn)`.
///
/// For random groups NAXIS1 is 0 and is left out of the product.
fn data_byte_len(cards: &[Card], bitpix: i64, naxes: &[usize]) -> Result<usize> {
    if naxes.is_empty() {
        return Ok(0);
    }
    let groups = card_logical(cards, "GROUPS") == Some(true) && naxes[0] == 0;
    let axes = if groups { &naxes[1..] } else { naxes };
    let pixels = axes
        .iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .ok_or(Error::InvalidHeader("pixel count overflow"))?;

    let pcount = card_integer(cards, "PCOUNT").unwrap_or(0).max(0) as usize;
    let gcount = card_integer(cards, "GCOUNT").unwrap_or(1).max(1) as usize;
    let bytes_per_value = (bitpix.unsigned_abs() / 8) as usize;

    pixels
        .checked_add(pcount)
        .and_then(|n| n.checked_mul(gcount))
        .and_then(|n| n.checked_mul(bytes_per_value))
        .ok_or(Error::InvalidHeader("data size overflow"))
}

fn parse_hdu_info(cards: &[Card], is_primary: bool, naxes: Vec<usize>, bitpix: i64) -> HduInfo {
    if is_primary {
        if card_logical(cards, "GROUPS") == Some(true) && naxes.first() == Some(&0) {
            return HduInfo::Other {
                kind: String::from("GROUPS"),
            };
        }
        return HduInfo::Image { bitpix, naxes };
    }
    match card_string(cards, "XTENSION").as_deref() {
        Some("IMAGE") => HduInfo::Image { bitpix, naxes },
        Some(other) => HduInfo::Other {
            kind: other.to_string(),
        },
        None => HduInfo::Other {
            kind: String::new(),
        },
    }
}

/// Parse every HDU in a FITS byte stream.
///
/// The first HDU must begin with `SIMPLE`; subsequent HDUs must carry
/// `XTENSION`. Trailing bytes after the last complete HDU are ignored.
pub fn parse_hdus(data: &[u8]) -> Result<Vec<Hdu>> {
    let mut hdus = Vec::new();
    let mut offset = 0usize;

    while offset < data.len() {
        let (cards, header_len) = match parse_header_blocks(&data[offset..]) {
            Ok(parsed) => parsed,
            // Junk after the primary HDU is tolerated, like most readers do.
            Err(_) if !hdus.is_empty() => break,
            Err(e) => return Err(e),
        };

        let is_primary = hdus.is_empty();
        let first = cards.first().map(Card::keyword_str).unwrap_or("");
        match (is_primary, first) {
            (true, "SIMPLE") | (false, "XTENSION") => {}
            (true, _) => return Err(Error::MissingKeyword("SIMPLE")),
            (false, _) => break,
        }

        let bitpix = bitpix(&cards)?;
        let naxes = naxes(&cards)?;
        let data_len = data_byte_len(&cards, bitpix, &naxes)?;
        let data_start = offset + header_len;
        let info = parse_hdu_info(&cards, is_primary, naxes, bitpix);

        debug!(index = hdus.len(), ?info, data_len, "parsed HDU");

        hdus.push(Hdu {
            info,
            data_start,
            data_len,
            cards,
        });

        offset = checked_padded_byte_len(data_len)
            .and_then(|padded| data_start.checked_add(padded))
            .ok_or(Error::InvalidHeader("data size overflow"))?;
    }

    if hdus.is_empty() {
        return Err(Error::UnexpectedEof);
    }
    Ok(hdus)
}
