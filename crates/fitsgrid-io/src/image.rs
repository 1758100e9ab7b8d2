//! Image data reading for FITS HDUs.
//!
//! Pixel data is decoded from big-endian on-disk bytes into typed vectors,
//! then calibrated into physical `f64` values laid out as a row-major
//! `(NAXIS2, NAXIS1)` array.

use bytemuck::pod_collect_to_vec;
use ndarray::Array2;

use crate::block::{padded_byte_len, DATA_PAD_BYTE};
use crate::error::{Error, Result};
use crate::hdu::{Hdu, HduInfo};
use crate::header::{card_float, card_integer, serialize_header, Card};
use crate::value::Value;

/// Image pixel data extracted from a FITS HDU, typed by BITPIX.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageData {
    U8(Vec<u8>),
    I16(Vec<i16>),
    I32(Vec<i32>),
    I64(Vec<i64>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

impl ImageData {
    /// BITPIX value matching this variant.
    pub fn bitpix(&self) -> i64 {
        match self {
            ImageData::U8(_) => 8,
            ImageData::I16(_) => 16,
            ImageData::I32(_) => 32,
            ImageData::I64(_) => 64,
            ImageData::F32(_) => -32,
            ImageData::F64(_) => -64,
        }
    }

    /// Number of pixels.
    pub fn len(&self) -> usize {
        match self {
            ImageData::U8(v) => v.len(),
            ImageData::I16(v) => v.len(),
            ImageData::I32(v) => v.len(),
            ImageData::I64(v) => v.len(),
            ImageData::F32(v) => v.len(),
            ImageData::F64(v) => v.len(),
        }
    }

    /// Returns `true` if there are no pixels.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Physical pixel calibration from the image header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    /// BSCALE, 1.0 when absent.
    pub bscale: f64,
    /// BZERO, 0.0 when absent.
    pub bzero: f64,
    /// BLANK sentinel for integer images.
    pub blank: Option<i64>,
}

impl Calibration {
    /// Read BSCALE, BZERO and BLANK from header cards.
    pub fn from_cards(cards: &[Card]) -> Self {
        Calibration {
            bscale: card_float(cards, "BSCALE").unwrap_or(1.0),
            bzero: card_float(cards, "BZERO").unwrap_or(0.0),
            blank: card_integer(cards, "BLANK"),
        }
    }

    fn apply(&self, raw: f64) -> f64 {
        self.bzero + self.bscale * raw
    }

    fn apply_int(&self, raw: i64) -> f64 {
        if self.blank == Some(raw) {
            f64::NAN
        } else {
            self.apply(raw as f64)
        }
    }
}

fn image_shape(hdu: &Hdu) -> Result<(i64, &[usize])> {
    match &hdu.info {
        HduInfo::Image { bitpix, naxes } => Ok((*bitpix, naxes)),
        HduInfo::Other { .. } => Err(Error::InvalidHeader("not an image HDU")),
    }
}

/// Read raw image pixel data from a FITS byte stream for the given HDU.
pub fn read_image_data(fits_data: &[u8], hdu: &Hdu) -> Result<ImageData> {
    let (bitpix, _) = image_shape(hdu)?;
    let end = hdu
        .data_start
        .checked_add(hdu.data_len)
        .ok_or(Error::UnexpectedEof)?;
    let raw = fits_data
        .get(hdu.data_start..end)
        .ok_or(Error::UnexpectedEof)?;

    // pod_collect_to_vec copies into an aligned buffer; each element is
    // then swapped from big-endian in place.
    Ok(match bitpix {
        8 => ImageData::U8(raw.to_vec()),
        16 => {
            let mut pixels: Vec<i16> = pod_collect_to_vec(raw);
            pixels.iter_mut().for_each(|v| *v = i16::from_be(*v));
            ImageData::I16(pixels)
        }
        32 => {
            let mut pixels: Vec<i32> = pod_collect_to_vec(raw);
            pixels.iter_mut().for_each(|v| *v = i32::from_be(*v));
            ImageData::I32(pixels)
        }
        64 => {
            let mut pixels: Vec<i64> = pod_collect_to_vec(raw);
            pixels.iter_mut().for_each(|v| *v = i64::from_be(*v));
            ImageData::I64(pixels)
        }
        -32 => {
            let mut pixels: Vec<f32> = pod_collect_to_vec(raw);
            pixels
                .iter_mut()
                .for_each(|v| *v = f32::from_bits(u32::from_be(v.to_bits())));
            ImageData::F32(pixels)
        }
        -64 => {
            let mut pixels: Vec<f64> = pod_collect_to_vec(raw);
            pixels
                .iter_mut()
                .for_each(|v| *v = f64::from_bits(u64::from_be(v.to_bits())));
            ImageData::F64(pixels)
        }
        other => return Err(Error::InvalidBitpix(other)),
    })
}

/// Convert raw pixels into physical values.
///
/// Integer pixels equal to BLANK become NaN; float pixels keep their own
/// NaNs.
pub fn to_physical(data: &ImageData, cal: &Calibration) -> Vec<f64> {
    match data {
        ImageData::U8(v) => v.iter().map(|&p| cal.apply_int(p as i64)).collect(),
        ImageData::I16(v) => v.iter().map(|&p| cal.apply_int(p as i64)).collect(),
        ImageData::I32(v) => v.iter().map(|&p| cal.apply_int(p as i64)).collect(),
        ImageData::I64(v) => v.iter().map(|&p| cal.apply_int(p)).collect(),
        ImageData::F32(v) => v.iter().map(|&p| cal.apply(p as f64)).collect(),
        ImageData::F64(v) => v.iter().map(|&p| cal.apply(p)).collect(),
    }
}

/// Read a 2D image HDU as a calibrated `(height, width)` array.
///
/// Fails with [`Error::NotTwoDimensional`] unless NAXIS is exactly 2.
pub fn read_image_2d(fits_data: &[u8], hdu: &Hdu) -> Result<Array2<f64>> {
    let (_, naxes) = image_shape(hdu)?;
    let &[width, height] = naxes else {
        return Err(Error::NotTwoDimensional(naxes.to_vec()));
    };

    let raw = read_image_data(fits_data, hdu)?;
    let physical = to_physical(&raw, &Calibration::from_cards(&hdu.cards));
    Array2::from_shape_vec((height, width), physical)
        .map_err(|_| Error::InvalidHeader("pixel count does not match NAXISn"))
}

// ── Writing ──

/// Serialize pixel data into a block-padded big-endian data segment.
pub fn serialize_image(data: &ImageData) -> Vec<u8> {
    let mut bytes: Vec<u8> = match data {
        ImageData::U8(v) => v.clone(),
        ImageData::I16(v) => v.iter().flat_map(|p| p.to_be_bytes()).collect(),
        ImageData::I32(v) => v.iter().flat_map(|p| p.to_be_bytes()).collect(),
        ImageData::I64(v) => v.iter().flat_map(|p| p.to_be_bytes()).collect(),
        ImageData::F32(v) => v.iter().flat_map(|p| p.to_be_bytes()).collect(),
        ImageData::F64(v) => v.iter().flat_map(|p| p.to_be_bytes()).collect(),
    };
    bytes.resize(padded_byte_len(bytes.len()), DATA_PAD_BYTE);
    bytes
}

/// Build the mandatory cards for a primary image header.
pub fn primary_image_cards(bitpix: i64, naxes: &[usize]) -> Vec<Card> {
    let mut cards = vec![
        Card::new("SIMPLE", Value::Logical(true)),
        Card::new("BITPIX", Value::Integer(bitpix)),
        Card::new("NAXIS", Value::Integer(naxes.len() as i64)),
    ];
    for (i, &dim) in naxes.iter().enumerate() {
        cards.push(Card::new(&format!("NAXIS{}", i + 1), Value::Integer(dim as i64)));
    }
    cards
}

/// Build a complete single-HDU FITS file holding `data` with the given axes.
///
/// `extra` cards (BSCALE, BLANK, ...) are appended after the mandatory ones.
pub fn build_image_hdu(naxes: &[usize], data: &ImageData, extra: &[Card]) -> Result<Vec<u8>> {
    let expected: usize = naxes.iter().product();
    if expected != data.len() {
        return Err(Error::InvalidHeader("pixel count does not match NAXISn"));
    }
    let mut cards = primary_image_cards(data.bitpix(), naxes);
    cards.extend_from_slice(extra);
    let mut bytes = serialize_header(&cards);
    bytes.extend(serialize_image(data));
    Ok(bytes)
}
