//! Integration tests for reading images out of complete FITS files.

use fitsgrid_io::header::{serialize_header, Card};
use fitsgrid_io::image::{build_image_hdu, primary_image_cards, serialize_image, ImageData};
use fitsgrid_io::value::Value;
use fitsgrid_io::{load_image, Error, FitsFile};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn gzip(raw: &[u8]) -> Vec<u8> {
    let mut out = vec![0x1f, 0x8b, 0x08, 0, 0, 0, 0, 0, 0, 0xff];
    out.extend(miniz_oxide::deflate::compress_to_vec(raw, 6));
    out.extend_from_slice(&[0, 0, 0, 0]);
    out.extend_from_slice(&(raw.len() as u32).to_le_bytes());
    out
}

fn bintable_extension(rows: usize) -> Vec<u8> {
    let cards = vec![
        Card::new("XTENSION", Value::String("BINTABLE".into())),
        Card::new("BITPIX", Value::Integer(8)),
        Card::new("NAXIS", Value::Integer(2)),
        Card::new("NAXIS1", Value::Integer(4)),
        Card::new("NAXIS2", Value::Integer(rows as i64)),
        Card::new("PCOUNT", Value::Integer(0)),
        Card::new("GCOUNT", Value::Integer(1)),
        Card::new("TFIELDS", Value::Integer(1)),
        Card::new("TFORM1", Value::String("1J".into())),
    ];
    let mut bytes = serialize_header(&cards);
    bytes.extend(serialize_image(&ImageData::U8(vec![0xEE; 4 * rows])));
    bytes
}

fn image_extension(name: &str, width: usize, height: usize, fill: f32) -> Vec<u8> {
    let cards = vec![
        Card::new("XTENSION", Value::String("IMAGE".into())),
        Card::new("BITPIX", Value::Integer(-32)),
        Card::new("NAXIS", Value::Integer(2)),
        Card::new("NAXIS1", Value::Integer(width as i64)),
        Card::new("NAXIS2", Value::Integer(height as i64)),
        Card::new("PCOUNT", Value::Integer(0)),
        Card::new("GCOUNT", Value::Integer(1)),
        Card::new("EXTNAME", Value::String(name.into())),
    ];
    let mut bytes = serialize_header(&cards);
    bytes.extend(serialize_image(&ImageData::F32(vec![fill; width * height])));
    bytes
}

// ---------------------------------------------------------------------------
// HDU selection
// ---------------------------------------------------------------------------

#[test]
fn table_before_image_is_skipped() {
    let mut bytes = serialize_header(&primary_image_cards(8, &[]));
    bytes.extend(bintable_extension(100));
    bytes.extend(image_extension("SCI", 8, 6, 3.5));

    let file = FitsFile::from_bytes(bytes).unwrap();
    assert_eq!(file.hdus().len(), 3);
    assert_eq!(file.first_image_index(), Some(2));

    let img = file.read_first_2d().unwrap();
    assert_eq!(img.dim(), (6, 8));
    assert!(img.iter().all(|&v| v == 3.5));
}

#[test]
fn explicit_hdu_overrides_first_image() {
    let mut bytes = serialize_header(&primary_image_cards(8, &[]));
    bytes.extend(image_extension("SCI", 4, 4, 1.0));
    bytes.extend(image_extension("ERR", 4, 4, 2.0));

    let file = FitsFile::from_bytes(bytes).unwrap();
    assert_eq!(file.read_2d(2).unwrap()[[0, 0]], 2.0);
    assert_eq!(file.read_first_2d().unwrap()[[0, 0]], 1.0);
}

#[test]
fn table_only_file_has_no_image() {
    let mut bytes = serialize_header(&primary_image_cards(8, &[]));
    bytes.extend(bintable_extension(3));
    let file = FitsFile::from_bytes(bytes).unwrap();
    assert!(matches!(file.read_first_2d(), Err(Error::NoImage)));
    assert!(matches!(file.read_2d(1), Err(Error::NotAnImage(1))));
}

// ---------------------------------------------------------------------------
// On-disk loading
// ---------------------------------------------------------------------------

#[test]
fn gzip_file_on_disk() {
    let pixels: Vec<i16> = (0..20).collect();
    let raw = build_image_hdu(&[5, 4], &ImageData::I16(pixels), &[]).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frame.fits.gz");
    std::fs::write(&path, gzip(&raw)).unwrap();

    let img = load_image(&path, None).unwrap();
    assert_eq!(img.dim(), (4, 5));
    assert_eq!(img[[3, 4]], 19.0);
}

#[test]
fn cube_is_rejected() {
    let raw = build_image_hdu(&[2, 2, 3], &ImageData::F64(vec![0.0; 12]), &[]).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cube.fits");
    std::fs::write(&path, raw).unwrap();

    let err = load_image(&path, None).unwrap_err();
    assert!(matches!(err, Error::NotTwoDimensional(_)));
    assert_eq!(err.to_string(), "expected a 2D image, found axes [2, 2, 3]");
}

#[test]
fn text_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.fits");
    std::fs::write(&path, "this is not a FITS file\n".repeat(200)).unwrap();
    assert!(load_image(&path, None).is_err());
}

#[test]
fn calibrated_unsigned_16_bit() {
    // Unsigned 16-bit data is stored as signed with BZERO = 32768.
    let extra = [
        Card::new("BZERO", Value::Integer(32768)),
        Card::new("BSCALE", Value::Integer(1)),
    ];
    let stored: Vec<i16> = vec![-32768, 0, 32767, -32767];
    let raw = build_image_hdu(&[2, 2], &ImageData::I16(stored), &extra).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("u16.fits");
    std::fs::write(&path, raw).unwrap();

    let img = load_image(&path, Some(0)).unwrap();
    assert_eq!(img[[0, 0]], 0.0);
    assert_eq!(img[[0, 1]], 32768.0);
    assert_eq!(img[[1, 0]], 65535.0);
    assert_eq!(img[[1, 1]], 1.0);
}
