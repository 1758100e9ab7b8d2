//! Inflating gzip-wrapped FITS files (`.fits.gz`).

use crate::error::{Error, Result};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const DEFLATE_METHOD: u8 = 0x08;

const FHCRC: u8 = 0x02;
const FEXTRA: u8 = 0x04;
const FNAME: u8 = 0x08;
const FCOMMENT: u8 = 0x10;

/// Returns `true` if `data` starts with the gzip magic bytes.
pub fn is_gzip(data: &[u8]) -> bool {
    data.starts_with(&GZIP_MAGIC)
}

fn skip_zero_terminated(data: &[u8], pos: usize) -> Result<usize> {
    let rest = data.get(pos..).ok_or(Error::Decompression)?;
    let nul = rest.iter().position(|&b| b == 0).ok_or(Error::Decompression)?;
    Ok(pos + nul + 1)
}

/// Strip the gzip header and trailer, returning the raw deflate payload.
fn deflate_payload(data: &[u8]) -> Result<&[u8]> {
    if data.len() < 18 || !is_gzip(data) || data[2] != DEFLATE_METHOD {
        return Err(Error::Decompression);
    }
    let flags = data[3];
    let mut pos = 10usize;
    if flags & FEXTRA != 0 {
        let xlen = data
            .get(pos..pos + 2)
            .map(|b| u16::from_le_bytes([b[0], b[1]]) as usize)
            .ok_or(Error::Decompression)?;
        pos += 2 + xlen;
    }
    if flags & FNAME != 0 {
        pos = skip_zero_terminated(data, pos)?;
    }
    if flags & FCOMMENT != 0 {
        pos = skip_zero_terminated(data, pos)?;
    }
    if flags & FHCRC != 0 {
        pos += 2;
    }
    // 8-byte trailer: CRC32 + ISIZE.
    if data.len() < pos + 8 {
        return Err(Error::Decompression);
    }
    Ok(&data[pos..data.len() - 8])
}

/// Inflate a single-member gzip stream.
pub fn gunzip(data: &[u8]) -> Result<Vec<u8>> {
    let payload = deflate_payload(data)?;
    miniz_oxide::inflate::decompress_to_vec(payload).map_err(|_| Error::Decompression)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Wrap a deflate stream in a minimal gzip member.
    fn gzip(raw: &[u8], name: Option<&str>) -> Vec<u8> {
        let mut out = vec![0x1f, 0x8b, 0x08, 0, 0, 0, 0, 0, 0, 0xff];
        if let Some(name) = name {
            out[3] = FNAME;
            out.extend_from_slice(name.as_bytes());
            out.push(0);
        }
        out.extend(miniz_oxide::deflate::compress_to_vec(raw, 6));
        // CRC is not checked on read; ISIZE is informational.
        out.extend_from_slice(&[0, 0, 0, 0]);
        out.extend_from_slice(&(raw.len() as u32).to_le_bytes());
        out
    }

    #[test]
    fn detects_magic() {
        assert!(is_gzip(&[0x1f, 0x8b, 0x08]));
        assert!(!is_gzip(b"SIMPLE  ="));
        assert!(!is_gzip(&[]));
    }

    #[test]
    fn inflates_plain_member() {
        let raw = b"SIMPLE  =                    T".repeat(100);
        assert_eq!(gunzip(&gzip(&raw, None)).unwrap(), raw);
    }

    #[test]
    fn inflates_member_with_file_name() {
        let raw = vec![7u8; 5000];
        assert_eq!(gunzip(&gzip(&raw, Some("image.fits"))).unwrap(), raw);
    }

    #[test]
    fn rejects_truncated_stream() {
        let data = gzip(&[1, 2, 3], None);
        assert!(matches!(gunzip(&data[..12]), Err(Error::Decompression)));
    }

    #[test]
    fn rejects_unterminated_name() {
        let mut data = vec![0x1f, 0x8b, 0x08, FNAME, 0, 0, 0, 0, 0, 0xff];
        data.extend(vec![b'a'; 20]);
        assert!(matches!(gunzip(&data), Err(Error::Decompression)));
    }
}
