//! Header value parsing and formatting.
//!
//! Only the value kinds an image header needs are modelled: logicals,
//! integers, floats and character strings. Complex values parse as `None`
//! and are treated as value-less cards by the header layer.

use core::str;

/// A parsed FITS header value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// FITS logical value (`T` or `F`).
    Logical(bool),
    /// FITS integer value.
    Integer(i64),
    /// FITS floating-point value.
    Float(f64),
    /// FITS character string (content between single quotes).
    String(String),
}

impl Value {
    /// Integer content, if this is an integer value.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric content promoted to `f64`; integers are accepted too.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(n) => Some(*n as f64),
            _ => None,
        }
    }
}

/// Find the ` /` comment separator and split the field there.
///
/// IDL and other writers omit the space after the slash, so only the space
/// before it is required.
fn split_comment(field: &[u8]) -> (&[u8], Option<&str>) {
    match find_separator(field) {
        Some(i) => (&field[..i], comment_after(field, i)),
        None => (field, None),
    }
}

fn find_separator(field: &[u8]) -> Option<usize> {
    field.windows(2).position(|w| w == b" /")
}

fn comment_after(field: &[u8], sep: usize) -> Option<&str> {
    let mut start = sep + 2;
    if field.get(start) == Some(&b' ') {
        start += 1;
    }
    str::from_utf8(&field[start..])
        .ok()
        .map(str::trim_end)
        .filter(|s| !s.is_empty())
}

/// Parse a quoted string value. `''` inside the quotes is a literal quote.
fn parse_string(field: &[u8]) -> (Value, Option<&str>) {
    let mut value = String::new();
    let mut i = 1;
    while i < field.len() {
        if field[i] == b'\'' {
            if field.get(i + 1) == Some(&b'\'') {
                value.push('\'');
                i += 2;
                continue;
            }
            i += 1;
            break;
        }
        value.push(field[i] as char);
        i += 1;
    }

    let remainder = &field[i.min(field.len())..];
    let comment = find_separator(remainder).and_then(|sep| comment_after(remainder, sep));
    (Value::String(value.trim_end().to_string()), comment)
}

/// Parse a float, accepting the Fortran `D` exponent.
fn parse_float_str(s: &str) -> Option<f64> {
    s.replace(['D', 'd'], "E").parse::<f64>().ok()
}

/// Parse a FITS header value from the 70-byte value portion of a card
/// (bytes 10..80). Returns the value and an optional comment.
///
/// Returns `None` for an empty (undefined) value or one this reader does
/// not model.
pub fn parse_value(value_bytes: &[u8]) -> Option<(Value, Option<&str>)> {
    let lead = value_bytes.iter().position(|&b| b != b' ')?;
    let field = &value_bytes[lead..];

    match field[0] {
        b'\'' => return Some(parse_string(field)),
        b'/' => return None,
        _ => {}
    }

    let (val_part, comment) = split_comment(field);
    let text = str::from_utf8(val_part).ok()?.trim();
    if text.is_empty() {
        return None;
    }

    match text {
        "T" => return Some((Value::Logical(true), comment)),
        "F" => return Some((Value::Logical(false), comment)),
        _ => {}
    }

    if !text.contains(['.', 'E', 'e', 'D', 'd']) {
        if let Ok(n) = text.parse::<i64>() {
            return Some((Value::Integer(n), comment));
        }
    }

    parse_float_str(text).map(|f| (Value::Float(f), comment))
}

/// Serialize a [`Value`] into the 70-byte field of a card.
///
/// Numbers and logicals are right-justified in the first 20 bytes (card
/// columns 11-30); strings start with a quote and are padded to at least
/// eight characters.
pub fn format_value(value: &Value) -> [u8; 70] {
    let mut buf = [b' '; 70];
    match value {
        Value::Logical(b) => buf[19] = if *b { b'T' } else { b'F' },
        Value::Integer(n) => right_justify(n.to_string().as_bytes(), &mut buf[..20]),
        Value::Float(f) => right_justify(format_float(*f).as_bytes(), &mut buf[..20]),
        Value::String(s) => {
            let mut quoted = String::from("'");
            quoted.push_str(&format!("{:<8}", s.replace('\'', "''")));
            quoted.truncate(69);
            quoted.push('\'');
            buf[..quoted.len()].copy_from_slice(quoted.as_bytes());
        }
    }
    buf
}

fn right_justify(src: &[u8], dest: &mut [u8]) {
    let len = src.len().min(dest.len());
    let start = dest.len() - len;
    dest[start..].copy_from_slice(&src[..len]);
}

fn format_float(f: f64) -> String {
    if f == 0.0 {
        return String::from("0.0");
    }
    let mut precision = 15usize;
    loop {
        let s = format!("{:.prec$E}", f, prec = precision);
        if s.len() <= 20 || precision == 0 {
            return s;
        }
        precision -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(s: &str) -> Vec<u8> {
        let mut v = s.as_bytes().to_vec();
        v.resize(70, b' ');
        v
    }

    #[test]
    fn parse_integer_right_justified() {
        let f = field("                  16 / bits per pixel");
        let (v, c) = parse_value(&f).unwrap();
        assert_eq!(v, Value::Integer(16));
        assert_eq!(c, Some("bits per pixel"));
    }

    #[test]
    fn parse_negative_integer() {
        let f = field("                 -32");
        assert_eq!(parse_value(&f).unwrap().0, Value::Integer(-32));
    }

    #[test]
    fn parse_logical() {
        let f = field("                   T / conforms");
        assert_eq!(parse_value(&f).unwrap().0, Value::Logical(true));
        let f = field("                   F");
        assert_eq!(parse_value(&f).unwrap().0, Value::Logical(false));
    }

    #[test]
    fn parse_float_with_d_exponent() {
        let f = field("            1.5D+02");
        assert_eq!(parse_value(&f).unwrap().0, Value::Float(150.0));
    }

    #[test]
    fn parse_float_plain() {
        let f = field("             32768.0 / offset");
        let (v, c) = parse_value(&f).unwrap();
        assert_eq!(v, Value::Float(32768.0));
        assert_eq!(c, Some("offset"));
    }

    #[test]
    fn parse_comment_without_trailing_space() {
        let f = field("                 -32 /No. of bits per pixel");
        let (v, c) = parse_value(&f).unwrap();
        assert_eq!(v, Value::Integer(-32));
        assert_eq!(c, Some("No. of bits per pixel"));
    }

    #[test]
    fn parse_string_trims_padding() {
        let f = field("'IMAGE   '           / extension type");
        let (v, c) = parse_value(&f).unwrap();
        assert_eq!(v, Value::String("IMAGE".into()));
        assert_eq!(c, Some("extension type"));
    }

    #[test]
    fn parse_string_with_doubled_quote() {
        let f = field("'O''HARA '");
        assert_eq!(parse_value(&f).unwrap().0, Value::String("O'HARA".into()));
    }

    #[test]
    fn parse_empty_is_none() {
        assert!(parse_value(&field("")).is_none());
        assert!(parse_value(&field("        / only a comment")).is_none());
    }

    #[test]
    fn parse_complex_is_not_modelled() {
        assert!(parse_value(&field("          (1.0, 2.0)")).is_none());
    }

    #[test]
    fn numeric_accessors() {
        assert_eq!(Value::Integer(3).as_float(), Some(3.0));
        assert_eq!(Value::Float(2.5).as_float(), Some(2.5));
        assert_eq!(Value::Float(2.5).as_integer(), None);
        assert_eq!(Value::Logical(true).as_float(), None);
    }

    #[test]
    fn format_integer_column_30() {
        let buf = format_value(&Value::Integer(-64));
        assert_eq!(&buf[17..20], b"-64");
        assert!(buf[..17].iter().all(|&b| b == b' '));
    }

    #[test]
    fn format_logical_column_30() {
        let buf = format_value(&Value::Logical(true));
        assert_eq!(buf[19], b'T');
    }

    #[test]
    fn format_string_pads_to_eight() {
        let buf = format_value(&Value::String("SCI".into()));
        assert_eq!(&buf[..10], b"'SCI     '");
    }

    #[test]
    fn formatted_values_parse_back() {
        for v in [
            Value::Integer(1500),
            Value::Float(0.125),
            Value::Float(-3.25e-7),
            Value::Logical(false),
            Value::String("it's".into()),
        ] {
            let buf = format_value(&v);
            assert_eq!(parse_value(&buf).unwrap().0, v);
        }
    }
}
