//! FITS header card parsing, lookup and writing.

use core::str;

use crate::block::{padded_byte_len, BLOCK_SIZE, CARDS_PER_BLOCK, CARD_SIZE, HEADER_PAD_BYTE};
use crate::error::{Error, Result};
use crate::value::{format_value, parse_value, Value};

// ── Types ──

/// A parsed FITS header card (one 80-byte keyword record).
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    /// The 8-byte keyword name, ASCII, left-justified, space-padded.
    pub keyword: [u8; 8],
    /// The parsed value, if this card has a value indicator (`= ` in bytes 8..10).
    pub value: Option<Value>,
    /// An optional comment string.
    pub comment: Option<String>,
}

impl Card {
    /// Build a valued card. Keywords longer than eight bytes are truncated.
    pub fn new(keyword: &str, value: Value) -> Self {
        Card {
            keyword: pad_keyword(keyword),
            value: Some(value),
            comment: None,
        }
    }

    /// Return the keyword as a trimmed UTF-8 string.
    pub fn keyword_str(&self) -> &str {
        let end = self
            .keyword
            .iter()
            .rposition(|&b| b != b' ')
            .map(|i| i + 1)
            .unwrap_or(0);
        str::from_utf8(&self.keyword[..end]).unwrap_or("")
    }

    /// Returns `true` if this card is the END keyword.
    pub fn is_end(&self) -> bool {
        &self.keyword == b"END     "
    }
}

/// Pad a keyword name to 8 bytes with trailing ASCII spaces.
pub fn pad_keyword(name: &str) -> [u8; 8] {
    let mut buf = [b' '; 8];
    let bytes = name.as_bytes();
    let len = bytes.len().min(8);
    buf[..len].copy_from_slice(&bytes[..len]);
    buf
}

// ── Parsing ──

fn is_commentary_keyword(keyword: &[u8; 8]) -> bool {
    matches!(keyword, b"COMMENT " | b"HISTORY " | b"        ")
}

fn free_text(bytes: &[u8]) -> Result<Option<String>> {
    let text = str::from_utf8(bytes)
        .map_err(|_| Error::InvalidHeader("non-ASCII card text"))?
        .trim_end();
    Ok((!text.is_empty()).then(|| text.to_string()))
}

/// Parse a single 80-byte FITS header card.
pub fn parse_card(card_bytes: &[u8; CARD_SIZE]) -> Result<Card> {
    let mut keyword = [b' '; 8];
    keyword.copy_from_slice(&card_bytes[..8]);

    if !keyword
        .iter()
        .all(|b| matches!(b, b'A'..=b'Z' | b'0'..=b'9' | b' ' | b'-' | b'_'))
    {
        return Err(Error::InvalidKeyword);
    }

    if &keyword == b"END     " {
        return Ok(Card {
            keyword,
            value: None,
            comment: None,
        });
    }

    let has_value = !is_commentary_keyword(&keyword) && &card_bytes[8..10] == b"= ";
    if !has_value {
        return Ok(Card {
            keyword,
            value: None,
            comment: free_text(&card_bytes[8..])?,
        });
    }

    let value_field = &card_bytes[10..];
    Ok(match parse_value(value_field) {
        Some((value, comment)) => Card {
            keyword,
            value: Some(value),
            comment: comment.map(String::from),
        },
        None => Card {
            keyword,
            value: None,
            comment: None,
        },
    })
}

/// Parse consecutive 2880-byte header blocks until the END card is found.
///
/// Returns the cards (END included) and the number of header bytes consumed,
/// which is always a multiple of [`BLOCK_SIZE`]. Trailing bytes shorter than
/// a full block are ignored.
pub fn parse_header_blocks(data: &[u8]) -> Result<(Vec<Card>, usize)> {
    if data.len() < BLOCK_SIZE {
        return Err(Error::UnexpectedEof);
    }

    let mut cards = Vec::new();
    let usable = data.len() / BLOCK_SIZE * BLOCK_SIZE;

    for chunk in data[..usable].chunks_exact(CARD_SIZE) {
        let card_bytes: &[u8; CARD_SIZE] = chunk
            .try_into()
            .map_err(|_| Error::InvalidHeader("short card"))?;
        let card = parse_card(card_bytes)?;
        let is_end = card.is_end();
        cards.push(card);
        if is_end {
            let header_len = padded_byte_len(cards.len() * CARD_SIZE);
            return Ok((cards, header_len));
        }
    }

    Err(Error::UnexpectedEof)
}

// ── Lookup ──

fn find_value<'a>(cards: &'a [Card], keyword: &str) -> Option<&'a Value> {
    cards
        .iter()
        .find(|c| c.keyword_str() == keyword)
        .and_then(|c| c.value.as_ref())
}

/// Integer value of the first card named `keyword`.
pub fn card_integer(cards: &[Card], keyword: &str) -> Option<i64> {
    find_value(cards, keyword).and_then(Value::as_integer)
}

/// Numeric value of the first card named `keyword`, integers promoted.
pub fn card_float(cards: &[Card], keyword: &str) -> Option<f64> {
    find_value(cards, keyword).and_then(Value::as_float)
}

/// String value of the first card named `keyword`, trimmed.
pub fn card_string(cards: &[Card], keyword: &str) -> Option<String> {
    match find_value(cards, keyword) {
        Some(Value::String(s)) => Some(s.trim().to_string()),
        _ => None,
    }
}

/// Logical value of the first card named `keyword`.
pub fn card_logical(cards: &[Card], keyword: &str) -> Option<bool> {
    match find_value(cards, keyword) {
        Some(Value::Logical(b)) => Some(*b),
        _ => None,
    }
}

// ── Writing ──

/// Serialize a [`Card`] into an 80-byte FITS card image.
pub fn format_card(card: &Card) -> [u8; CARD_SIZE] {
    let mut buf = [b' '; CARD_SIZE];
    buf[..8].copy_from_slice(&card.keyword);

    match (&card.value, &card.comment) {
        (Some(value), comment) => {
            buf[8] = b'=';
            buf[9] = b' ';
            buf[10..].copy_from_slice(&format_value(value));
            if let Some(comment) = comment {
                // Comments follow the fixed-format value column.
                let start = 10 + 21;
                let text = format!("/ {comment}");
                let len = text.len().min(CARD_SIZE - start);
                buf[start..start + len].copy_from_slice(&text.as_bytes()[..len]);
            }
        }
        (None, Some(comment)) => {
            let len = comment.len().min(CARD_SIZE - 8);
            buf[8..8 + len].copy_from_slice(&comment.as_bytes()[..len]);
        }
        (None, None) => {}
    }
    buf
}

/// Serialize header cards into complete FITS header blocks.
///
/// Appends the END card and pads the final block with spaces.
pub fn serialize_header(cards: &[Card]) -> Vec<u8> {
    let total_cards = cards.len() + 1;
    let total_bytes = total_cards.div_ceil(CARDS_PER_BLOCK) * BLOCK_SIZE;
    let mut buf = vec![HEADER_PAD_BYTE; total_bytes];

    for (i, card) in cards.iter().enumerate() {
        let offset = i * CARD_SIZE;
        buf[offset..offset + CARD_SIZE].copy_from_slice(&format_card(card));
    }

    let end_offset = cards.len() * CARD_SIZE;
    buf[end_offset..end_offset + 3].copy_from_slice(b"END");
    buf
}
