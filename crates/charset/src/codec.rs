//! Streaming decode and encode primitives.
//!
//! Most charsets go through the [`encoding_rs`] streaming decoder and encoder.
//! ISO-8859-1, UTF-32 and the DOS code pages are handled here directly.

use encoding_rs::{Decoder, DecoderResult, Encoding, EncoderResult, UTF_8};

use crate::charset::{ByteOrder, Charset, Form};
use crate::codepage::CodePage;

/// Longest incomplete multi-byte tail kept between chunks.
pub(crate) const MAX_UNDERFLOW: usize = 4;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// How a decoder treats a byte-order mark at the start of its input.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum BomHandling {
    /// Pick the byte order from the BOM, falling back to the declared one.
    Sniff,
    /// Drop a BOM that matches the declared encoding.
    Remove,
    /// Treat a BOM as content.
    Keep,
}

/// Decoder state between chunks.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Source {
    Encoding(&'static Encoding, BomHandling),
    Latin1,
    Utf32(ByteOrder, BomHandling),
    CodePage(&'static CodePage),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Malformed {
    pub(crate) start: usize,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Unmappable {
    pub(crate) ch: char,
    pub(crate) offset: usize,
}

#[derive(Debug)]
pub(crate) struct Decoded {
    pub(crate) text: String,
    pub(crate) consumed: usize,
    /// State for the bytes after `consumed`, with any BOM already settled.
    pub(crate) next: Source,
}

pub(crate) fn new_decoder(encoding: &'static Encoding, bom: BomHandling) -> Decoder {
    match bom {
        BomHandling::Sniff => encoding.new_decoder(),
        BomHandling::Remove => encoding.new_decoder_with_bom_removal(),
        BomHandling::Keep => encoding.new_decoder_without_bom_handling(),
    }
}

/// Decodes `src` completely or stops at the first malformed sequence.
pub(crate) fn decode_all(
    decoder: &mut Decoder,
    src: &[u8],
    last: bool,
) -> Result<String, Malformed> {
    let mut out = String::new();
    let mut read_total = 0;
    loop {
        let remaining = &src[read_total..];
        let needed = decoder
            .max_utf8_buffer_length_without_replacement(remaining.len())
            .unwrap_or_else(|| remaining.len().saturating_mul(3).saturating_add(16));
        out.reserve(needed);

        let (result, read) = decoder.decode_to_string_without_replacement(remaining, &mut out, last);
        read_total += read;
        match result {
            DecoderResult::InputEmpty => return Ok(out),
            DecoderResult::OutputFull => {}
            DecoderResult::Malformed(bad, after) => {
                let start = read_total.saturating_sub(usize::from(bad) + usize::from(after));
                return Err(Malformed { start });
            }
        }
    }
}

/// Decodes the longest prefix of `bytes` that ends on a character boundary.
///
/// A short incomplete sequence at the very end is left unconsumed. Any other
/// malformed sequence is an error.
pub(crate) fn decode_prefix(source: Source, bytes: &[u8]) -> Result<Decoded, Malformed> {
    match source {
        Source::Encoding(encoding, bom) => decode_encoding_prefix(encoding, bom, bytes),
        Source::Utf32(order, bom) => decode_utf32_prefix(order, bom, bytes),
        Source::Latin1 => Ok(Decoded {
            text: encoding_rs::mem::decode_latin1(bytes).into_owned(),
            consumed: bytes.len(),
            next: source,
        }),
        Source::CodePage(page) => Ok(Decoded {
            text: page.decode(bytes),
            consumed: bytes.len(),
            next: source,
        }),
    }
}

fn decode_encoding_prefix(
    encoding: &'static Encoding,
    bom: BomHandling,
    bytes: &[u8],
) -> Result<Decoded, Malformed> {
    let mut decoder = new_decoder(encoding, bom);
    let malformed = match decode_all(&mut decoder, bytes, true) {
        Ok(text) => {
            return Ok(Decoded {
                text,
                consumed: bytes.len(),
                next: Source::Encoding(decoder.encoding(), BomHandling::Keep),
            });
        }
        Err(malformed) => malformed,
    };

    let tail = &bytes[malformed.start..];
    let (tail_encoding, tail_bom) = if malformed.start == 0 {
        (encoding, bom)
    } else {
        (decoder.encoding(), BomHandling::Keep)
    };
    if tail.len() > MAX_UNDERFLOW || !is_incomplete(tail_encoding, tail_bom, tail) {
        return Err(malformed);
    }

    let mut decoder = new_decoder(encoding, bom);
    let text = decode_all(&mut decoder, &bytes[..malformed.start], true)?;
    Ok(Decoded {
        text,
        consumed: malformed.start,
        next: Source::Encoding(decoder.encoding(), BomHandling::Keep),
    })
}

/// Reports whether `tail` is the start of a valid sequence that needs more input.
fn is_incomplete(encoding: &'static Encoding, bom: BomHandling, tail: &[u8]) -> bool {
    let mut decoder = new_decoder(encoding, bom);
    matches!(decode_all(&mut decoder, tail, false), Ok(text) if text.is_empty())
}

/// Decodes whole 4-byte units; up to three trailing bytes are left over.
fn decode_utf32_prefix(
    order: ByteOrder,
    bom: BomHandling,
    bytes: &[u8],
) -> Result<Decoded, Malformed> {
    let Some(head) = bytes.first_chunk::<4>() else {
        return Ok(Decoded {
            text: String::new(),
            consumed: 0,
            next: Source::Utf32(order, bom),
        });
    };

    let (order, start) = match bom {
        BomHandling::Sniff if *head == ByteOrder::Big.bom32() => (ByteOrder::Big, 4),
        BomHandling::Sniff if *head == ByteOrder::Little.bom32() => (ByteOrder::Little, 4),
        BomHandling::Remove if *head == order.bom32() => (order, 4),
        _ => (order, 0),
    };

    let units = bytes[start..].chunks_exact(4);
    let consumed = start + (bytes.len() - start) / 4 * 4;
    let mut text = String::with_capacity(consumed - start);
    for (index, unit) in units.enumerate() {
        let unit = [unit[0], unit[1], unit[2], unit[3]];
        let ch = char::from_u32(order.read_unit32(unit)).ok_or(Malformed {
            start: start + index * 4,
        })?;
        text.push(ch);
    }

    Ok(Decoded {
        text,
        consumed,
        next: Source::Utf32(order, BomHandling::Keep),
    })
}

/// Encodes `text` into `charset`, optionally preceded by its byte-order mark.
///
/// `with_bom` has no effect on charsets without one.
pub(crate) fn encode_text(
    charset: &Charset,
    text: &str,
    with_bom: bool,
) -> Result<Vec<u8>, Unmappable> {
    match charset.form() {
        Form::Utf16(order) => {
            let order = order.unwrap_or_else(ByteOrder::native);
            let mut out = Vec::with_capacity(text.len() * 2 + 2);
            if with_bom {
                out.extend_from_slice(&order.bom());
            }
            for unit in text.encode_utf16() {
                out.extend_from_slice(&order.unit_bytes(unit));
            }
            Ok(out)
        }
        Form::Utf32(order) => {
            let order = order.unwrap_or_else(ByteOrder::native);
            let mut out = Vec::with_capacity(text.len() * 4 + 4);
            if with_bom {
                out.extend_from_slice(&order.bom32());
            }
            for ch in text.chars() {
                out.extend_from_slice(&order.unit32_bytes(u32::from(ch)));
            }
            Ok(out)
        }
        Form::Latin1 => encode_single_byte(text, |ch| u8::try_from(ch).ok()),
        Form::CodePage(page) => encode_single_byte(text, |ch| page.encode_char(ch)),
        Form::Encoding(encoding) if encoding == UTF_8 => {
            let mut out = Vec::with_capacity(text.len() + UTF8_BOM.len());
            if with_bom {
                out.extend_from_slice(&UTF8_BOM);
            }
            out.extend_from_slice(text.as_bytes());
            Ok(out)
        }
        Form::Encoding(encoding) => encode_with(encoding, text),
    }
}

fn encode_single_byte(
    text: &str,
    map: impl Fn(char) -> Option<u8>,
) -> Result<Vec<u8>, Unmappable> {
    let mut out = Vec::with_capacity(text.len());
    for (offset, ch) in text.char_indices() {
        out.push(map(ch).ok_or(Unmappable { ch, offset })?);
    }
    Ok(out)
}

fn encode_with(encoding: &'static Encoding, text: &str) -> Result<Vec<u8>, Unmappable> {
    let mut encoder = encoding.new_encoder();
    let mut out = Vec::new();
    let mut read_total = 0;
    loop {
        let remaining = &text[read_total..];
        let needed = encoder
            .max_buffer_length_from_utf8_without_replacement(remaining.len())
            .unwrap_or_else(|| remaining.len().saturating_mul(4).saturating_add(16));
        out.reserve(needed);

        let (result, read) =
            encoder.encode_from_utf8_to_vec_without_replacement(remaining, &mut out, true);
        read_total += read;
        match result {
            EncoderResult::InputEmpty => return Ok(out),
            EncoderResult::OutputFull => {}
            EncoderResult::Unmappable(ch) => {
                return Err(Unmappable {
                    ch,
                    offset: read_total - ch.len_utf8(),
                });
            }
        }
    }
}
