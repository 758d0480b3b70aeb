use ::core::fmt;

use encoding_rs::{Encoding, UTF_8, UTF_16BE, UTF_16LE};

use crate::codec::{self, BomHandling, Source};
use crate::codepage::{self, CodePage};
use crate::error::{EncodingError, TranslationError, TranslationErrorKind};

/// Byte order of a 16- or 32-bit Unicode encoding.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ByteOrder {
    /// Most significant byte first.
    Big,
    /// Least significant byte first.
    Little,
}

impl ByteOrder {
    /// Byte order of the running platform.
    #[must_use]
    pub const fn native() -> Self {
        if cfg!(target_endian = "little") {
            Self::Little
        } else {
            Self::Big
        }
    }

    /// The UTF-16 byte-order mark in this order.
    #[must_use]
    pub const fn bom(self) -> [u8; 2] {
        match self {
            Self::Big => [0xFE, 0xFF],
            Self::Little => [0xFF, 0xFE],
        }
    }

    /// The UTF-32 byte-order mark in this order.
    #[must_use]
    pub const fn bom32(self) -> [u8; 4] {
        match self {
            Self::Big => [0x00, 0x00, 0xFE, 0xFF],
            Self::Little => [0xFF, 0xFE, 0x00, 0x00],
        }
    }

    pub(crate) const fn unit_bytes(self, unit: u16) -> [u8; 2] {
        match self {
            Self::Big => unit.to_be_bytes(),
            Self::Little => unit.to_le_bytes(),
        }
    }

    pub(crate) const fn unit32_bytes(self, unit: u32) -> [u8; 4] {
        match self {
            Self::Big => unit.to_be_bytes(),
            Self::Little => unit.to_le_bytes(),
        }
    }

    pub(crate) const fn read_unit32(self, bytes: [u8; 4]) -> u32 {
        match self {
            Self::Big => u32::from_be_bytes(bytes),
            Self::Little => u32::from_le_bytes(bytes),
        }
    }

    fn utf16_encoding(self) -> &'static Encoding {
        match self {
            Self::Big => UTF_16BE,
            Self::Little => UTF_16LE,
        }
    }
}

/// How a [`Charset`] maps text to bytes.
///
/// For the UTF-16 and UTF-32 forms `None` is the unmarked form, whose order
/// is taken from a BOM when decoding and is native otherwise.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub(crate) enum Form {
    Encoding(&'static Encoding),
    /// ISO-8859-1 proper: every byte is the code point of the same value.
    Latin1,
    Utf16(Option<ByteOrder>),
    Utf32(Option<ByteOrder>),
    CodePage(&'static CodePage),
}

/// A resolved platform encoding.
///
/// Wraps an [`encoding_rs`] encoding and adds what it lacks: the unmarked
/// `UTF-16` form, the UTF-32 forms, true ISO-8859-1 and a few DOS code pages.
/// Unicode charsets also carry a preference for writing a byte-order mark at
/// the start of converted output.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Charset {
    form: Form,
    bom: bool,
}

impl Charset {
    /// UTF-8, without a byte-order mark.
    #[must_use]
    pub fn utf8() -> Self {
        Self::with_form(Form::Encoding(UTF_8))
    }

    /// Resolves a platform encoding name or label.
    ///
    /// UTF-16 and UTF-32 forms prefer a byte-order mark; everything else does
    /// not. Use [`with_bom`](Self::with_bom) to change that.
    pub fn for_name(name: &str) -> Result<Self, EncodingError> {
        let normalized = name.trim().to_ascii_lowercase();
        let form = match normalized.as_str() {
            "utf-16" | "utf16" => Form::Utf16(None),
            "utf-16be" | "utf16be" => Form::Utf16(Some(ByteOrder::Big)),
            "utf-16le" | "utf16le" => Form::Utf16(Some(ByteOrder::Little)),
            "utf-32" | "utf32" => Form::Utf32(None),
            "utf-32be" | "utf32be" => Form::Utf32(Some(ByteOrder::Big)),
            "utf-32le" | "utf32le" => Form::Utf32(Some(ByteOrder::Little)),
            "iso-8859-1" | "iso8859-1" | "iso_8859-1" | "iso_8859-1:1987" | "latin1" | "l1"
            | "cp819" | "ibm819" => Form::Latin1,
            label => match codepage::for_label(label) {
                Some(page) => Form::CodePage(page),
                None => {
                    let encoding = Encoding::for_label(label.as_bytes())
                        .filter(|encoding| *encoding != encoding_rs::REPLACEMENT)
                        .ok_or_else(|| EncodingError::UnsupportedEncoding(name.to_owned()))?;
                    return Ok(Self::from_encoding(encoding));
                }
            },
        };
        Ok(Self::with_form(form))
    }

    /// Wraps an [`encoding_rs`] encoding.
    #[must_use]
    pub fn from_encoding(encoding: &'static Encoding) -> Self {
        if encoding == UTF_16BE {
            Self::with_form(Form::Utf16(Some(ByteOrder::Big)))
        } else if encoding == UTF_16LE {
            Self::with_form(Form::Utf16(Some(ByteOrder::Little)))
        } else {
            Self::with_form(Form::Encoding(encoding))
        }
    }

    const fn with_form(form: Form) -> Self {
        Self {
            form,
            bom: matches!(form, Form::Utf16(_) | Form::Utf32(_)),
        }
    }

    /// Sets whether converted output starts with a byte-order mark.
    ///
    /// Ignored for charsets that have no byte-order mark.
    #[must_use]
    pub fn with_bom(self, bom: bool) -> Self {
        Self {
            bom: bom && self.is_unicode(),
            ..self
        }
    }

    /// Reports whether converted output starts with a byte-order mark.
    #[must_use]
    pub const fn writes_bom(&self) -> bool {
        self.bom
    }

    /// Canonical name of the encoding.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self.form {
            Form::Encoding(encoding) => encoding.name(),
            Form::Latin1 => "ISO-8859-1",
            Form::Utf16(None) => "UTF-16",
            Form::Utf16(Some(order)) => order.utf16_encoding().name(),
            Form::Utf32(None) => "UTF-32",
            Form::Utf32(Some(ByteOrder::Big)) => "UTF-32BE",
            Form::Utf32(Some(ByteOrder::Little)) => "UTF-32LE",
            Form::CodePage(page) => page.name(),
        }
    }

    /// Underlying [`encoding_rs`] encoding, for the forms backed by one.
    #[must_use]
    pub fn encoding(&self) -> Option<&'static Encoding> {
        match self.form {
            Form::Encoding(encoding) => Some(encoding),
            Form::Utf16(order) => Some(order.unwrap_or_else(ByteOrder::native).utf16_encoding()),
            Form::Latin1 | Form::Utf32(_) | Form::CodePage(_) => None,
        }
    }

    pub(crate) const fn form(&self) -> Form {
        self.form
    }

    /// Reports whether this is UTF-8.
    #[must_use]
    pub fn is_utf8(&self) -> bool {
        matches!(self.form, Form::Encoding(encoding) if encoding == UTF_8)
    }

    /// Reports whether this is a 16-bit Unicode encoding.
    #[must_use]
    pub const fn is_utf16(&self) -> bool {
        matches!(self.form, Form::Utf16(_))
    }

    /// Reports whether this is a 32-bit Unicode encoding.
    #[must_use]
    pub const fn is_utf32(&self) -> bool {
        matches!(self.form, Form::Utf32(_))
    }

    /// Reports whether this is UTF-8, UTF-16 or UTF-32.
    #[must_use]
    pub fn is_unicode(&self) -> bool {
        self.is_utf8() || self.is_utf16() || self.is_utf32()
    }

    /// Byte order used when encoding to a UTF-16 form.
    ///
    /// The unmarked form writes the platform's native order.
    #[must_use]
    pub fn utf16_output_order(&self) -> Option<ByteOrder> {
        match self.form {
            Form::Utf16(order) => Some(order.unwrap_or_else(ByteOrder::native)),
            _ => None,
        }
    }

    /// Byte order used when encoding to a UTF-32 form.
    #[must_use]
    pub fn utf32_output_order(&self) -> Option<ByteOrder> {
        match self.form {
            Form::Utf32(order) => Some(order.unwrap_or_else(ByteOrder::native)),
            _ => None,
        }
    }

    /// Decoder state for the start of a stream in this charset.
    pub(crate) fn source(&self) -> Source {
        let bom = match self.form {
            Form::Utf16(None) | Form::Utf32(None) => BomHandling::Sniff,
            _ if self.is_unicode() => BomHandling::Remove,
            _ => BomHandling::Keep,
        };
        match self.form {
            Form::Encoding(encoding) => Source::Encoding(encoding, bom),
            Form::Utf16(order) => {
                Source::Encoding(order.unwrap_or_else(ByteOrder::native).utf16_encoding(), bom)
            }
            Form::Utf32(order) => Source::Utf32(order.unwrap_or_else(ByteOrder::native), bom),
            Form::Latin1 => Source::Latin1,
            Form::CodePage(page) => Source::CodePage(page),
        }
    }

    /// Decodes a complete buffer, removing a leading BOM for Unicode forms.
    pub fn decode(&self, bytes: &[u8]) -> Result<String, TranslationError> {
        let malformed = |start: usize| {
            TranslationError::new(
                self.name(),
                Self::utf8().name(),
                start as u64,
                TranslationErrorKind::Malformed,
            )
        };
        let decoded =
            codec::decode_prefix(self.source(), bytes).map_err(|bad| malformed(bad.start))?;
        if decoded.consumed < bytes.len() {
            return Err(malformed(decoded.consumed));
        }
        Ok(decoded.text)
    }

    /// Encodes text without a byte-order mark.
    pub fn encode_str(&self, text: &str) -> Result<Vec<u8>, TranslationError> {
        codec::encode_text(self, text, false).map_err(|unmappable| {
            TranslationError::new(
                Self::utf8().name(),
                self.name(),
                unmappable.offset as u64,
                TranslationErrorKind::Unmappable(unmappable.ch),
            )
        })
    }
}

impl Default for Charset {
    fn default() -> Self {
        Self::utf8()
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
