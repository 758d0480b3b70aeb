//! Streaming transcoding between two charsets.
//!
//! A [`CharsetConverter`] is a per-transfer session. It carries the bytes of
//! a multi-byte sequence split across chunks over to the next call, pins the
//! source byte order once a BOM has been seen, and writes the target's BOM
//! only once per transfer unless told otherwise.

mod lookahead;


pub use lookahead::Lookahead;

use logging::trace_iconv;

use crate::charset::Charset;
use crate::codec::{self, Source};
use crate::error::{EncodingError, TranslationError, TranslationErrorKind};
use crate::registry::CharsetRegistry;

/// Converts a byte stream from one charset to another in chunks.
///
/// The converter is not shareable between transfers: create one per file or
/// stream, call [`convert`](Self::convert) for each chunk, then
/// [`finish`](Self::finish).
#[derive(Debug)]
pub struct CharsetConverter {
    from: Charset,
    to: Charset,
    ignore_bom: bool,
    bom_emitted: bool,
    underflow: Vec<u8>,
    /// Decoder state after BOM sniffing; `None` until the first bytes are consumed.
    source: Option<Source>,
    consumed: u64,
}

impl CharsetConverter {
    /// Creates a converter from `from` to `to`.
    #[must_use]
    pub const fn new(from: Charset, to: Charset) -> Self {
        Self {
            from,
            to,
            ignore_bom: true,
            bom_emitted: false,
            underflow: Vec::new(),
            source: None,
            consumed: 0,
        }
    }

    /// Creates a converter between two Perforce charset names.
    ///
    /// # Errors
    ///
    /// Fails when either name is unknown, is a sentinel, or has no platform
    /// encoding in this build.
    pub fn from_perforce_names(
        registry: &CharsetRegistry,
        from: &str,
        to: &str,
    ) -> Result<Self, EncodingError> {
        Ok(Self::new(registry.charset(from)?, registry.charset(to)?))
    }

    /// Source charset.
    #[must_use]
    pub const fn from_charset(&self) -> Charset {
        self.from
    }

    /// Target charset.
    #[must_use]
    pub const fn to_charset(&self) -> Charset {
        self.to
    }

    /// Source bytes consumed so far, excluding the retained underflow.
    #[must_use]
    pub const fn bytes_consumed(&self) -> u64 {
        self.consumed
    }

    /// Bytes of an incomplete sequence kept from the previous call.
    #[must_use]
    pub fn underflow(&self) -> &[u8] {
        &self.underflow
    }

    /// Discards the retained underflow bytes.
    pub fn clear_underflow(&mut self) {
        self.underflow.clear();
    }

    /// Whether a BOM-writing target writes its BOM only on the first output.
    #[must_use]
    pub const fn ignores_bom(&self) -> bool {
        self.ignore_bom
    }

    /// When `false`, every non-empty output to a BOM-writing target starts with a BOM.
    pub fn set_ignore_bom(&mut self, ignore: bool) {
        self.ignore_bom = ignore;
    }

    /// Returns the converter to its freshly constructed state.
    pub fn reset(&mut self) {
        self.bom_emitted = false;
        self.underflow.clear();
        self.source = None;
        self.consumed = 0;
    }

    /// Converts one chunk of source bytes.
    ///
    /// An incomplete multi-byte sequence at the end of the chunk is retained
    /// and prepended to the next call.
    ///
    /// # Errors
    ///
    /// Returns a [`TranslationError`] for malformed source bytes or characters
    /// the target charset cannot represent. The converter should be
    /// [`reset`](Self::reset) before it is reused.
    pub fn convert(&mut self, bytes: &[u8]) -> Result<Vec<u8>, TranslationError> {
        self.convert_chunk(bytes, None)
    }

    /// Converts one chunk, pulling extra bytes from `lookahead` after decoding.
    ///
    /// # Errors
    ///
    /// As [`convert`](Self::convert).
    pub fn convert_with_lookahead(
        &mut self,
        bytes: &[u8],
        lookahead: &mut dyn Lookahead,
    ) -> Result<Vec<u8>, TranslationError> {
        self.convert_chunk(bytes, Some(lookahead))
    }

    /// Encodes already decoded text into the target charset.
    ///
    /// # Errors
    ///
    /// Returns a [`TranslationError`] when the target cannot represent a
    /// character; the offset is the byte offset within `text`.
    pub fn convert_str(&mut self, text: &str) -> Result<Vec<u8>, TranslationError> {
        self.encode(text, None)
    }

    /// Ends the transfer.
    ///
    /// # Errors
    ///
    /// Reports [`TranslationErrorKind::Incomplete`] when the stream stopped
    /// inside a multi-byte sequence. The retained bytes are discarded either way.
    pub fn finish(&mut self) -> Result<(), TranslationError> {
        if self.underflow.is_empty() {
            return Ok(());
        }
        self.underflow.clear();
        Err(self.error(self.consumed, TranslationErrorKind::Incomplete))
    }

    fn convert_chunk(
        &mut self,
        bytes: &[u8],
        mut lookahead: Option<&mut dyn Lookahead>,
    ) -> Result<Vec<u8>, TranslationError> {
        let chunk_start = self.consumed;
        let mut buffer = std::mem::take(&mut self.underflow);
        buffer.extend_from_slice(bytes);

        let mut text = String::new();
        let mut rest = self.decode_into(&mut text, buffer)?;

        if let Some(provider) = lookahead.as_deref_mut() {
            while let Some(last) = text.chars().next_back() {
                let Some(more) = provider.more_bytes(last).filter(|more| !more.is_empty()) else {
                    break;
                };
                trace_iconv!("lookahead pulled {} bytes after {:?}", more.len(), last);
                let decoded_before = text.len();
                rest.extend_from_slice(&more);
                rest = self.decode_into(&mut text, rest)?;
                if text.len() == decoded_before {
                    break;
                }
            }
        }

        if !rest.is_empty() {
            trace_iconv!("retained {} underflow bytes", rest.len());
        }
        self.underflow = rest;
        self.encode(&text, Some(chunk_start))
    }

    /// Decodes the complete prefix of `buffer` into `text` and returns the rest.
    fn decode_into(
        &mut self,
        text: &mut String,
        mut buffer: Vec<u8>,
    ) -> Result<Vec<u8>, TranslationError> {
        let source = self.source.unwrap_or_else(|| self.from.source());
        let decoded = codec::decode_prefix(source, &buffer).map_err(|malformed| {
            self.error(
                self.consumed + malformed.start as u64,
                TranslationErrorKind::Malformed,
            )
        })?;

        if decoded.consumed > 0 {
            self.source = Some(decoded.next);
            self.consumed += decoded.consumed as u64;
        }
        text.push_str(&decoded.text);
        buffer.drain(..decoded.consumed);
        Ok(buffer)
    }

    fn encode(&mut self, text: &str, chunk_start: Option<u64>) -> Result<Vec<u8>, TranslationError> {
        let with_bom = self.to.writes_bom()
            && !text.is_empty()
            && (!self.bom_emitted || !self.ignore_bom);

        let encoded = codec::encode_text(&self.to, text, with_bom).map_err(|unmappable| {
            let offset = chunk_start.unwrap_or(unmappable.offset as u64);
            self.error(offset, TranslationErrorKind::Unmappable(unmappable.ch))
        })?;

        if with_bom {
            self.bom_emitted = true;
        }
        Ok(encoded)
    }

    fn error(&self, offset: u64, kind: TranslationErrorKind) -> TranslationError {
        TranslationError::new(self.from.name(), self.to.name(), offset, kind)
    }
}
