use ::core::fmt;
use std::io;

/// Errors raised while resolving charset names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    /// The name is not a Perforce charset identifier.
    #[error("unknown charset: {0}")]
    UnknownCharset(String),

    /// The platform encoding behind a name is not available.
    #[error("unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    /// A pass-through sentinel was used where a concrete encoding is needed.
    #[error("charset '{0}' is a sentinel and has no platform encoding")]
    Sentinel(String),
}

/// Why a byte sequence could not be translated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationErrorKind {
    /// The source bytes are not valid in the source charset.
    Malformed,
    /// A character has no representation in the target charset.
    Unmappable(char),
    /// The stream ended in the middle of a multi-byte sequence.
    Incomplete,
}

impl fmt::Display for TranslationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => f.write_str("malformed input"),
            Self::Unmappable(ch) => write!(f, "unmappable character U+{:04X}", u32::from(*ch)),
            Self::Incomplete => f.write_str("incomplete trailing sequence"),
        }
    }
}

/// A translation failure inside a byte stream.
///
/// The offset counts source bytes from the start of the stream. For
/// [`TranslationErrorKind::Unmappable`] it is the offset of the chunk that
/// contained the character rather than of the character itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot translate from {from} to {to} at byte {offset}: {kind}")]
pub struct TranslationError {
    from: String,
    to: String,
    offset: u64,
    kind: TranslationErrorKind,
}

impl TranslationError {
    pub(crate) fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        offset: u64,
        kind: TranslationErrorKind,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            offset,
            kind,
        }
    }

    /// Source charset name.
    #[must_use]
    pub fn from_charset(&self) -> &str {
        &self.from
    }

    /// Target charset name.
    #[must_use]
    pub fn to_charset(&self) -> &str {
        &self.to
    }

    /// Byte offset in the source stream.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    /// Failure category.
    #[must_use]
    pub const fn kind(&self) -> TranslationErrorKind {
        self.kind
    }
}

impl From<TranslationError> for io::Error {
    fn from(err: TranslationError) -> Self {
        Self::new(io::ErrorKind::InvalidData, err)
    }
}

impl From<EncodingError> for io::Error {
    fn from(err: EncodingError) -> Self {
        Self::new(io::ErrorKind::InvalidInput, err)
    }
}
