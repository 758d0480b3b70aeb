use ::core::fmt;
use std::io;

use super::constants::PREAMBLE_LEN;

/// Failures encountered while validating a packet preamble.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PreambleError {
    /// Fewer than [`PREAMBLE_LEN`] bytes were provided.
    Truncated {
        /// Number of bytes that were available.
        actual: usize,
    },
    /// The checksum byte did not match the XOR of the length bytes.
    ChecksumMismatch {
        /// Checksum computed from the length bytes.
        expected: u8,
        /// Checksum byte found on the wire.
        actual: u8,
    },
    /// The declared payload length exceeds the configured limit.
    OversizedPayload {
        /// Declared length.
        len: u32,
        /// Accepted maximum.
        limit: u32,
    },
}

impl fmt::Display for PreambleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated { actual } => {
                write!(
                    f,
                    "packet preamble truncated: expected {PREAMBLE_LEN} bytes, got {actual}"
                )
            }
            Self::ChecksumMismatch { expected, actual } => {
                write!(
                    f,
                    "packet preamble checksum mismatch: expected {expected:#04x}, got {actual:#04x}"
                )
            }
            Self::OversizedPayload { len, limit } => {
                write!(f, "packet payload length {len} exceeds maximum {limit}")
            }
        }
    }
}

impl std::error::Error for PreambleError {}

impl From<PreambleError> for io::Error {
    fn from(err: PreambleError) -> Self {
        let kind = match err {
            PreambleError::Truncated { .. } => io::ErrorKind::UnexpectedEof,
            PreambleError::ChecksumMismatch { .. } | PreambleError::OversizedPayload { .. } => {
                io::ErrorKind::InvalidData
            }
        };
        Self::new(kind, err)
    }
}
