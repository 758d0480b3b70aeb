use std::io;

use thiserror::Error;

/// Failures encountered while encoding or decoding a packet payload.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum PacketError {
    /// A field ended before its name, length or value was complete.
    #[error("packet field at offset {offset} truncated while reading its {part}")]
    TruncatedField {
        /// Payload offset where the field starts.
        offset: usize,
        /// Which part of the field was incomplete.
        part: &'static str,
    },
    /// A field value was not followed by its terminating NUL byte.
    #[error("packet field '{name}' is missing its terminator")]
    MissingTerminator {
        /// Name of the offending field.
        name: String,
    },
    /// A field name was not valid UTF-8.
    #[error("packet field name at offset {offset} is not valid UTF-8")]
    InvalidFieldName {
        /// Payload offset where the field starts.
        offset: usize,
    },
    /// The payload carried no `func` field.
    #[error("packet has no 'func' field")]
    MissingFunction,
    /// The `func` value was not valid UTF-8.
    #[error("packet function name is not valid UTF-8")]
    InvalidFunctionName,
    /// A value is too long for the four-byte length field.
    #[error("packet field '{name}' value of {len} bytes exceeds the length field range")]
    OversizedField {
        /// Name of the offending field.
        name: String,
        /// Value length in bytes.
        len: usize,
    },
    /// The encoded payload is longer than the preamble can announce.
    #[error("packet payload of {len} bytes exceeds maximum {limit}")]
    OversizedPayload {
        /// Encoded payload length.
        len: usize,
        /// Accepted maximum.
        limit: u32,
    },
}

impl From<PacketError> for io::Error {
    fn from(err: PacketError) -> Self {
        let kind = match err {
            PacketError::OversizedField { .. } | PacketError::OversizedPayload { .. } => {
                io::ErrorKind::InvalidInput
            }
            _ => io::ErrorKind::InvalidData,
        };
        Self::new(kind, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_truncated_field() {
        let err = PacketError::TruncatedField {
            offset: 12,
            part: "length",
        };
        assert_eq!(
            err.to_string(),
            "packet field at offset 12 truncated while reading its length"
        );
    }

    #[test]
    fn decode_failures_map_to_invalid_data() {
        let err: io::Error = PacketError::MissingFunction.into();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn encode_failures_map_to_invalid_input() {
        let err: io::Error = PacketError::OversizedPayload { len: 10, limit: 5 }.into();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
