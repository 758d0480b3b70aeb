use super::constants::{CHECKSUM_OFFSET, PREAMBLE_LEN};
use super::error::PreambleError;

/// Computes the preamble checksum for a little-endian encoded payload length.
///
/// The checksum is the XOR of the four length bytes.
#[must_use]
#[inline]
pub const fn checksum(length: [u8; 4]) -> u8 {
    length[0] ^ length[1] ^ length[2] ^ length[3]
}

/// The five-byte preamble that precedes every packet payload.
///
/// Byte 0 carries the checksum and bytes 1 through 4 carry the payload length
/// in little-endian order. Decoding never rejects a preamble on checksum
/// grounds; callers inspect [`Preamble::has_valid_checksum`] (or call
/// [`Preamble::validate`]) and decide how to react.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Preamble {
    bytes: [u8; PREAMBLE_LEN],
}

impl Preamble {
    /// Builds the preamble announcing a payload of `payload_len` bytes.
    #[must_use]
    pub const fn for_payload(payload_len: u32) -> Self {
        let length = payload_len.to_le_bytes();
        Self {
            bytes: [checksum(length), length[0], length[1], length[2], length[3]],
        }
    }

    /// Wraps five raw preamble bytes exactly as received.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; PREAMBLE_LEN]) -> Self {
        Self { bytes }
    }

    /// Parses a preamble from the beginning of `bytes`.
    ///
    /// Only truncation is reported as an error. A mismatching checksum is
    /// preserved so that it can be surfaced by [`Preamble::validate`].
    pub fn decode(bytes: &[u8]) -> Result<Self, PreambleError> {
        if bytes.len() < PREAMBLE_LEN {
            return Err(PreambleError::Truncated {
                actual: bytes.len(),
            });
        }

        let mut raw = [0u8; PREAMBLE_LEN];
        raw.copy_from_slice(&bytes[..PREAMBLE_LEN]);
        Ok(Self::from_bytes(raw))
    }

    /// Returns the wire representation.
    #[must_use]
    #[inline]
    pub const fn encode(self) -> [u8; PREAMBLE_LEN] {
        self.bytes
    }

    /// Payload length announced by the preamble.
    #[must_use]
    #[inline]
    pub const fn payload_len(self) -> u32 {
        u32::from_le_bytes(self.length_bytes())
    }

    /// Checksum byte as transmitted.
    #[must_use]
    #[inline]
    pub const fn checksum(self) -> u8 {
        self.bytes[CHECKSUM_OFFSET]
    }

    /// Checksum recomputed from the length bytes.
    #[must_use]
    #[inline]
    pub const fn expected_checksum(self) -> u8 {
        checksum(self.length_bytes())
    }

    /// Reports whether the transmitted checksum matches the length bytes.
    #[must_use]
    #[inline]
    pub const fn has_valid_checksum(self) -> bool {
        self.checksum() == self.expected_checksum()
    }

    /// Returns the payload length after checking the checksum and `limit`.
    pub const fn validate(self, limit: u32) -> Result<u32, PreambleError> {
        if !self.has_valid_checksum() {
            return Err(PreambleError::ChecksumMismatch {
                expected: self.expected_checksum(),
                actual: self.checksum(),
            });
        }

        let len = self.payload_len();
        if len > limit {
            return Err(PreambleError::OversizedPayload { len, limit });
        }

        Ok(len)
    }

    const fn length_bytes(self) -> [u8; 4] {
        [self.bytes[1], self.bytes[2], self.bytes[3], self.bytes[4]]
    }
}

impl From<Preamble> for [u8; PREAMBLE_LEN] {
    #[inline]
    fn from(preamble: Preamble) -> Self {
        preamble.encode()
    }
}

impl From<[u8; PREAMBLE_LEN]> for Preamble {
    #[inline]
    fn from(bytes: [u8; PREAMBLE_LEN]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl TryFrom<&[u8]> for Preamble {
    type Error = PreambleError;

    #[inline]
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::decode(bytes)
    }
}
