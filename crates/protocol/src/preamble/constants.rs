/// Number of bytes in the fixed preamble that precedes every payload.
pub const PREAMBLE_LEN: usize = 5;

/// Index of the checksum byte inside the preamble.
pub const CHECKSUM_OFFSET: usize = 0;

/// Largest payload length a server is expected to send.
///
/// The wire field is four bytes wide, but servers never exceed the signed
/// 32-bit range. Readers use this as the default acceptance limit.
pub const MAX_PAYLOAD_LEN: u32 = 0x7FFF_FFFF;
