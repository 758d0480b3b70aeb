mod constants;
mod error;
mod frame;

pub use constants::{CHECKSUM_OFFSET, MAX_PAYLOAD_LEN, PREAMBLE_LEN};
pub use error::PreambleError;
pub use frame::{Preamble, checksum};
