mod codec;
mod error;
mod filter;
mod io;
pub mod keys;
mod params;

pub use codec::Packet;
pub use error::PacketError;
pub use filter::{BinaryFieldRule, FieldRule, FilterAction, KeepAll, PacketFilter};
pub use io::{read_frame, read_packet, write_frame, write_packet};
pub use params::ParameterMap;

#[cfg(test)]
mod tests;
