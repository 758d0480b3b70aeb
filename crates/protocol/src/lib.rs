#![deny(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_docs)]

//! Wire-level building blocks of the Perforce client RPC protocol.
//!
//! Every message exchanged with the server is a packet: a five-byte preamble
//! (checksum byte, then the little-endian payload length) followed by a
//! payload of `name NUL length value NUL` fields. One of those fields, `func`,
//! names the RPC function being called. This crate frames and parses packets
//! and classifies function names; interpreting them is left to higher layers.
//!
//! # Examples
//!
//! Frame a packet and read it back.
//!
//! ```
//! use std::io::Cursor;
//! use protocol::{KeepAll, MAX_PAYLOAD_LEN, Packet, ParameterMap, read_packet, write_packet};
//!
//! let mut params = ParameterMap::new();
//! params.insert("fmt0", "hello");
//! let packet = Packet::new("client-Message", params);
//!
//! let mut wire = Vec::new();
//! write_packet(&mut wire, &packet)?;
//!
//! let decoded = read_packet(&mut Cursor::new(wire), MAX_PAYLOAD_LEN, &mut KeepAll)?;
//! assert_eq!(decoded, Some(packet));
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! Classify incoming function names.
//!
//! ```
//! use protocol::{FunctionCategory, FunctionSpec};
//!
//! assert_eq!(FunctionSpec::decode("flush1").category(), FunctionCategory::Protocol);
//! assert_eq!(FunctionSpec::decode("bogus-fn-name").category(), FunctionCategory::None);
//! ```

mod function;
mod packet;
mod preamble;

pub use function::{ClientFunction, Function, FunctionCategory, FunctionSpec, ProtocolFunction};
pub use packet::{
    BinaryFieldRule, FieldRule, FilterAction, KeepAll, Packet, PacketError, PacketFilter,
    ParameterMap, keys, read_frame, read_packet, write_frame, write_packet,
};
pub use preamble::{
    CHECKSUM_OFFSET, MAX_PAYLOAD_LEN, PREAMBLE_LEN, Preamble, PreambleError, checksum,
};
