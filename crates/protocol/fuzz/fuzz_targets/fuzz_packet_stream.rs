#![no_main]

//! Fuzz target for packet framing.
//!
//! Feeds arbitrary bytes through the preamble check and the payload decoder,
//! the first code to see untrusted server data.

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

use protocol::{KeepAll, MAX_PAYLOAD_LEN, Packet, Preamble, read_packet};

fuzz_target!(|data: &[u8]| {
    let _ = Preamble::decode(data);
    let _ = Packet::decode_payload(data, &mut KeepAll);

    let mut cursor = Cursor::new(data);
    while let Ok(Some(_)) = read_packet(&mut cursor, MAX_PAYLOAD_LEN, &mut KeepAll) {}
});
