use std::io::{self, Read, Write};

use logging::trace_proto;

use crate::preamble::{PREAMBLE_LEN, Preamble, PreambleError};

use super::codec::Packet;
use super::filter::PacketFilter;

/// Writes `packet` as a preamble followed by its payload.
///
/// Returns the number of bytes written.
pub fn write_packet<W: Write + ?Sized>(writer: &mut W, packet: &Packet) -> io::Result<usize> {
    let payload = packet.encode_payload()?;
    write_frame(writer, &payload)?;
    trace_proto!(
        "sent {} with {} parameters ({} bytes)",
        packet.function_name(),
        packet.params().len(),
        payload.len()
    );
    Ok(PREAMBLE_LEN + payload.len())
}

/// Writes a raw payload behind a freshly computed preamble.
pub fn write_frame<W: Write + ?Sized>(writer: &mut W, payload: &[u8]) -> io::Result<()> {
    let len = u32::try_from(payload.len()).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("payload of {} bytes cannot be framed", payload.len()),
        )
    })?;
    writer.write_all(&Preamble::for_payload(len).encode())?;
    writer.write_all(payload)
}

/// Reads one frame and returns its payload.
///
/// Returns `Ok(None)` when the stream ends cleanly before the first preamble
/// byte. A checksum mismatch or a length above `limit` is reported as
/// [`io::ErrorKind::InvalidData`]; a stream that ends inside a frame is
/// reported as [`io::ErrorKind::UnexpectedEof`].
pub fn read_frame<R: Read + ?Sized>(reader: &mut R, limit: u32) -> io::Result<Option<Vec<u8>>> {
    let mut raw = [0u8; PREAMBLE_LEN];
    if !read_preamble(reader, &mut raw)? {
        return Ok(None);
    }

    let preamble = Preamble::from_bytes(raw);
    let len = preamble.validate(limit)? as usize;

    let mut payload = Vec::new();
    Read::take(&mut *reader, len as u64).read_to_end(&mut payload)?;
    if payload.len() != len {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!(
                "packet payload truncated: expected {len} bytes but received {}",
                payload.len()
            ),
        ));
    }

    Ok(Some(payload))
}

/// Reads the next packet, skipping empty keep-alive frames.
pub fn read_packet<R: Read + ?Sized>(
    reader: &mut R,
    limit: u32,
    filter: &mut dyn PacketFilter,
) -> io::Result<Option<Packet>> {
    loop {
        let Some(payload) = read_frame(reader, limit)? else {
            return Ok(None);
        };
        if payload.is_empty() {
            trace_proto!("skipping empty frame");
            continue;
        }

        let packet = Packet::decode_payload(&payload, filter)?;
        trace_proto!(
            "received {} with {} parameters ({} bytes)",
            packet.function_name(),
            packet.params().len(),
            payload.len()
        );
        return Ok(Some(packet));
    }
}

fn read_preamble<R: Read + ?Sized>(
    reader: &mut R,
    raw: &mut [u8; PREAMBLE_LEN],
) -> io::Result<bool> {
    let mut filled = 0;
    while filled < PREAMBLE_LEN {
        match reader.read(&mut raw[filled..]) {
            Ok(0) if filled == 0 => return Ok(false),
            Ok(0) => return Err(PreambleError::Truncated { actual: filled }.into()),
            Ok(read) => filled += read,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err) => return Err(err),
        }
    }
    Ok(true)
}
