//! The packet transport seen by the dispatch loop.

use std::io::{self, Read, Write};

use charset::Charset;
use logging::{trace_connect, trace_proto};
use protocol::{
    BinaryFieldRule, FieldRule, MAX_PAYLOAD_LEN, PREAMBLE_LEN, Packet, PacketFilter, ParameterMap,
    read_frame, write_packet,
};

use crate::config::DispatchConfig;

/// Source and sink of packets for one server connection.
///
/// [`next_packet`](Connection::next_packet) is the only place a dispatch
/// session blocks. Implementations that need prompt cancellation should
/// apply a read timeout of their own.
pub trait Connection {
    /// Reads the next packet, or `None` when the peer closed the connection.
    ///
    /// `rule` decides which fields bypass charset conversion and `filter`
    /// may drop fields before they are stored.
    fn next_packet(
        &mut self,
        rule: &mut dyn FieldRule,
        filter: &mut dyn PacketFilter,
    ) -> io::Result<Option<Packet>>;

    /// Sends one packet to the server.
    fn send_packet(&mut self, packet: &Packet) -> io::Result<()>;
}

/// Traffic counters for a [`StreamConnection`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ConnectionStats {
    /// Packets read, excluding empty keep-alive frames.
    pub packets_received: u64,
    /// Packets written.
    pub packets_sent: u64,
    /// Bytes read, preambles included.
    pub bytes_received: u64,
    /// Bytes written, preambles included.
    pub bytes_sent: u64,
}

/// [`Connection`] over a byte stream pair.
///
/// When the server is not in Unicode mode and a server charset is
/// configured, text fields are transcoded to UTF-8 on the way in and back to
/// the server charset on the way out.
#[derive(Debug)]
pub struct StreamConnection<R, W> {
    reader: R,
    writer: W,
    max_payload_len: u32,
    field_charset: Option<Charset>,
    stats: ConnectionStats,
}

impl<R: Read, W: Write> StreamConnection<R, W> {
    /// Creates a connection that passes field bytes through unchanged.
    pub const fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            max_payload_len: MAX_PAYLOAD_LEN,
            field_charset: None,
            stats: ConnectionStats {
                packets_received: 0,
                packets_sent: 0,
                bytes_received: 0,
                bytes_sent: 0,
            },
        }
    }

    /// Creates a connection using the limits and charsets of `config`.
    pub fn with_config(reader: R, writer: W, config: &DispatchConfig) -> Self {
        let mut connection = Self::new(reader, writer);
        connection.max_payload_len = config.max_payload_len();
        connection.field_charset = config.wire_charset().filter(|charset| !charset.is_utf8());
        connection
    }

    /// Traffic counters so far.
    pub const fn stats(&self) -> ConnectionStats {
        self.stats
    }

    /// Charset text fields are transcoded from, if any.
    pub const fn field_charset(&self) -> Option<Charset> {
        self.field_charset
    }

    /// Returns the underlying reader and writer.
    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }

    fn decode_fields(
        charset: Charset,
        params: ParameterMap,
        rule: &mut dyn FieldRule,
    ) -> io::Result<ParameterMap> {
        params
            .into_iter()
            .map(|(name, value)| {
                if rule.skip_conversion(&name) {
                    return Ok((name, value));
                }
                let text = charset.decode(&value)?;
                Ok((name, text.into_bytes()))
            })
            .collect()
    }

    fn encode_fields(charset: Charset, packet: &Packet) -> io::Result<Packet> {
        let mut rule = BinaryFieldRule;
        let params = packet
            .params()
            .iter()
            .map(|(name, value)| {
                if rule.skip_conversion(name) {
                    return Ok((name, value.to_vec()));
                }
                match std::str::from_utf8(value) {
                    Ok(text) => Ok((name, charset.encode_str(text)?)),
                    Err(_) => Ok((name, value.to_vec())),
                }
            })
            .collect::<io::Result<ParameterMap>>()?;
        Ok(Packet::new(packet.function_name(), params))
    }
}

impl<R: Read, W: Write> Connection for StreamConnection<R, W> {
    fn next_packet(
        &mut self,
        rule: &mut dyn FieldRule,
        filter: &mut dyn PacketFilter,
    ) -> io::Result<Option<Packet>> {
        loop {
            let Some(payload) = read_frame(&mut self.reader, self.max_payload_len)? else {
                trace_connect!("server closed the connection");
                return Ok(None);
            };
            self.stats.bytes_received += (PREAMBLE_LEN + payload.len()) as u64;
            if payload.is_empty() {
                trace_proto!("skipping empty frame");
                continue;
            }

            let packet = Packet::decode_payload(&payload, filter)?;
            self.stats.packets_received += 1;

            let Some(charset) = self.field_charset else {
                return Ok(Some(packet));
            };
            let (function, params) = packet.into_parts();
            let params = Self::decode_fields(charset, params, rule)?;
            return Ok(Some(Packet::new(function, params)));
        }
    }

    fn send_packet(&mut self, packet: &Packet) -> io::Result<()> {
        let written = match self.field_charset {
            Some(charset) => write_packet(&mut self.writer, &Self::encode_fields(charset, packet)?)?,
            None => write_packet(&mut self.writer, packet)?,
        };
        self.writer.flush()?;
        self.stats.packets_sent += 1;
        self.stats.bytes_sent += written as u64;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use charset::CharsetRegistry;
    use protocol::{KeepAll, keys};
    use std::io::Cursor;

    fn wire(packets: &[Packet]) -> Vec<u8> {
        let mut out = Vec::new();
        for packet in packets {
            write_packet(&mut out, packet).expect("encode");
        }
        out
    }

    fn message(text: &[u8]) -> Packet {
        let mut params = ParameterMap::new();
        params.insert(keys::FMT0, text);
        params.insert(keys::DATA, text);
        Packet::new("client-Message", params)
    }

    #[test]
    fn reads_packets_and_counts_traffic() {
        let packet = message(b"hello");
        let bytes = wire(std::slice::from_ref(&packet));
        let total = bytes.len() as u64;
        let mut connection = StreamConnection::new(Cursor::new(bytes), Vec::new());

        let read = connection
            .next_packet(&mut BinaryFieldRule, &mut KeepAll)
            .expect("read");
        assert_eq!(read, Some(packet));
        assert!(
            connection
                .next_packet(&mut BinaryFieldRule, &mut KeepAll)
                .expect("eof")
                .is_none()
        );

        let stats = connection.stats();
        assert_eq!(stats.packets_received, 1);
        assert_eq!(stats.bytes_received, total);
    }

    #[test]
    fn send_writes_a_framed_packet() {
        let mut connection = StreamConnection::new(Cursor::new(Vec::new()), Vec::new());
        let packet = Packet::new("release", ParameterMap::new());
        connection.send_packet(&packet).expect("send");

        let (_, written) = connection.into_inner();
        assert_eq!(written, wire(&[packet]));
    }

    #[test]
    fn non_unicode_server_text_is_transcoded() {
        let registry = CharsetRegistry::new();
        let config = DispatchConfig::builder()
            .server_charset("shiftjis")
            .build(&registry)
            .expect("config");
        let sjis = registry.charset("shiftjis").expect("sjis");
        let encoded = sjis.encode_str("日本").expect("encode");

        let bytes = wire(&[message(&encoded)]);
        let mut connection = StreamConnection::with_config(Cursor::new(bytes), Vec::new(), &config);
        assert_eq!(connection.field_charset(), Some(sjis));

        let packet = connection
            .next_packet(&mut BinaryFieldRule, &mut KeepAll)
            .expect("read")
            .expect("packet");
        assert_eq!(packet.params().get_str(keys::FMT0), Some("日本"));
        assert_eq!(packet.params().get(keys::DATA), Some(encoded.as_slice()));

        connection.send_packet(&packet).expect("send");
        let (_, written) = connection.into_inner();
        assert_eq!(written, wire(&[message(&encoded)]));
    }

    #[test]
    fn undecodable_text_is_invalid_data() {
        let registry = CharsetRegistry::new();
        let config = DispatchConfig::builder()
            .server_charset("eucjp")
            .build(&registry)
            .expect("config");

        let mut params = ParameterMap::new();
        params.insert(keys::FMT0, vec![0x8E_u8, 0x20]);
        let bytes = wire(&[Packet::new("client-Message", params)]);
        let mut connection = StreamConnection::with_config(Cursor::new(bytes), Vec::new(), &config);

        let err = connection
            .next_packet(&mut BinaryFieldRule, &mut KeepAll)
            .expect_err("malformed");
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn oversized_payload_is_rejected_before_reading_it() {
        let registry = CharsetRegistry::new();
        let config = DispatchConfig::builder()
            .max_payload_len(8)
            .build(&registry)
            .expect("config");
        let bytes = wire(&[message(b"a message longer than eight bytes")]);
        let mut connection = StreamConnection::with_config(Cursor::new(bytes), Vec::new(), &config);

        let err = connection
            .next_packet(&mut BinaryFieldRule, &mut KeepAll)
            .expect_err("oversized");
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
