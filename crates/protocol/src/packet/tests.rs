use std::io::{self, Cursor, Read};

use super::*;
use crate::preamble::{MAX_PAYLOAD_LEN, PREAMBLE_LEN, Preamble};

fn message_packet() -> Packet {
    let params: ParameterMap = [("code0", "285219638"), ("fmt0", "%depotFile% - no such file")]
        .into_iter()
        .collect();
    Packet::new("client-Message", params)
}

fn field(name: &str, value: &[u8]) -> Vec<u8> {
    let mut out = name.as_bytes().to_vec();
    out.push(0);
    out.extend_from_slice(&(value.len() as u32).to_le_bytes());
    out.extend_from_slice(value);
    out.push(0);
    out
}

#[test]
fn payload_places_func_last() {
    let mut params = ParameterMap::new();
    params.insert("user", "bruno");
    let payload = Packet::new("user-info", params)
        .encode_payload()
        .expect("encodes");

    let mut expected = field("user", b"bruno");
    expected.extend(field("func", b"user-info"));
    assert_eq!(payload, expected);
}

#[test]
fn payload_ignores_func_parameter() {
    let mut params = ParameterMap::new();
    params.insert("func", "stale");
    let payload = Packet::new("flush2", params)
        .encode_payload()
        .expect("encodes");
    assert_eq!(payload, field("func", b"flush2"));
}

#[test]
fn decode_accepts_func_anywhere() {
    let mut payload = field("func", b"client-FstatInfo");
    payload.extend(field("depotFile", b"//depot/a.txt"));
    payload.extend(field("", b""));

    let packet = Packet::decode_payload(&payload, &mut KeepAll).expect("decodes");
    assert_eq!(packet.function_name(), "client-FstatInfo");
    assert_eq!(packet.params().get_str("depotFile"), Some("//depot/a.txt"));
    assert_eq!(packet.params().get(""), Some(&b""[..]));
}

#[test]
fn decode_preserves_binary_values() {
    let value = [0u8, 0xff, 0, 1, 2];
    let mut payload = field("data", &value);
    payload.extend(field("func", b"client-WriteFile"));

    let packet = Packet::decode_payload(&payload, &mut KeepAll).expect("decodes");
    assert_eq!(packet.params().get("data"), Some(&value[..]));
}

#[test]
fn decode_requires_function() {
    let payload = field("user", b"bruno");
    assert_eq!(
        Packet::decode_payload(&payload, &mut KeepAll),
        Err(PacketError::MissingFunction)
    );
}

#[test]
fn decode_reports_truncated_length() {
    let payload = b"func\0\x03\0".to_vec();
    assert_eq!(
        Packet::decode_payload(&payload, &mut KeepAll),
        Err(PacketError::TruncatedField {
            offset: 0,
            part: "length"
        })
    );
}

#[test]
fn decode_reports_truncated_value() {
    let mut payload = field("func", b"release");
    payload.truncate(payload.len() - 3);
    assert!(matches!(
        Packet::decode_payload(&payload, &mut KeepAll),
        Err(PacketError::TruncatedField { part: "value", .. })
    ));
}

#[test]
fn decode_reports_missing_terminator() {
    let mut payload = field("func", b"release");
    let last = payload.len() - 1;
    payload[last] = b'x';
    assert_eq!(
        Packet::decode_payload(&payload, &mut KeepAll),
        Err(PacketError::MissingTerminator {
            name: "func".to_owned()
        })
    );
}

#[test]
fn filter_skip_and_skip_rest() {
    let mut payload = field("a", b"1");
    payload.extend(field("b", b"2"));
    payload.extend(field("c", b"3"));
    payload.extend(field("d", b"4"));
    payload.extend(field("func", b"client-FstatInfo"));

    let mut filter = |name: &str, _value: &[u8]| match name {
        "b" => FilterAction::Skip,
        "c" => FilterAction::SkipRest,
        _ => FilterAction::Keep,
    };
    let packet = Packet::decode_payload(&payload, &mut filter).expect("decodes");

    assert_eq!(packet.function_name(), "client-FstatInfo");
    assert_eq!(packet.params().keys().collect::<Vec<_>>(), ["a"]);
}

#[test]
fn filter_is_reset_for_every_packet() {
    struct Counting {
        seen: usize,
        resets: usize,
    }
    impl PacketFilter for Counting {
        fn reset(&mut self) {
            self.resets += 1;
            self.seen = 0;
        }
        fn filter(&mut self, _name: &str, _value: &[u8]) -> FilterAction {
            self.seen += 1;
            if self.seen > 1 {
                FilterAction::SkipRest
            } else {
                FilterAction::Keep
            }
        }
    }

    let mut payload = field("a", b"1");
    payload.extend(field("b", b"2"));
    payload.extend(field("func", b"client-Message"));

    let mut filter = Counting { seen: 0, resets: 0 };
    for _ in 0..2 {
        let packet = Packet::decode_payload(&payload, &mut filter).expect("decodes");
        assert_eq!(packet.params().len(), 1);
    }
    assert_eq!(filter.resets, 2);
}

#[test]
fn binary_field_rule_skips_content_fields() {
    let mut rule = BinaryFieldRule;
    assert!(rule.skip_conversion("data"));
    assert!(rule.skip_conversion("data2"));
    assert!(!rule.skip_conversion("depotFile"));

    let mut closure = |name: &str| name.starts_with("digest");
    assert!(closure.skip_conversion("digest"));
}

#[test]
fn write_then_read_packet_over_stream() {
    let mut wire = Vec::new();
    let written = write_packet(&mut wire, &message_packet()).expect("write");
    assert_eq!(written, wire.len());

    let preamble = Preamble::decode(&wire).expect("preamble");
    assert!(preamble.has_valid_checksum());
    assert_eq!(preamble.payload_len() as usize, wire.len() - PREAMBLE_LEN);

    let mut reader = Cursor::new(wire);
    let packet = read_packet(&mut reader, MAX_PAYLOAD_LEN, &mut KeepAll)
        .expect("read")
        .expect("one packet");
    assert_eq!(packet, message_packet());
    assert!(
        read_packet(&mut reader, MAX_PAYLOAD_LEN, &mut KeepAll)
            .expect("clean eof")
            .is_none()
    );
}

#[test]
fn read_packet_skips_empty_frames() {
    let mut wire = Preamble::for_payload(0).encode().to_vec();
    write_packet(&mut wire, &message_packet()).expect("write");

    let packet = read_packet(&mut Cursor::new(wire), MAX_PAYLOAD_LEN, &mut KeepAll)
        .expect("read")
        .expect("packet after keep-alive");
    assert_eq!(packet.function_name(), "client-Message");
}

#[test]
fn read_frame_rejects_bad_checksum() {
    let mut wire = Vec::new();
    write_packet(&mut wire, &message_packet()).expect("write");
    wire[0] ^= 0x01;

    let err = read_frame(&mut Cursor::new(wire), MAX_PAYLOAD_LEN).expect_err("checksum");
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
}

#[test]
fn read_frame_rejects_oversized_length() {
    let wire = Preamble::for_payload(64).encode();
    let err = read_frame(&mut Cursor::new(wire), 63).expect_err("limit");
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
}

#[test]
fn read_frame_reports_truncated_preamble_and_payload() {
    let err = read_frame(&mut Cursor::new(vec![1u8, 2]), MAX_PAYLOAD_LEN).expect_err("short");
    assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);

    let mut wire = Preamble::for_payload(10).encode().to_vec();
    wire.extend_from_slice(b"abc");
    let err = read_frame(&mut Cursor::new(wire), MAX_PAYLOAD_LEN).expect_err("short payload");
    assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
}

#[test]
fn read_frame_handles_byte_at_a_time_readers() {
    struct Trickle(Cursor<Vec<u8>>);
    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let end = buf.len().min(1);
            self.0.read(&mut buf[..end])
        }
    }

    let mut wire = Vec::new();
    write_packet(&mut wire, &message_packet()).expect("write");
    let mut reader = Trickle(Cursor::new(wire));
    let packet = read_packet(&mut reader, MAX_PAYLOAD_LEN, &mut KeepAll)
        .expect("read")
        .expect("packet");
    assert_eq!(packet, message_packet());
}
