//! Chunk-boundary behaviour of the streaming converter.
//!
//! Splitting the source stream at arbitrary points must never change the
//! converted output, whatever the charset's sequence lengths are.

use charset::{Charset, CharsetConverter, CharsetRegistry, TranslationErrorKind};
use proptest::prelude::*;

/// Characters each charset can represent, mixing single and multi-byte forms.
fn alphabet(perforce_name: &str) -> &'static [char] {
    match perforce_name {
        "shiftjis" | "eucjp" => &['a', 'Z', '1', ' ', '\n', '日', '本', 'ア', 'ー', 'ｱ', '漢'],
        "gb18030" => &['a', ' ', '\r', '中', '文', '€', 'é', '😀', 'Ω'],
        "cp936" | "cp950" => &['a', ' ', '中', '文'],
        "koi8-r" | "cp1251" => &['a', ' ', 'Ж', 'я', 'Ё'],
        "cp850" => &['a', ' ', 'Ç', '½', '█', '\u{A0}'],
        _ => &['a', 'Z', ' ', '\n', 'é', 'ß', '€', '中', '😀', '\u{10FFFF}'],
    }
}

fn text_strategy(perforce_name: &'static str) -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(alphabet(perforce_name)), 0..48)
        .prop_map(|chars| chars.into_iter().collect())
}

fn splits(len: usize) -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0..=len, 0..6).prop_map(|mut points| {
        points.sort_unstable();
        points
    })
}

fn convert_in_chunks(
    converter: &mut CharsetConverter,
    bytes: &[u8],
    points: &[usize],
) -> Vec<u8> {
    let mut out = Vec::new();
    let mut start = 0;
    for &point in points.iter().chain(std::iter::once(&bytes.len())) {
        out.extend(converter.convert(&bytes[start..point]).expect("chunk converts"));
        start = point;
    }
    converter.finish().expect("no trailing partial sequence");
    out
}

fn check_chunking(perforce_name: &'static str) -> impl Strategy<Value = (Vec<u8>, Vec<usize>)> {
    let registry = CharsetRegistry::new();
    let source = registry.charset(perforce_name).expect("charset resolves");
    text_strategy(perforce_name).prop_flat_map(move |text| {
        let bytes = source.encode_str(&text).expect("alphabet is encodable");
        let len = bytes.len();
        (Just(bytes), splits(len))
    })
}

fn assert_chunking_invariant(perforce_name: &str, bytes: &[u8], points: &[usize]) {
    let registry = CharsetRegistry::new();
    let mut whole = CharsetConverter::from_perforce_names(&registry, perforce_name, "utf8")
        .expect("converter");
    let expected = whole.convert(bytes).expect("whole buffer converts");
    whole.finish().expect("whole buffer is complete");

    let mut chunked = CharsetConverter::from_perforce_names(&registry, perforce_name, "utf8")
        .expect("converter");
    assert_eq!(convert_in_chunks(&mut chunked, bytes, points), expected);
}

proptest! {
    #[test]
    fn utf8_chunking_is_invisible((bytes, points) in check_chunking("utf8")) {
        assert_chunking_invariant("utf8", &bytes, &points);
    }

    #[test]
    fn utf16le_chunking_is_invisible((bytes, points) in check_chunking("utf16le")) {
        assert_chunking_invariant("utf16le", &bytes, &points);
    }

    #[test]
    fn shift_jis_chunking_is_invisible((bytes, points) in check_chunking("shiftjis")) {
        assert_chunking_invariant("shiftjis", &bytes, &points);
    }

    #[test]
    fn euc_jp_chunking_is_invisible((bytes, points) in check_chunking("eucjp")) {
        assert_chunking_invariant("eucjp", &bytes, &points);
    }

    #[test]
    fn utf32_chunking_is_invisible((bytes, points) in check_chunking("utf32be")) {
        assert_chunking_invariant("utf32be", &bytes, &points);
    }

    #[test]
    fn cp850_chunking_is_invisible((bytes, points) in check_chunking("cp850")) {
        assert_chunking_invariant("cp850", &bytes, &points);
    }

    #[test]
    fn gb18030_chunking_is_invisible((bytes, points) in check_chunking("gb18030")) {
        assert_chunking_invariant("gb18030", &bytes, &points);
    }

    #[test]
    fn utf8_to_utf16_output_matches_single_pass(
        text in text_strategy("utf8"),
        split in 0usize..64,
    ) {
        let target = Charset::for_name("UTF-16BE").expect("utf-16be");
        let bytes = text.as_bytes();
        let split = split.min(bytes.len());

        let mut converter = CharsetConverter::new(Charset::utf8(), target);
        let mut out = converter.convert(&bytes[..split]).expect("first");
        out.extend(converter.convert(&bytes[split..]).expect("second"));
        converter.finish().expect("complete");

        let mut expected = Vec::<u8>::new();
        if !text.is_empty() {
            expected.extend([0xFE_u8, 0xFF]);
        }
        expected.extend(target.encode_str(&text).expect("encode"));
        prop_assert_eq!(out, expected);
    }

    #[test]
    fn arbitrary_bytes_never_panic(
        bytes in prop::collection::vec(any::<u8>(), 0..64),
        split in 0usize..64,
    ) {
        let registry = CharsetRegistry::new();
        for name in [
            "utf8", "utf16", "utf32", "iso8859-1", "cp737", "shiftjis", "gb18030", "cp949",
        ] {
            let mut converter = CharsetConverter::from_perforce_names(&registry, name, "utf8")
                .expect("converter");
            let split = split.min(bytes.len());
            let _ = converter
                .convert(&bytes[..split])
                .and_then(|_| converter.convert(&bytes[split..]))
                .and_then(|_| converter.finish());
        }
    }
}

#[test]
fn truncated_stream_is_reported_by_finish() {
    let registry = CharsetRegistry::new();
    let mut converter =
        CharsetConverter::from_perforce_names(&registry, "eucjp", "utf8").expect("converter");
    let bytes = Charset::for_name("EUC-JP")
        .expect("euc-jp")
        .encode_str("日本")
        .expect("encode");

    let out = converter.convert(&bytes[..3]).expect("prefix");
    assert_eq!(out, "日".as_bytes());
    let err = converter.finish().expect_err("truncated");
    assert_eq!(err.kind(), TranslationErrorKind::Incomplete);
    assert_eq!(err.offset(), 2);
}
