//! Every charset in the registry must resolve and encode and decode losslessly.

use charset::{CharsetRegistry, CharsetSelection};

const SAMPLE: &str = "//depot/main/README.txt#3 edit change 1024 (text)";

#[test]
fn every_charset_round_trips_ascii_content() {
    let registry = CharsetRegistry::new();
    let mut resolved = 0;

    for entry in registry.entries() {
        let charset = match registry.resolve(entry.perforce_name()) {
            Ok(CharsetSelection::Named(charset)) => charset,
            Ok(CharsetSelection::Auto | CharsetSelection::NoCharset) => {
                assert!(entry.is_sentinel());
                continue;
            }
            Err(err) => panic!("{}: {err}", entry.perforce_name()),
        };

        let encoded = charset.encode_str(SAMPLE).expect(entry.perforce_name());
        let decoded = charset.decode(&encoded).expect(entry.perforce_name());
        assert_eq!(decoded, SAMPLE, "{}", entry.perforce_name());
        resolved += 1;
    }

    let named = registry.entries().iter().filter(|entry| !entry.is_sentinel()).count();
    assert_eq!(resolved, named);
    assert_eq!(resolved, 35);
}

#[test]
fn charsets_round_trip_native_text() {
    let registry = CharsetRegistry::new();
    let cases = [
        ("utf8", "naïve café 日本 😀"),
        ("iso8859-1", "naïve café"),
        ("iso8859-1", "c1 \u{80}\u{85}\u{9F} ÿ"),
        ("iso8859-5", "Привет"),
        ("iso8859-7", "Καλημέρα"),
        ("iso8859-15", "€uro œuvre"),
        ("shiftjis", "日本語テキスト"),
        ("eucjp", "日本語テキスト"),
        ("winansi", "smart “quotes”"),
        ("macosroman", "café ∆"),
        ("koi8-r", "Привет"),
        ("cp850", "Ça coûte 5£ ½"),
        ("cp858", "Ça coûte 5€"),
        ("cp737", "Καλημέρα"),
        ("cp866", "Привет"),
        ("cp936", "中文"),
        ("cp949", "한국어"),
        ("cp950", "中文"),
        ("cp1251", "Привет"),
        ("cp1253", "Καλημέρα"),
        ("utf16", "naïve 😀"),
        ("utf16le-bom", "naïve 😀"),
        ("utf16be", "naïve 😀"),
        ("utf32", "naïve 😀"),
        ("utf32-nobom", "naïve 😀"),
        ("utf32le", "naïve 😀"),
        ("utf32le-bom", "naïve 😀"),
        ("utf32be", "naïve 😀"),
        ("utf32be-bom", "naïve 😀"),
        ("gb18030", "中文 😀"),
    ];

    for (name, text) in cases {
        let charset = registry.charset(name).expect(name);
        let encoded = charset.encode_str(text).expect(name);
        assert_eq!(charset.decode(&encoded).expect(name), text, "{name}");
    }
}

#[test]
fn reverse_lookup_agrees_with_forward_lookup_for_first_rows() {
    let registry = CharsetRegistry::new();
    for entry in registry.entries() {
        let first = registry
            .perforce_name_for(entry.platform_name())
            .expect("every platform name has a first row");
        assert_eq!(registry.platform_name_for(first), Some(entry.platform_name()));
    }
}

#[test]
fn iso8859_1_maps_every_byte_to_the_same_code_point() {
    let registry = CharsetRegistry::new();
    let latin1 = registry.charset("iso8859-1").expect("iso8859-1");
    let bytes: Vec<u8> = (0..=u8::MAX).collect();
    let text = latin1.decode(&bytes).expect("every byte decodes");
    assert!(text.chars().map(u32::from).eq(0..=0xFF_u32));
    assert_eq!(latin1.encode_str(&text).expect("every char encodes"), bytes);
}
